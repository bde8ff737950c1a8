use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Row labels of a vial tray, top to bottom.
pub const VIAL_ROWS: [char; 5] = ['A', 'B', 'C', 'D', 'E'];
/// Number of columns on a vial tray.
pub const VIAL_COLUMNS: u8 = 8;
/// Number of vials a single tray holds.
pub const VIAL_TRAY_CAPACITY: usize = VIAL_ROWS.len() * VIAL_COLUMNS as usize;
/// Row labels of a 96-well plate.
pub const PLATE_ROWS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];
/// Number of columns on a 96-well plate.
pub const PLATE_COLUMNS: u8 = 12;

/// Marker prefix for manifest entries that reserve a slot without being injected.
pub const OMIT_MARKER: &str = "OMIT";

/// Physical container a sample was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceKind {
    /// 1.5 mL vial on a 5x8 vial tray.
    Vial,
    /// Well of a 96-well plate.
    Plate,
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Vial => write!(f, "VIAL"),
            SourceKind::Plate => write!(f, "PLATE"),
        }
    }
}

/// Row letter plus 1-based column number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WellPosition {
    /// Row letter (`A`..`E` for vials, `A`..`H` for plates).
    pub row: char,
    /// Column number starting at 1.
    pub column: u8,
}

impl WellPosition {
    /// Creates a new well position.
    pub const fn new(row: char, column: u8) -> Self {
        Self { row, column }
    }

    /// Returns the vial slot at `index` in row-major order (A1..A8, B1..B8, ...).
    ///
    /// Returns `None` once `index` exceeds the tray capacity.
    pub fn vial_slot(index: usize) -> Option<Self> {
        if index >= VIAL_TRAY_CAPACITY {
            return None;
        }
        let row = VIAL_ROWS[index / VIAL_COLUMNS as usize];
        let column = (index % VIAL_COLUMNS as usize) as u8 + 1;
        Some(Self::new(row, column))
    }

    /// Whether the position lies on an 8x12 plate.
    pub fn fits_plate(&self) -> bool {
        PLATE_ROWS.contains(&self.row) && (1..=PLATE_COLUMNS).contains(&self.column)
    }
}

impl Display for WellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

/// Colour code of an autosampler tray (for example `R`, `G`, `B`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrayLabel(String);

impl TrayLabel {
    /// Wraps a tray label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First character of the label, used in plate position codes.
    pub fn first_char(&self) -> Option<char> {
        self.0.chars().next()
    }
}

impl Display for TrayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrayLabel {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Where a manifest entry came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SampleSource {
    /// Row of the vials table.
    Vial,
    /// Cell of a plate table.
    Plate {
        /// Plate identity (file stem of the plate table).
        plate: String,
        /// Grid coordinate on the plate.
        well: WellPosition,
    },
}

/// One manifest entry as read from the input tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSample {
    /// Free-form identifier; empty when the manifest cell was blank.
    pub identifier: String,
    /// Origin of the entry.
    pub source: SampleSource,
}

impl RawSample {
    /// Creates a vial-sourced sample.
    pub fn vial(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            source: SampleSource::Vial,
        }
    }

    /// Creates a plate-sourced sample.
    pub fn plate(
        identifier: impl Into<String>,
        plate: impl Into<String>,
        well: WellPosition,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            source: SampleSource::Plate {
                plate: plate.into(),
                well,
            },
        }
    }

    /// Container kind of the sample.
    pub fn kind(&self) -> SourceKind {
        match self.source {
            SampleSource::Vial => SourceKind::Vial,
            SampleSource::Plate { .. } => SourceKind::Plate,
        }
    }

    /// Entries starting with `OMIT` keep their slot but are never injected.
    pub fn is_omitted(&self) -> bool {
        self.identifier.starts_with(OMIT_MARKER)
    }

    /// Whether the manifest cell carried no identifier at all.
    pub fn is_blank(&self) -> bool {
        self.identifier.trim().is_empty()
    }
}

/// Content of one plate cell as read from the manifest table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CellContent {
    /// Blank cell: an unused well.
    Empty,
    /// Free-text sample identifier.
    Text(String),
    /// Numeric cell; not a sample identifier.
    Number(f64),
}

/// One labelled cell of a plate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateCell {
    /// Grid coordinate built from the row and column labels of the table.
    pub well: WellPosition,
    /// Cell content.
    pub content: CellContent,
}

/// A 96-well plate table in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateGrid {
    /// Plate identity (file stem of the plate table).
    pub name: String,
    /// Labelled cells, row by row.
    pub cells: Vec<PlateCell>,
}

impl PlateGrid {
    /// Creates an empty grid for the named plate.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: Vec::new(),
        }
    }

    /// Appends a cell.
    pub fn push(&mut self, well: WellPosition, content: CellContent) {
        self.cells.push(PlateCell { well, content });
    }
}

/// Snapshot of a manifest folder: the vials table plus every readable plate table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Vial entries in table order, blank rows included.
    pub vials: Vec<RawSample>,
    /// Plate tables in processing order.
    pub plates: Vec<PlateGrid>,
}

/// A manifest entry with its physical tray and well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedSample {
    /// The original manifest entry.
    pub sample: RawSample,
    /// Tray the sample is loaded on.
    pub tray: TrayLabel,
    /// Well on that tray.
    pub well: WellPosition,
    /// Loading pass of the tray, starting at 0. Incremented each time the
    /// round-robin pool wraps around and the tray is reused.
    pub pass: usize,
}

impl PlacedSample {
    /// Container kind of the underlying sample.
    pub fn kind(&self) -> SourceKind {
        self.sample.kind()
    }
}

/// One row of the autosampler injection table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjectionRecord {
    /// Rendered sample name including replicate suffixes.
    pub name: String,
    /// Autosampler position code (`{tray}{row}{column}`).
    pub position: String,
    /// Injection volume in microlitres.
    pub volume: f64,
    /// Instrument method executed for the injection.
    pub instrument_method: String,
    /// Container kind the injection is drawn from.
    pub origin: SourceKind,
}

impl InjectionRecord {
    /// Constant detector column value.
    pub const DETECTOR: &'static str = "None";
    /// Constant injection type column value.
    pub const INJECTION_TYPE: &'static str = "Unknown";
    /// Constant calibration level column value.
    pub const LEVEL: &'static str = "";
}

/// What a tray is holding during one loading pass.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrayGroup {
    /// A 96-well plate identified by its manifest file stem.
    Plate {
        /// Plate identity.
        name: String,
    },
    /// A chunk of up to 40 vials from the vials table.
    Vial {
        /// Zero-based chunk index in manifest order.
        chunk: usize,
    },
}

/// Association between a plate or vial chunk and the tray it is loaded on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrayAssignment {
    /// Plate or vial chunk.
    pub group: TrayGroup,
    /// Assigned tray.
    pub tray: TrayLabel,
    /// Loading pass of the tray.
    pub pass: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vial_slots_are_row_major() {
        assert_eq!(WellPosition::vial_slot(0), Some(WellPosition::new('A', 1)));
        assert_eq!(WellPosition::vial_slot(7), Some(WellPosition::new('A', 8)));
        assert_eq!(WellPosition::vial_slot(8), Some(WellPosition::new('B', 1)));
        assert_eq!(WellPosition::vial_slot(39), Some(WellPosition::new('E', 8)));
        assert_eq!(WellPosition::vial_slot(40), None);
    }

    #[test]
    fn omit_marker_is_case_sensitive() {
        assert!(RawSample::vial("OMIT_x").is_omitted());
        assert!(!RawSample::vial("omit_x").is_omitted());
    }
}
