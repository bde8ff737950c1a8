//! Manifest folder reader.
//!
//! A manifest folder holds a `vials.csv` (or `vials.tsv`) table with one
//! identifier per row and a `plates/` folder with one 8x12 table per plate.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use hplc_core::errors::{ErrorInfo, HplcError};
use hplc_core::{CellContent, Manifest, PlateGrid, RawSample, WellPosition};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::hash::ContentHasher;

/// Accepted file names of the vials table, in lookup order.
pub const VIAL_TABLE_NAMES: [&str; 2] = ["vials.csv", "vials.tsv"];
/// Sub-folder holding the plate tables.
pub const PLATES_DIR: &str = "plates";

fn manifest_error(code: &str, message: impl Into<String>, path: &Path) -> HplcError {
    HplcError::Manifest(
        ErrorInfo::new(code, message).with_context("path", path.display().to_string()),
    )
}

/// A plate table that could not be read and was left out of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPlate {
    /// Path of the plate table.
    pub path: PathBuf,
    /// Why it was skipped.
    pub error: HplcError,
}

/// Result of reading a manifest folder.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedManifest {
    /// Vial and plate entries.
    pub manifest: Manifest,
    /// Plate tables dropped because they could not be parsed.
    pub skipped_plates: Vec<SkippedPlate>,
    /// SHA256 over every table that was read.
    pub content_hash: String,
}

fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

fn is_table(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case("csv") || ext.eq_ignore_ascii_case("tsv")
    )
}

/// Parses a vials table: first cell of every row, no header.
///
/// Rows whose first cell is empty keep their slot; fully blank lines are
/// dropped by the reader.
pub fn parse_vials(bytes: &[u8], delimiter: u8) -> Result<Vec<RawSample>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes);
    let mut samples = Vec::new();
    for record in reader.records() {
        let record = record?;
        let identifier = record.get(0).unwrap_or_default().trim();
        samples.push(RawSample::vial(identifier));
    }
    Ok(samples)
}

/// Classifies a plate cell: blank, numeric or text.
pub fn classify_cell(raw: &str) -> CellContent {
    let text = raw.trim();
    if text.is_empty() {
        CellContent::Empty
    } else if let Ok(value) = text.parse::<f64>() {
        CellContent::Number(value)
    } else {
        CellContent::Text(text.to_string())
    }
}

fn parse_row_label(label: &str) -> Option<char> {
    let mut chars = label.trim().chars();
    let row = chars.next()?.to_ascii_uppercase();
    chars.next().is_none().then_some(row)
}

fn parse_column_label(label: &str) -> Option<u8> {
    label.trim().parse::<u8>().ok()
}

/// Parses a plate table: header row of column numbers, first column of row letters.
pub fn parse_plate(name: &str, bytes: &[u8], delimiter: u8) -> Result<PlateGrid, HplcError> {
    let table_error = |code: &str, message: String| {
        HplcError::Manifest(ErrorInfo::new(code, message).with_context("plate", name))
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|err| table_error("manifest.plate_csv", err.to_string()))?
        .clone();
    let columns = headers
        .iter()
        .skip(1)
        .map(|label| {
            parse_column_label(label).ok_or_else(|| {
                table_error("manifest.plate_column", format!("bad column label {label:?}"))
            })
        })
        .collect::<Result<Vec<u8>, HplcError>>()?;
    let mut seen_columns = BTreeSet::new();
    if let Some(column) = columns.iter().find(|column| !seen_columns.insert(**column)) {
        return Err(table_error(
            "manifest.plate_well",
            format!("column {column} appears more than once"),
        ));
    }

    let mut grid = PlateGrid::new(name);
    let mut seen_rows = BTreeSet::new();
    for record in reader.records() {
        let record = record.map_err(|err| table_error("manifest.plate_csv", err.to_string()))?;
        let label = record.get(0).unwrap_or_default();
        let row = parse_row_label(label).ok_or_else(|| {
            table_error("manifest.plate_row", format!("bad row label {label:?}"))
        })?;
        if !seen_rows.insert(row) {
            return Err(table_error(
                "manifest.plate_well",
                format!("row {row} appears more than once"),
            ));
        }
        for (column, cell) in columns.iter().zip(record.iter().skip(1)) {
            let well = WellPosition::new(row, *column);
            if !well.fits_plate() {
                return Err(table_error(
                    "manifest.plate_well",
                    format!("well {well} is outside an 8x12 plate"),
                ));
            }
            grid.push(well, classify_cell(cell));
        }
    }
    Ok(grid)
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, HplcError> {
    fs::read(path).map_err(|err| manifest_error("manifest.read", err.to_string(), path))
}

fn plate_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Reads a manifest folder.
///
/// A missing folder is fatal. A missing vials table or plates folder is
/// logged and treated as empty. Plate tables that fail to parse are skipped
/// and reported in [`LoadedManifest::skipped_plates`].
pub fn load_manifest(folder: &Path) -> Result<LoadedManifest, HplcError> {
    if !folder.is_dir() {
        return Err(HplcError::Manifest(
            ErrorInfo::new("manifest.folder_missing", "manifest folder does not exist")
                .with_context("path", folder.display().to_string())
                .with_hint("run `hplc-seq setup-env` to create a template folder"),
        ));
    }
    let mut hasher = ContentHasher::default();
    let mut manifest = Manifest::default();

    let vial_table = VIAL_TABLE_NAMES
        .iter()
        .map(|name| folder.join(name))
        .find(|path| path.is_file());
    match vial_table {
        Some(path) => {
            let bytes = read_bytes(&path)?;
            hasher.update("vials", &bytes);
            manifest.vials = parse_vials(&bytes, delimiter_for(&path))
                .map_err(|err| manifest_error("manifest.vials_csv", err.to_string(), &path))?;
            info!("read {} vial entries from {}", manifest.vials.len(), path.display());
        }
        None => warn!(
            "no vials table in {}; assuming no samples in vial trays",
            folder.display()
        ),
    }

    let mut skipped_plates = Vec::new();
    let plates_dir = folder.join(PLATES_DIR);
    if plates_dir.is_dir() {
        let tables = WalkDir::new(&plates_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file() && is_table(entry.path()));
        for entry in tables {
            let path = entry.path();
            let name = plate_name(path);
            let parsed = read_bytes(path).and_then(|bytes| {
                let grid = parse_plate(&name, &bytes, delimiter_for(path))?;
                Ok((grid, bytes))
            });
            match parsed {
                Ok((grid, bytes)) => {
                    hasher.update(&name, &bytes);
                    manifest.plates.push(grid);
                }
                Err(error) => {
                    warn!("skipping plate table {}: {error}", path.display());
                    skipped_plates.push(SkippedPlate {
                        path: path.to_path_buf(),
                        error,
                    });
                }
            }
        }
        info!(
            "read {} plate tables from {}",
            manifest.plates.len(),
            plates_dir.display()
        );
    } else {
        warn!(
            "no plates folder in {}; assuming no 96-well trays are needed",
            folder.display()
        );
    }

    Ok(LoadedManifest {
        manifest,
        skipped_plates,
        content_hash: hasher.finish(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_cells_are_not_samples() {
        assert_eq!(classify_cell("  "), CellContent::Empty);
        assert_eq!(classify_cell("42"), CellContent::Number(42.0));
        assert_eq!(classify_cell(" S1.R1 "), CellContent::Text("S1.R1".into()));
    }

    #[test]
    fn row_labels_are_single_letters() {
        assert_eq!(parse_row_label("b"), Some('B'));
        assert_eq!(parse_row_label("AB"), None);
        assert_eq!(parse_row_label(""), None);
    }
}
