//! Loading protocol handed to the operator alongside the sequence table.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use hplc_core::errors::{ErrorInfo, HplcError};
use hplc_core::{PlacedSample, TrayGroup, TrayLabel, WellPosition, VIAL_COLUMNS, VIAL_ROWS};
use hplc_engine::SequenceRun;

/// File name of the loading protocol inside the output folder.
pub const PROTOCOL_FILE_NAME: &str = "AS_loading_protocol.md";

const TITLE: &str = "Procedure for loading HPLC samples in autosampler";
const TRAY_TYPE_REMINDER: &str = "DO NOT FORGET TO SET THE TRAY TYPE IN THE AUTOSAMPLER!";

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn render_vial_grid(out: &mut String, tray: &TrayLabel, part: usize, samples: &[&PlacedSample]) {
    let by_well: BTreeMap<WellPosition, &str> = samples
        .iter()
        .map(|placed| (placed.well, placed.sample.identifier.as_str()))
        .collect();

    out.push_str(&format!("### Tray {tray} Part {part}\n\n"));
    let header: String = (1..=VIAL_COLUMNS).map(|column| format!(" {column} |")).collect();
    out.push_str(&format!("|   |{header}\n|---|{}\n", "---|".repeat(VIAL_COLUMNS as usize)));
    for row in VIAL_ROWS {
        let cells: String = (1..=VIAL_COLUMNS)
            .map(|column| {
                let cell = by_well
                    .get(&WellPosition::new(row, column))
                    .map(|identifier| escape_cell(identifier))
                    .unwrap_or_default();
                format!(" {cell} |")
            })
            .collect();
        out.push_str(&format!("| {row} |{cells}\n"));
    }
    out.push('\n');
}

/// Renders the loading protocol as Markdown.
///
/// Vial trays get one 5x8 grid per loading pass, headed `Tray {label} Part
/// {pass + 1}`; plates are listed with the tray they go in.
pub fn render_loading_protocol(run: &SequenceRun) -> String {
    let mut out = format!("# {TITLE}\n\n**{TRAY_TYPE_REMINDER}**\n\n");

    out.push_str("## Vial Trays Layout\n\n");
    let mut vial_groups = 0;
    for assignment in &run.trays {
        if !matches!(assignment.group, TrayGroup::Vial { .. }) {
            continue;
        }
        let samples: Vec<&PlacedSample> = run
            .vials
            .iter()
            .filter(|placed| placed.tray == assignment.tray && placed.pass == assignment.pass)
            .collect();
        render_vial_grid(&mut out, &assignment.tray, assignment.pass + 1, &samples);
        vial_groups += 1;
    }
    if vial_groups == 0 {
        out.push_str("No vial trays are used in this run.\n\n");
    }

    out.push_str("## 96-Well Plate Trays Loading Protocol\n\n");
    let mut plate_groups = 0;
    for assignment in &run.trays {
        if let TrayGroup::Plate { name } = &assignment.group {
            out.push_str(&format!(
                "- 96-well plate {} should be loaded in: **Tray {}**",
                escape_cell(name),
                assignment.tray
            ));
            if assignment.pass > 0 {
                out.push_str(&format!(" (Part {})", assignment.pass + 1));
            }
            out.push('\n');
            plate_groups += 1;
        }
    }
    if plate_groups == 0 {
        out.push_str("No 96-well plates are used in this run.\n");
    }
    out
}

/// Writes the loading protocol to `path`.
pub fn write_loading_protocol(path: &Path, run: &SequenceRun) -> Result<(), HplcError> {
    fs::write(path, render_loading_protocol(run)).map_err(|err| {
        HplcError::Io(
            ErrorInfo::new("protocol.write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use hplc_core::RawSample;

    #[test]
    fn pipes_are_escaped() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
    }

    #[test]
    fn vial_grid_has_a_row_per_tray_row() {
        let placed = PlacedSample {
            sample: RawSample::vial("S|1"),
            tray: TrayLabel::from("B"),
            well: WellPosition::new('B', 3),
            pass: 1,
        };
        let mut out = String::new();
        render_vial_grid(&mut out, &placed.tray, 2, &[&placed]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "### Tray B Part 2");
        assert_eq!(lines[2], "|   | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 |");
        assert_eq!(lines[3], "|---|---|---|---|---|---|---|---|---|");
        assert_eq!(lines[4], "| A |  |  |  |  |  |  |  |  |");
        assert_eq!(lines[5], "| B |  |  | S\\|1 |  |  |  |  |  |");
        assert_eq!(lines.len(), 10);
    }
}
