//! Template manifest folder used to get operators started.

use std::fs;
use std::path::Path;

use hplc_core::errors::{ErrorInfo, HplcError};
use hplc_core::{PLATE_COLUMNS, PLATE_ROWS};
use log::info;

use crate::manifest::{PLATES_DIR, VIAL_TABLE_NAMES};
use crate::output::io_error;

/// Folder name suggested when the operator does not pick one.
pub const DEFAULT_TEMPLATE_FOLDER: &str = "template_manifest_folder";
/// Plates written into the template.
pub const TEMPLATE_PLATES: [&str; 3] = ["A", "B", "C"];

const EXAMPLES_PER_GROUP: usize = 5;

/// Identifiers of the template vials table: standards, samples, then omitted slots.
pub fn template_vials() -> Vec<String> {
    ["STD_EXAMPLE", "VIAL_EXAMPLE", "OMIT_EXAMPLE"]
        .iter()
        .flat_map(|group| (1..=EXAMPLES_PER_GROUP).map(move |i| format!("{group}_{i}.R1.T0")))
        .collect()
}

fn write_table(path: &Path, rows: &[Vec<String>]) -> Result<(), HplcError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|err| io_error("template.create", err, path))?;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|err| io_error("template.write", err, path))?;
    }
    writer.flush().map_err(|err| io_error("template.write", err, path))
}

/// Rows of a template plate table, wells numbered row-wise from 1.
pub fn template_plate_rows(plate: &str) -> Vec<Vec<String>> {
    let mut header = vec![String::new()];
    header.extend((1..=PLATE_COLUMNS).map(|column| column.to_string()));
    let mut rows = vec![header];
    let columns = PLATE_COLUMNS as usize;
    for (row_index, row) in PLATE_ROWS.iter().enumerate() {
        let mut cells = vec![row.to_string()];
        cells.extend((1..=columns).map(|column| {
            let well = row_index * columns + column;
            format!("EXAMPLE_{plate}_Well_{well}.R1.T0")
        }));
        rows.push(cells);
    }
    rows
}

/// Writes a template manifest folder.
///
/// An existing folder is left untouched unless `overwrite` is set.
pub fn write_template(folder: &Path, overwrite: bool) -> Result<(), HplcError> {
    if folder.exists() && !overwrite {
        return Err(HplcError::Io(
            ErrorInfo::new("template.exists", "template folder already exists")
                .with_context("path", folder.display().to_string())
                .with_hint("choose another folder or pass --force"),
        ));
    }
    let plates_dir = folder.join(PLATES_DIR);
    fs::create_dir_all(&plates_dir).map_err(|err| io_error("template.create", err, &plates_dir))?;

    let vials: Vec<Vec<String>> = template_vials().into_iter().map(|id| vec![id]).collect();
    write_table(&folder.join(VIAL_TABLE_NAMES[0]), &vials)?;
    for plate in TEMPLATE_PLATES {
        let path = plates_dir.join(format!("PLATE_EXAMPLE_{plate}.csv"));
        write_table(&path, &template_plate_rows(plate))?;
    }
    info!("created template manifest folder at {}", folder.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vials_list_standards_first() {
        let vials = template_vials();
        assert_eq!(vials.len(), 15);
        assert_eq!(vials[0], "STD_EXAMPLE_1.R1.T0");
        assert_eq!(vials[5], "VIAL_EXAMPLE_1.R1.T0");
        assert_eq!(vials[14], "OMIT_EXAMPLE_5.R1.T0");
    }

    #[test]
    fn plate_wells_number_row_wise() {
        let rows = template_plate_rows("B");
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0][12], "12");
        assert_eq!(rows[1][1], "EXAMPLE_B_Well_1.R1.T0");
        assert_eq!(rows[2][1], "EXAMPLE_B_Well_13.R1.T0");
        assert_eq!(rows[8][12], "EXAMPLE_B_Well_96.R1.T0");
    }
}
