//! Tab-separated injection table consumed by the chromatography data system.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use hplc_core::errors::{ErrorInfo, HplcError};
use hplc_core::InjectionRecord;

/// Column headers of the sequence table, in order.
pub const SEQUENCE_COLUMNS: [&str; 7] = [
    "ED_1",
    "Name",
    "Type",
    "Level",
    "Position",
    "Volume [ul]",
    "Instrument Method",
];

fn write_error(err: impl ToString) -> HplcError {
    HplcError::Io(ErrorInfo::new("sequence.write", err.to_string()))
}

/// File name of the sequence table for a manifest folder name.
pub fn sequence_file_name(manifest_name: &str) -> String {
    format!("sample_sequence_{manifest_name}.txt")
}

/// Renders a volume the way the sequence table expects it (`25.0`, `12.5`).
pub fn format_volume(volume: f64) -> String {
    if volume.fract() == 0.0 {
        format!("{volume:.1}")
    } else {
        volume.to_string()
    }
}

/// Writes the injection table to any writer.
pub fn write_sequence_to<W: Write>(
    writer: W,
    records: &[InjectionRecord],
) -> Result<(), HplcError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);
    wtr.write_record(SEQUENCE_COLUMNS).map_err(write_error)?;
    for record in records {
        wtr.write_record([
            InjectionRecord::DETECTOR,
            record.name.as_str(),
            InjectionRecord::INJECTION_TYPE,
            InjectionRecord::LEVEL,
            record.position.as_str(),
            format_volume(record.volume).as_str(),
            record.instrument_method.as_str(),
        ])
        .map_err(write_error)?;
    }
    wtr.flush().map_err(write_error)
}

/// Writes the injection table to `path`.
pub fn write_sequence(path: &Path, records: &[InjectionRecord]) -> Result<(), HplcError> {
    let file = File::create(path).map_err(|err| {
        HplcError::Io(
            ErrorInfo::new("sequence.create", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    write_sequence_to(file, records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volumes_keep_a_decimal_point() {
        assert_eq!(format_volume(25.0), "25.0");
        assert_eq!(format_volume(12.5), "12.5");
    }
}
