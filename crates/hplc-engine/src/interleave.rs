//! Periodic re-insertion of the standards block.

use hplc_core::errors::{ErrorInfo, HplcError};
use hplc_core::InjectionRecord;
use log::debug;

/// Substring marking a standard in a rendered injection name.
pub const STANDARD_MARKER: &str = "STD";

/// Whether an injection belongs to the standards block (case-sensitive `STD` match).
pub fn is_standard_record(record: &InjectionRecord) -> bool {
    record.name.contains(STANDARD_MARKER)
}

/// Offsets at which the standards block is spliced in, relative to the list
/// as it stands at the time of each insertion.
pub fn insertion_offsets(insertions: usize, interval: usize) -> Vec<usize> {
    (0..insertions).map(|i| i * interval).collect()
}

/// Re-inserts every standard so the standards block appears `standard_repeats`
/// times in total.
///
/// The first of the `standard_repeats - 1` extra copies goes to the front. The
/// interval is computed once from the sorted input, but each copy is spliced
/// into the already grown list, so later copies drift right by the size of
/// every earlier insertion.
pub fn interleave_standards(
    records: Vec<InjectionRecord>,
    standard_repeats: usize,
) -> Result<Vec<InjectionRecord>, HplcError> {
    if standard_repeats == 0 {
        return Err(HplcError::Config(
            ErrorInfo::new(
                "interleave.standard_repeats",
                "standard repeat count must be at least 1",
            )
            .with_context("standard_repeats", "0"),
        ));
    }
    let insertions = standard_repeats - 1;
    let standards: Vec<InjectionRecord> = records
        .iter()
        .filter(|record| is_standard_record(record))
        .cloned()
        .collect();
    if insertions == 0 || standards.is_empty() {
        return Ok(records);
    }

    let interval = records.len() / insertions;
    let mut sequence = records;
    sequence.reserve(insertions * standards.len());
    for offset in insertion_offsets(insertions, interval) {
        debug!(
            "inserting {} standards at row {offset} of {}",
            standards.len(),
            sequence.len()
        );
        let tail = sequence.split_off(offset);
        sequence.extend(standards.iter().cloned());
        sequence.extend(tail);
    }
    Ok(sequence)
}
