//! End-to-end sequence build over one manifest snapshot.

use hplc_core::errors::HplcError;
use hplc_core::{InjectionRecord, Manifest, PlacedSample, RunConfig, TrayAssignment};
use log::info;
use serde::{Deserialize, Serialize};

use crate::assemble::assemble;
use crate::interleave::{interleave_standards, is_standard_record};
use crate::placement::{assign_plates, assign_vials, check_unique_wells};
use crate::replicate::expand_all;

/// Everything a sequence build produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceRun {
    /// Final injection table in run order.
    pub records: Vec<InjectionRecord>,
    /// Vial samples with their trays and wells.
    pub vials: Vec<PlacedSample>,
    /// Plate samples with their trays and wells.
    pub plates: Vec<PlacedSample>,
    /// Tray used by each plate and vial chunk.
    pub trays: Vec<TrayAssignment>,
    /// Number of standard injections in one standards block.
    pub standards_per_block: usize,
}

impl SequenceRun {
    /// Placed samples whose identifier starts with `OMIT`.
    pub fn omitted(&self) -> impl Iterator<Item = &PlacedSample> {
        self.vials
            .iter()
            .chain(self.plates.iter())
            .filter(|placed| placed.sample.is_omitted())
    }
}

/// Builds the injection sequence for a manifest.
///
/// Configuration problems surface before any record is produced.
pub fn build_sequence(manifest: &Manifest, config: &RunConfig) -> Result<SequenceRun, HplcError> {
    config.validate()?;
    let pools = config.tray_pools();

    let vial_placement = assign_vials(&manifest.vials, &pools.vials)?;
    let plate_placement = assign_plates(&manifest.plates, &pools.plates)?;
    check_unique_wells(&vial_placement.samples)?;
    check_unique_wells(&plate_placement.samples)?;
    info!(
        "placed {} vial entries and {} plate entries from {} plates",
        vial_placement.samples.len(),
        plate_placement.samples.len(),
        manifest.plates.len()
    );

    let vial_injections = expand_all(&vial_placement.samples, config.technical_replicates);
    let plate_injections = expand_all(&plate_placement.samples, config.technical_replicates);
    let sorted = assemble(vial_injections, plate_injections, config)?;
    let standards_per_block = sorted.iter().filter(|r| is_standard_record(r)).count();
    let records = interleave_standards(sorted, config.standard_repeats)?;
    info!(
        "built {} injections ({} standards per block, {} blocks)",
        records.len(),
        standards_per_block,
        config.standard_repeats
    );

    let mut trays = vial_placement.trays;
    trays.extend(plate_placement.trays);
    Ok(SequenceRun {
        records,
        vials: vial_placement.samples,
        plates: plate_placement.samples,
        trays,
        standards_per_block,
    })
}
