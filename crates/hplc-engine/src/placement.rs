//! Assignment of trays and wells to manifest entries.

use std::collections::BTreeMap;

use hplc_core::errors::{ErrorInfo, HplcError};
use hplc_core::{
    CellContent, PlacedSample, PlateGrid, RawSample, TrayAssignment, TrayGroup, TrayLabel,
    WellPosition, VIAL_TRAY_CAPACITY,
};
use log::debug;
use serde::{Deserialize, Serialize};

/// Placed samples together with the tray each plate or vial chunk occupies.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Placement {
    /// Samples with their tray, well and loading pass.
    pub samples: Vec<PlacedSample>,
    /// One entry per plate or vial chunk.
    pub trays: Vec<TrayAssignment>,
}

fn empty_pool(pool: &str, needed: usize) -> HplcError {
    HplcError::Config(
        ErrorInfo::new(
            "placement.pool_empty",
            format!("no trays left for {pool} after splitting the tray list"),
        )
        .with_context("pool", pool)
        .with_context("needed_by", needed.to_string())
        .with_hint("adjust plate_tray_number or add tray labels"),
    )
}

/// Places vial samples in manifest order, 40 per tray, reusing trays round-robin.
///
/// Chunk `i` lands on `vial_trays[i % len]` in loading pass `i / len`.
pub fn assign_vials(
    samples: &[RawSample],
    vial_trays: &[TrayLabel],
) -> Result<Placement, HplcError> {
    if samples.is_empty() {
        return Ok(Placement::default());
    }
    if vial_trays.is_empty() {
        return Err(empty_pool("vials", samples.len()));
    }

    let mut placement = Placement {
        samples: Vec::with_capacity(samples.len()),
        trays: Vec::new(),
    };
    for (chunk_index, chunk) in samples.chunks(VIAL_TRAY_CAPACITY).enumerate() {
        let tray = &vial_trays[chunk_index % vial_trays.len()];
        let pass = chunk_index / vial_trays.len();
        debug!(
            "vial chunk {chunk_index}: {} samples on tray {tray} (pass {pass})",
            chunk.len()
        );
        placement.trays.push(TrayAssignment {
            group: TrayGroup::Vial { chunk: chunk_index },
            tray: tray.clone(),
            pass,
        });
        let slots = (0..).map_while(WellPosition::vial_slot);
        for (sample, well) in chunk.iter().zip(slots) {
            placement.samples.push(PlacedSample {
                sample: sample.clone(),
                tray: tray.clone(),
                well,
                pass,
            });
        }
    }
    Ok(placement)
}

/// Places every text cell of a plate on the given tray; blank and numeric cells are skipped.
pub fn assign_plate(grid: &PlateGrid, tray: &TrayLabel, pass: usize) -> Vec<PlacedSample> {
    grid.cells
        .iter()
        .filter_map(|cell| match &cell.content {
            CellContent::Text(text) => Some(PlacedSample {
                sample: RawSample::plate(text.clone(), grid.name.clone(), cell.well),
                tray: tray.clone(),
                well: cell.well,
                pass,
            }),
            CellContent::Empty | CellContent::Number(_) => None,
        })
        .collect()
}

/// Places plates in order, one tray per plate, cycling through the plate pool.
pub fn assign_plates(
    grids: &[PlateGrid],
    plate_trays: &[TrayLabel],
) -> Result<Placement, HplcError> {
    if grids.is_empty() {
        return Ok(Placement::default());
    }
    if plate_trays.is_empty() {
        return Err(empty_pool("plates", grids.len()));
    }

    let mut placement = Placement::default();
    for (plate_index, grid) in grids.iter().enumerate() {
        let tray = &plate_trays[plate_index % plate_trays.len()];
        let pass = plate_index / plate_trays.len();
        let placed = assign_plate(grid, tray, pass);
        debug!(
            "plate {}: {} samples on tray {tray} (pass {pass})",
            grid.name,
            placed.len()
        );
        placement.trays.push(TrayAssignment {
            group: TrayGroup::Plate {
                name: grid.name.clone(),
            },
            tray: tray.clone(),
            pass,
        });
        placement.samples.extend(placed);
    }
    Ok(placement)
}

/// Checks that no two samples occupy the same well of the same tray in the same pass.
///
/// `OMIT` entries hold their well like any other sample.
pub fn check_unique_wells(samples: &[PlacedSample]) -> Result<(), HplcError> {
    let mut occupied: BTreeMap<(&TrayLabel, usize, WellPosition), &str> = BTreeMap::new();
    for placed in samples {
        let key = (&placed.tray, placed.pass, placed.well);
        if let Some(previous) = occupied.insert(key, placed.sample.identifier.as_str()) {
            return Err(HplcError::Manifest(
                ErrorInfo::new("placement.well_collision", "two samples share one well")
                    .with_context("tray", placed.tray.as_str())
                    .with_context("pass", placed.pass.to_string())
                    .with_context("well", placed.well.to_string())
                    .with_context("first", previous)
                    .with_context("second", placed.sample.identifier.as_str()),
            ));
        }
    }
    Ok(())
}
