//! Merge, sort and finalisation of injection records.

use hplc_core::errors::{ErrorInfo, HplcError};
use hplc_core::{InjectionRecord, PlacedSample, RunConfig, SourceKind};

use crate::replicate::ReplicateInjection;

/// Autosampler position code of a placed sample.
///
/// Vials use the full tray label (`B` + `A1` = `BA1`); plates use the first
/// character of the tray label and the integer column (`RH12`).
pub fn position_code(placed: &PlacedSample) -> Result<String, HplcError> {
    match placed.kind() {
        SourceKind::Vial => Ok(format!(
            "{}{}{}",
            placed.tray, placed.well.row, placed.well.column
        )),
        SourceKind::Plate => {
            let tray = placed.tray.first_char().ok_or_else(|| {
                HplcError::Config(
                    ErrorInfo::new("assemble.tray_label_empty", "plate tray label is empty")
                        .with_context("sample", placed.sample.identifier.as_str()),
                )
            })?;
            Ok(format!("{tray}{}{}", placed.well.row, placed.well.column))
        }
    }
}

/// Instrument method for an injection of the given origin.
pub fn instrument_method(config: &RunConfig, origin: SourceKind) -> &str {
    match origin {
        SourceKind::Vial => config.method_for_vial(),
        SourceKind::Plate => &config.instrument_method,
    }
}

/// Concatenates vial and plate injections, sorts them by name and builds the table rows.
///
/// The sort is stable: equal names keep vial-before-plate, manifest order.
pub fn assemble(
    vial_injections: Vec<ReplicateInjection<'_>>,
    plate_injections: Vec<ReplicateInjection<'_>>,
    config: &RunConfig,
) -> Result<Vec<InjectionRecord>, HplcError> {
    let mut injections = vial_injections;
    injections.extend(plate_injections);
    injections.sort_by(|a, b| a.name.cmp(&b.name));

    injections
        .into_iter()
        .map(|injection| {
            let origin = injection.sample.kind();
            Ok(InjectionRecord {
                position: position_code(injection.sample)?,
                volume: config.injection_volume,
                instrument_method: instrument_method(config, origin).to_string(),
                origin,
                name: injection.name,
            })
        })
        .collect()
}
