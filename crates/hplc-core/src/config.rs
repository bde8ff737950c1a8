//! Run configuration loaded from YAML and overridden from the command line.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{config_error, ErrorInfo, HplcError};
use crate::types::TrayLabel;

/// YAML-configurable parameters governing one sequence build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Instrument method used for every injection unless overridden for vials.
    #[serde(default = "default_instrument_method")]
    pub instrument_method: String,
    /// Instrument method for vial injections; plates keep `instrument_method`.
    #[serde(default)]
    pub vial_instrument_method: Option<String>,
    /// Injection volume in microlitres.
    #[serde(default = "default_injection_volume")]
    pub injection_volume: f64,
    /// Number of trays at the front of `trays` reserved for 96-well plates.
    #[serde(default = "default_plate_tray_number")]
    pub plate_tray_number: usize,
    /// Total number of times the standards block appears in the run.
    #[serde(default = "default_standard_repeats")]
    pub standard_repeats: usize,
    /// Ordered tray colour codes available in the autosampler.
    #[serde(default = "default_trays")]
    pub trays: Vec<TrayLabel>,
    /// Injections per non-standard sample.
    #[serde(default = "default_technical_replicates")]
    pub technical_replicates: usize,
}

fn default_instrument_method() -> String {
    "MS_Catecholamine_Iso_col25".to_string()
}

fn default_injection_volume() -> f64 {
    25.0
}

fn default_plate_tray_number() -> usize {
    2
}

fn default_standard_repeats() -> usize {
    5
}

fn default_trays() -> Vec<TrayLabel> {
    ["R", "G", "B"].into_iter().map(TrayLabel::from).collect()
}

fn default_technical_replicates() -> usize {
    2
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            instrument_method: default_instrument_method(),
            vial_instrument_method: None,
            injection_volume: default_injection_volume(),
            plate_tray_number: default_plate_tray_number(),
            standard_repeats: default_standard_repeats(),
            trays: default_trays(),
            technical_replicates: default_technical_replicates(),
        }
    }
}

/// Disjoint tray pools derived from [`RunConfig::trays`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrayPools {
    /// Trays serving 96-well plates.
    pub plates: Vec<TrayLabel>,
    /// Trays serving vials.
    pub vials: Vec<TrayLabel>,
}

impl RunConfig {
    /// Checks the configuration for values that cannot produce a sequence.
    pub fn validate(&self) -> Result<(), HplcError> {
        if self.trays.is_empty() {
            return Err(HplcError::Config(
                ErrorInfo::new("config.trays_empty", "at least one tray label is required")
                    .with_hint("pass tray colour codes, e.g. R G B"),
            ));
        }
        let mut seen = BTreeSet::new();
        for tray in &self.trays {
            if tray.as_str().trim().is_empty() {
                return Err(config_error("config.tray_label_empty", "tray labels must not be empty"));
            }
            if !seen.insert(tray.as_str()) {
                return Err(HplcError::Config(
                    ErrorInfo::new("config.tray_label_duplicate", "tray labels must be unique")
                        .with_context("tray", tray.as_str()),
                ));
            }
        }
        if self.standard_repeats == 0 {
            return Err(HplcError::Config(
                ErrorInfo::new(
                    "config.standard_repeats",
                    "standard repeat count must be at least 1",
                )
                .with_hint("use 1 to keep standards only where they sort naturally"),
            ));
        }
        if self.technical_replicates == 0 {
            return Err(config_error(
                "config.technical_replicates",
                "technical replicate count must be at least 1",
            ));
        }
        if !self.injection_volume.is_finite() || self.injection_volume <= 0.0 {
            return Err(HplcError::Config(
                ErrorInfo::new("config.injection_volume", "injection volume must be positive")
                    .with_context("value", self.injection_volume.to_string()),
            ));
        }
        Ok(())
    }

    /// Splits the tray list: the first `plate_tray_number` labels serve plates, the rest vials.
    pub fn tray_pools(&self) -> TrayPools {
        let split = self.plate_tray_number.min(self.trays.len());
        TrayPools {
            plates: self.trays[..split].to_vec(),
            vials: self.trays[split..].to_vec(),
        }
    }

    /// Instrument method for vial injections, falling back to the run default.
    pub fn method_for_vial(&self) -> &str {
        self.vial_instrument_method
            .as_deref()
            .unwrap_or(&self.instrument_method)
    }
}

/// Loads a run configuration from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RunConfig, HplcError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| {
        HplcError::Io(
            ErrorInfo::new("config_read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    serde_yaml::from_slice(&bytes).map_err(|err| {
        HplcError::Serde(
            ErrorInfo::new("config_yaml", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pools_split_front_for_plates() {
        let pools = RunConfig::default().tray_pools();
        assert_eq!(pools.plates, vec![TrayLabel::from("R"), TrayLabel::from("G")]);
        assert_eq!(pools.vials, vec![TrayLabel::from("B")]);
    }

    #[test]
    fn oversized_plate_share_empties_vial_pool() {
        let config = RunConfig {
            plate_tray_number: 7,
            ..RunConfig::default()
        };
        let pools = config.tray_pools();
        assert_eq!(pools.plates.len(), 3);
        assert!(pools.vials.is_empty());
    }
}
