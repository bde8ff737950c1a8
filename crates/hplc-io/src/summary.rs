//! Machine-readable run summary written next to the sequence table.

use std::fs;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use hplc_core::errors::HplcError;
use hplc_core::{RunConfig, RunProvenance, SchemaVersion, SourceKind, TrayAssignment};
use hplc_engine::SequenceRun;
use serde::{Deserialize, Serialize};

use crate::hash::stable_hash_string;
use crate::manifest::{LoadedManifest, SkippedPlate};
use crate::output::io_error;
use crate::serde::to_canonical_json_bytes;

/// File name of the summary inside the output folder.
pub const SUMMARY_FILE_NAME: &str = "run_summary.json";

/// Entry and injection counts of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounts {
    /// Vial table rows, blank and omitted rows included.
    pub vial_entries: usize,
    /// Text cells across all plates.
    pub plate_entries: usize,
    /// Plates read.
    pub plates: usize,
    /// Entries holding a slot without being injected.
    pub omitted: usize,
    /// Injections drawn from vials.
    pub vial_injections: usize,
    /// Injections drawn from plates.
    pub plate_injections: usize,
    /// Rows of the sequence table.
    pub injections: usize,
}

/// Summary of one sequence build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Schema of this document.
    pub schema_version: SchemaVersion,
    /// Hashes, timestamp and tool version.
    pub provenance: RunProvenance,
    /// Configuration the run was built with.
    pub config: RunConfig,
    /// Entry and injection counts.
    pub counts: RunCounts,
    /// Standard injections per standards block.
    pub standards_per_block: usize,
    /// Tray used by each plate and vial chunk.
    pub trays: Vec<TrayAssignment>,
    /// Plate tables left out of the run.
    pub skipped_plates: Vec<SkippedPlate>,
}

impl RunSummary {
    /// Collects the summary of a finished run.
    pub fn new(
        loaded: &LoadedManifest,
        config: &RunConfig,
        run: &SequenceRun,
    ) -> Result<Self, HplcError> {
        let injections_from = |kind: SourceKind| {
            run.records
                .iter()
                .filter(|record| record.origin == kind)
                .count()
        };
        let provenance = RunProvenance {
            manifest_hash: loaded.content_hash.clone(),
            config_hash: stable_hash_string(config)?,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        };
        Ok(Self {
            schema_version: SchemaVersion::default(),
            provenance,
            config: config.clone(),
            counts: RunCounts {
                vial_entries: run.vials.len(),
                plate_entries: run.plates.len(),
                plates: loaded.manifest.plates.len(),
                omitted: run.omitted().count(),
                vial_injections: injections_from(SourceKind::Vial),
                plate_injections: injections_from(SourceKind::Plate),
                injections: run.records.len(),
            },
            standards_per_block: run.standards_per_block,
            trays: run.trays.clone(),
            skipped_plates: loaded.skipped_plates.clone(),
        })
    }
}

/// Writes the summary as canonical JSON.
pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<(), HplcError> {
    let bytes = to_canonical_json_bytes(summary)?;
    fs::write(path, bytes).map_err(|err| io_error("summary.write", err, path))
}
