//! Manifest folder to output folder, end to end.

use std::path::PathBuf;

use hplc_core::errors::HplcError;
use hplc_core::RunConfig;
use hplc_engine::{build_sequence, SequenceRun};
use log::info;

use crate::manifest::load_manifest;
use crate::output::{default_output_dir, folder_name, prepare_output_dir};
use crate::protocol::{write_loading_protocol, PROTOCOL_FILE_NAME};
use crate::sequence::{sequence_file_name, write_sequence};
use crate::summary::{write_summary, RunSummary, SUMMARY_FILE_NAME};

/// Where a generation run reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Manifest folder.
    pub folder: PathBuf,
    /// Output folder; `<folder>_output` when unset.
    pub output: Option<PathBuf>,
    /// Reuse an existing output folder.
    pub force: bool,
}

/// Paths of the written artefacts together with the built run.
#[derive(Debug, Clone)]
pub struct GeneratedArtifacts {
    /// Output folder.
    pub output_dir: PathBuf,
    /// Sequence table.
    pub sequence: PathBuf,
    /// Loading protocol.
    pub protocol: PathBuf,
    /// Run summary.
    pub summary_path: PathBuf,
    /// Summary as written.
    pub summary: RunSummary,
    /// The built sequence.
    pub run: SequenceRun,
}

/// Reads the manifest folder, builds the sequence and writes every artefact.
///
/// Nothing is written when the manifest or the configuration is rejected.
pub fn generate(
    request: &GenerateRequest,
    config: &RunConfig,
) -> Result<GeneratedArtifacts, HplcError> {
    let loaded = load_manifest(&request.folder)?;
    let run = build_sequence(&loaded.manifest, config)?;
    let summary = RunSummary::new(&loaded, config, &run)?;

    let output_dir = request
        .output
        .clone()
        .unwrap_or_else(|| default_output_dir(&request.folder));
    prepare_output_dir(&output_dir, request.force)?;

    let manifest_name = folder_name(&request.folder).unwrap_or_else(|| "manifest".to_string());
    let sequence = output_dir.join(sequence_file_name(&manifest_name));
    let protocol = output_dir.join(PROTOCOL_FILE_NAME);
    let summary_path = output_dir.join(SUMMARY_FILE_NAME);
    write_sequence(&sequence, &run.records)?;
    write_loading_protocol(&protocol, &run)?;
    write_summary(&summary_path, &summary)?;
    info!(
        "wrote {} injections to {}",
        run.records.len(),
        sequence.display()
    );

    Ok(GeneratedArtifacts {
        output_dir,
        sequence,
        protocol,
        summary_path,
        summary,
        run,
    })
}
