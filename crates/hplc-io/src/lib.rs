#![deny(missing_docs)]
#![doc = "Manifest folder reader and artefact writers for the HPLC sequence writer."]

/// Orchestration from manifest folder to output folder.
pub mod generate;
/// Content hashing helpers.
pub mod hash;
/// Vials and plate table parsing.
pub mod manifest;
/// Output folder helpers.
pub mod output;
/// Autosampler loading protocol.
pub mod protocol;
/// Sequence table export.
pub mod sequence;
/// Canonical JSON serde helpers.
pub mod serde;
/// Run summary document.
pub mod summary;
/// Template manifest folder.
pub mod template;

pub use generate::{generate, GenerateRequest, GeneratedArtifacts};
pub use manifest::{load_manifest, LoadedManifest, SkippedPlate};
pub use output::{default_output_dir, prepare_output_dir};
pub use protocol::{render_loading_protocol, write_loading_protocol};
pub use sequence::{sequence_file_name, write_sequence, write_sequence_to};
pub use summary::{write_summary, RunCounts, RunSummary};
pub use template::{write_template, DEFAULT_TEMPLATE_FOLDER};
