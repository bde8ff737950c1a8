#![deny(missing_docs)]
#![doc = "Core types, run configuration and error surface for the HPLC sequence writer."]

pub mod config;
pub mod errors;
pub mod provenance;
mod types;

pub use config::{load_config, RunConfig, TrayPools};
pub use errors::{config_error, ErrorInfo, HplcError};
pub use provenance::{RunProvenance, SchemaVersion};
pub use types::{
    CellContent, InjectionRecord, Manifest, PlacedSample, PlateCell, PlateGrid, RawSample,
    SampleSource, SourceKind, TrayAssignment, TrayGroup, TrayLabel, WellPosition, OMIT_MARKER,
    PLATE_COLUMNS, PLATE_ROWS, VIAL_COLUMNS, VIAL_ROWS, VIAL_TRAY_CAPACITY,
};
