#![deny(missing_docs)]
//! Placement, naming and ordering engine turning a sample manifest into an
//! autosampler injection sequence.

pub mod assemble;
pub mod interleave;
pub mod naming;
pub mod pipeline;
pub mod placement;
pub mod replicate;

pub use assemble::{assemble, instrument_method, position_code};
pub use interleave::{insertion_offsets, interleave_standards, is_standard_record};
pub use naming::{canonicalize, is_standard_name, CanonicalIdentifier};
pub use pipeline::{build_sequence, SequenceRun};
pub use placement::{assign_plate, assign_plates, assign_vials, check_unique_wells, Placement};
pub use replicate::{expand, expand_all, replicate_count, ReplicateInjection};
