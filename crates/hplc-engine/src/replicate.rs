//! Fan-out of placed samples into technical-replicate injections.

use hplc_core::PlacedSample;
use log::debug;

use crate::naming::{canonicalize, CanonicalIdentifier};

/// One technical-replicate injection of a placed sample, before position and
/// method are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicateInjection<'a> {
    /// Rendered name including the `.TR{n}` suffix.
    pub name: String,
    /// Technical replicate number, starting at 1.
    pub replicate: usize,
    /// Sample the injection is drawn from.
    pub sample: &'a PlacedSample,
}

/// Number of injections for a sample: 1 for standards, `technical_replicates` otherwise.
pub fn replicate_count(canonical: &CanonicalIdentifier, technical_replicates: usize) -> usize {
    if canonical.is_standard() {
        1
    } else {
        technical_replicates
    }
}

/// Expands a placed sample into its injections.
///
/// `OMIT` entries and blank cells produce nothing; their well stays reserved.
pub fn expand(sample: &PlacedSample, technical_replicates: usize) -> Vec<ReplicateInjection<'_>> {
    if sample.sample.is_omitted() {
        debug!(
            "omitting {} at {}{}",
            sample.sample.identifier, sample.tray, sample.well
        );
        return Vec::new();
    }
    if sample.sample.is_blank() {
        return Vec::new();
    }
    let canonical = canonicalize(&sample.sample.identifier);
    (1..=replicate_count(&canonical, technical_replicates))
        .map(|replicate| ReplicateInjection {
            name: canonical.render(replicate),
            replicate,
            sample,
        })
        .collect()
}

/// Expands every sample in order.
pub fn expand_all(
    samples: &[PlacedSample],
    technical_replicates: usize,
) -> Vec<ReplicateInjection<'_>> {
    samples
        .iter()
        .flat_map(|sample| expand(sample, technical_replicates))
        .collect()
}

#[cfg(test)]
mod tests {
    use hplc_core::{RawSample, TrayLabel, WellPosition};

    use super::*;

    fn placed(identifier: &str) -> PlacedSample {
        PlacedSample {
            sample: RawSample::vial(identifier),
            tray: TrayLabel::from("B"),
            well: WellPosition::new('A', 1),
            pass: 0,
        }
    }

    #[test]
    fn regular_samples_get_configured_replicates() {
        let sample = placed("A1.R1.T0");
        let names: Vec<_> = expand(&sample, 3).into_iter().map(|inj| inj.name).collect();
        assert_eq!(
            names,
            vec!["A00001.R1.T0.TR1", "A00001.R1.T0.TR2", "A00001.R1.T0.TR3"]
        );
    }

    #[test]
    fn standards_are_injected_once() {
        let sample = placed("STD1");
        let injections = expand(&sample, 4);
        assert_eq!(injections.len(), 1);
        assert_eq!(injections[0].name, "STD1.TR1");
        assert_eq!(injections[0].replicate, 1);
        assert_eq!(replicate_count(&canonicalize("standard_a"), 4), 1);
        assert_eq!(replicate_count(&canonicalize("A1"), 4), 4);
    }

    #[test]
    fn omitted_and_blank_entries_are_skipped() {
        assert!(expand(&placed("OMIT_x"), 2).is_empty());
        assert!(expand(&placed(""), 2).is_empty());
    }
}
