//! Sample identifier canonicalisation.
//!
//! Non-standard identifiers are rewritten as `{prefix}{number:05}` followed by
//! the biological replicate (`.R{n}`) and timepoint (`.T{n}`) segments so that
//! plain lexicographic ordering groups samples by prefix and number. Standards
//! keep the text the operator chose.

use std::fmt::{self, Display};

use hplc_core::errors::{ErrorInfo, HplcError};
use log::warn;
use serde::{Deserialize, Serialize};

/// Width of the zero-padded numeric part.
pub const NUMBER_WIDTH: usize = 5;

/// Structured form of a manifest identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CanonicalIdentifier {
    /// Blank manifest cell; never injected.
    Empty,
    /// Standard or reference sample, kept verbatim up to the first `.`.
    Standard {
        /// Text before the first `.` of the identifier.
        base: String,
    },
    /// Regular sample parsed into its components.
    Sample {
        /// Every non-digit character of the first segment.
        prefix: String,
        /// Every digit of the first segment, read as an integer.
        number: u64,
        /// Biological replicate from an `R<digits>` segment.
        replicate: Option<u32>,
        /// Timepoint from a `T<digits>` segment.
        timepoint: Option<u32>,
    },
    /// Identifier that could not be parsed; the text is kept unmodified.
    Verbatim {
        /// Original identifier.
        text: String,
    },
}

/// Whether a name designates a standard (`std...` or `standard...`, any case).
pub fn is_standard_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.starts_with("std") || lower.starts_with("standard")
}

/// Parses a raw manifest identifier.
///
/// Never fails: identifiers that cannot be parsed are logged and returned as
/// [`CanonicalIdentifier::Verbatim`].
pub fn canonicalize(raw: &str) -> CanonicalIdentifier {
    if raw.trim().is_empty() {
        return CanonicalIdentifier::Empty;
    }
    if is_standard_name(raw) {
        let base = raw.split('.').next().unwrap_or(raw);
        return CanonicalIdentifier::Standard {
            base: base.to_string(),
        };
    }
    match parse_sample(raw) {
        Ok(identifier) => identifier,
        Err(err) => {
            warn!("keeping sample name {raw:?} unmodified: {err}");
            CanonicalIdentifier::Verbatim {
                text: raw.to_string(),
            }
        }
    }
}

fn naming_error(raw: &str, code: &str, message: impl Into<String>) -> HplcError {
    HplcError::Naming(ErrorInfo::new(code, message).with_context("identifier", raw))
}

fn parse_sample(raw: &str) -> Result<CanonicalIdentifier, HplcError> {
    let mut segments = raw.split('.');
    let name = segments.next().unwrap_or_default();
    let prefix: String = name.chars().filter(|c| !c.is_ascii_digit()).collect();
    let digits: String = name.chars().filter(|c| c.is_ascii_digit()).collect();
    let number = if digits.is_empty() {
        0
    } else {
        digits
            .parse::<u64>()
            .map_err(|err| naming_error(raw, "naming.number", err.to_string()))?
    };

    let mut replicate = None;
    let mut timepoint = None;
    for segment in segments {
        if let Some(value) = tagged_index(segment, 'R') {
            replicate = Some(parse_index(raw, value)?);
        } else if let Some(value) = tagged_index(segment, 'T') {
            timepoint = Some(parse_index(raw, value)?);
        }
    }

    Ok(CanonicalIdentifier::Sample {
        prefix,
        number,
        replicate,
        timepoint,
    })
}

/// Returns the digits of a `{tag}<digits>` segment.
fn tagged_index(segment: &str, tag: char) -> Option<&str> {
    let digits = segment.strip_prefix(tag)?;
    let all_digits = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
    all_digits.then_some(digits)
}

fn parse_index(raw: &str, digits: &str) -> Result<u32, HplcError> {
    digits
        .parse::<u32>()
        .map_err(|err| naming_error(raw, "naming.index", err.to_string()))
}

impl CanonicalIdentifier {
    /// Whether the identifier names a standard.
    pub fn is_standard(&self) -> bool {
        matches!(self, CanonicalIdentifier::Standard { .. })
    }

    /// Renders the display name, appending `.TR{technical_replicate}` when it is positive.
    pub fn render(&self, technical_replicate: usize) -> String {
        let mut name = match self {
            CanonicalIdentifier::Empty => return String::new(),
            CanonicalIdentifier::Standard { base } => base.clone(),
            CanonicalIdentifier::Verbatim { text } => text.clone(),
            CanonicalIdentifier::Sample {
                prefix,
                number,
                replicate,
                timepoint,
            } => {
                let mut name = format!("{prefix}{number:0width$}", width = NUMBER_WIDTH);
                if let Some(replicate) = replicate {
                    name.push_str(&format!(".R{replicate}"));
                }
                if let Some(timepoint) = timepoint {
                    name.push_str(&format!(".T{timepoint}"));
                }
                name
            }
        };
        if technical_replicate > 0 {
            name.push_str(&format!(".TR{technical_replicate}"));
        }
        name
    }
}

impl Display for CanonicalIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_number_and_keeps_replicate_segments() {
        let id = canonicalize("A7.R1.T0");
        assert_eq!(
            id,
            CanonicalIdentifier::Sample {
                prefix: "A".into(),
                number: 7,
                replicate: Some(1),
                timepoint: Some(0),
            }
        );
        assert_eq!(id.render(0), "A00007.R1.T0");
        assert_eq!(id.render(2), "A00007.R1.T0.TR2");
    }

    #[test]
    fn segment_order_is_normalised() {
        assert_eq!(canonicalize("B12.T3.R2").render(0), "B00012.R2.T3");
    }

    #[test]
    fn unknown_segments_are_dropped() {
        assert_eq!(canonicalize("C5.extra.R1").render(1), "C00005.R1.TR1");
    }

    #[test]
    fn missing_number_defaults_to_zero() {
        assert_eq!(canonicalize("blank").render(0), "blank00000");
    }

    #[test]
    fn standards_keep_their_text() {
        let id = canonicalize("STD_10uM.R1");
        assert!(id.is_standard());
        assert_eq!(id.render(0), "STD_10uM");
        assert_eq!(id.render(3), "STD_10uM.TR3");
        assert!(canonicalize("Standard_X").is_standard());
        assert!(canonicalize("std1").is_standard());
    }

    #[test]
    fn oversized_number_falls_back_to_verbatim() {
        let raw = "S123456789012345678901234";
        let id = canonicalize(raw);
        assert_eq!(
            id,
            CanonicalIdentifier::Verbatim {
                text: raw.to_string()
            }
        );
        assert_eq!(id.render(0), raw);
        assert_eq!(id.render(1), format!("{raw}.TR1"));
    }

    #[test]
    fn blank_identifier_is_empty() {
        assert_eq!(canonicalize(""), CanonicalIdentifier::Empty);
        assert_eq!(canonicalize("   "), CanonicalIdentifier::Empty);
        assert_eq!(canonicalize("").render(2), "");
    }

    #[test]
    fn technical_replicate_segment_is_not_a_timepoint() {
        let id = canonicalize("A00001.R1.T0.TR2");
        assert_eq!(id.render(0), "A00001.R1.T0");
    }
}
