//! Recoverable conditions raised while rendering a line.
//!
//! The engine never fails. Anything worth telling the user about is handed to
//! a [`WarningSink`] passed in by the caller, which decides whether to log,
//! collect or drop it.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionWarning {
    /// An `abbrev` span has no `expansion` attribute
    MissingExpansion,
    /// A `sic` span has no `correction` attribute
    MissingCorrection,
    /// A `textStyle` span carries an attribute with no TEI counterpart
    UnknownStyleAttribute { key: String, value: String },
    /// A `date` component is not an integer and was replaced by 1
    InvalidDateComponent { key: String, value: String },
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionWarning::MissingExpansion => write!(f, "Missing expansion in abbrev tag"),
            ConversionWarning::MissingCorrection => write!(f, "Missing correction in sic tag"),
            ConversionWarning::UnknownStyleAttribute { key, value } => {
                write!(f, "Unknown attribute '{key}:{value}' in textStyle tag")
            }
            ConversionWarning::InvalidDateComponent { key, value } => {
                write!(f, "Invalid date component '{key}:{value}', using 1")
            }
        }
    }
}

/// Receiver for conversion warnings.
pub trait WarningSink {
    fn warn(&mut self, warning: ConversionWarning);
}

/// Collects warnings for later inspection.
impl WarningSink for Vec<ConversionWarning> {
    fn warn(&mut self, warning: ConversionWarning) {
        self.push(warning);
    }
}

/// Drops every warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreWarnings;

impl WarningSink for IgnoreWarnings {
    fn warn(&mut self, _warning: ConversionWarning) {}
}

/// Emits each warning as a `tracing` event and counts them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingWarnings {
    pub emitted: usize,
}

impl WarningSink for TracingWarnings {
    fn warn(&mut self, warning: ConversionWarning) {
        self.emitted += 1;
        tracing::warn!("{warning}");
    }
}
