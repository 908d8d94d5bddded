//! Error types for the insights crate.
//!
//! The engine itself is total. The only failure is a strict parse of a
//! UI selection; the lenient `from_selection` helpers never surface it.

use thiserror::Error;

/// A selection string that names no known option
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: {value:?}")]
pub struct UnknownSelection {
    /// What was being selected ("rating bucket", "chart kind", ...)
    pub kind: &'static str,
    pub value: String,
}

impl UnknownSelection {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
