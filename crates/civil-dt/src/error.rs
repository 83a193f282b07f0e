//! Error types for civil date/time operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CivilError {
    /// The input did not match the expected layout, or a component was out of range.
    #[error("Cannot parse \"{input}\" as {layout}: {reason}")]
    Parse {
        input: String,
        layout: &'static str,
        reason: String,
    },

    /// A storage value of an unsupported kind was handed to `scan`.
    #[error("Can't convert {found} to {target}")]
    ConversionType {
        found: &'static str,
        target: &'static str,
    },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

impl CivilError {
    pub(crate) fn parse(input: &str, layout: &'static str, reason: impl Into<String>) -> Self {
        CivilError::Parse {
            input: input.to_string(),
            layout,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CivilError>;
