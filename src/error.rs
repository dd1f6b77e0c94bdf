//! Error types for ingestion and classification runs

use thiserror::Error;

/// Errors that can stop an ingestion call or a classification run.
///
/// Per-address invalidity is never an error; it is reported through
/// [`crate::ClassificationResult::Invalid`].
#[derive(Error, Debug)]
pub enum PurifyError {
    /// Source content could not be read (corrupt workbook container, etc.)
    #[error("Failed to read {source_name}: {details}")]
    Ingestion {
        source_name: String,
        details: String,
    },

    /// Workbook opened fine but holds no sheets at all
    #[error("Workbook {0} contains no sheets")]
    EmptyWorkbook(String),

    /// Every toggleable rule is disabled
    #[error("At least one rule must be enabled")]
    NoRulesEnabled,

    /// Failed to serialize an export artifact
    #[error("Failed to serialize export: {0}")]
    Export(String),
}

impl PurifyError {
    /// Whether the caller should re-prompt for rule selection rather than
    /// for a new input file.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::NoRulesEnabled)
    }

    pub(crate) fn ingestion(source_name: &str, details: impl ToString) -> Self {
        Self::Ingestion {
            source_name: source_name.to_string(),
            details: details.to_string(),
        }
    }
}

/// Result type for purification operations
pub type Result<T> = std::result::Result<T, PurifyError>;
