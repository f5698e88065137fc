// ============================================================================
// domain/error.rs - LAYOUT VALIDATION ERRORS
// ============================================================================

use thiserror::Error;

/// Domain error type.
///
/// Raised before any side effect happens, so they are always safe to fix
/// and re-run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid install layout: {field} {reason}")]
    InvalidLayout { field: &'static str, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidLayout { field, .. } => vec![
                format!("Check the `{}` setting in your configuration", field),
                "Working directories must be absolute paths".into(),
                "The two working directories must be different".into(),
            ],
        }
    }
}
