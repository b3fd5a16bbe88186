//! Selector errors

use plainview_types::LookupError;

/// Errors surfaced by selector evaluation
///
/// Selectors never swallow failures: whatever an input selector or combiner
/// returns travels unchanged to the caller of the outermost selector.
#[derive(Debug, thiserror::Error)]
pub enum SelectorError {
    /// Keyed access on a value that does not support it
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Failure raised by caller-supplied selector code
    #[error(transparent)]
    Combiner(#[from] anyhow::Error),
}

/// Result type for selector evaluation
pub type Result<T, E = SelectorError> = std::result::Result<T, E>;
