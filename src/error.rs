use thiserror::Error;

/// Main error type for the sheet blocks engine.
/// Aggregates errors from the range parser, specification validation and the orchestrator.
#[derive(Error, Debug)]
pub enum SheetBlocksError {
    #[error("{0}")]
    WithContextError(String),

    // Table module errors
    #[error("{0}")]
    RangeError(#[from] crate::table::range::RangeError),

    #[error("{0}")]
    SpecError(#[from] crate::table::SpecError),

    // Extraction module errors
    #[error("{0}")]
    ExtractError(#[from] crate::extract::ExtractError),
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, SheetBlocksError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| SheetBlocksError::WithContextError(format!("{}: {}", message, e)))
    }
}
