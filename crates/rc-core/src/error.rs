/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when handling core roster data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A string could not be parsed as a student identifier.
    #[error("invalid student id: \"{0}\"")]
    InvalidId(String),
}
