use thiserror::Error;

/// Errors produced by the survey data pipeline.
///
/// Shape problems are caught once at load time so the filter pipeline can
/// assume well-formed input. An empty filter result is a state, not an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurveyError {
    /// An identity or consent column is absent from the input file.
    /// Fatal: the session cannot proceed without it.
    #[error("required column '{column}' is missing from the dataset")]
    MissingRequiredColumn { column: String },

    /// The requested question section is not in the section table.
    /// Recoverable: the caller re-prompts instead of defaulting.
    #[error("unknown question section '{label}'")]
    InvalidSection { label: String },
}
