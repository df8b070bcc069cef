use thiserror::Error;

use crate::db::types::SubmissionType;
use crate::repositories::StoreError;

#[derive(Debug, Error)]
pub(crate) enum EngineError {
    #[error("authentication required")]
    NotAuthenticated,
    #[error("{what} not found")]
    NotFound { what: &'static str },
    /// Content chain above an assessment is broken. Surfaced to callers as `NotFound`.
    #[error("{what} {id} is missing from the content hierarchy")]
    BrokenReference { what: &'static str, id: String },
    #[error("caller is not enrolled in the owning course")]
    NotEnrolled,
    #[error("submission type {actual} does not match required type {expected}")]
    TypeMismatch { expected: SubmissionType, actual: SubmissionType },
    #[error("content is not a well-formed absolute URL")]
    InvalidFormat,
    #[error("text content must not be empty")]
    EmptyContent,
    #[error("file reference must not be empty")]
    MissingFile,
    #[error("expected {expected} answers, got {actual}")]
    AnswerCountMismatch { expected: usize, actual: usize },
    #[error("question index {0} is out of range")]
    InvalidQuestionIndex(i64),
    #[error("option index {option_index} is out of range for question {question_index}")]
    InvalidOptionIndex { question_index: i64, option_index: i64 },
    #[error("question index {0} is answered more than once")]
    DuplicateQuestionIndex(i64),
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("a score is required to grade a submission")]
    MissingScore,
    #[error("score {score} must be between 0 and {max}")]
    ScoreOutOfBounds { score: f64, max: f64 },
    #[error("concurrent update, retry budget exhausted")]
    Conflict,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Stable machine-readable kind, exposed as the `code` field of API errors.
    pub(crate) fn code(&self) -> &'static str {
        match self {
            EngineError::NotAuthenticated => "NOT_AUTHENTICATED",
            EngineError::NotFound { .. } | EngineError::BrokenReference { .. } => "NOT_FOUND",
            EngineError::NotEnrolled => "NOT_ENROLLED",
            EngineError::TypeMismatch { .. } => "TYPE_MISMATCH",
            EngineError::InvalidFormat => "INVALID_FORMAT",
            EngineError::EmptyContent => "EMPTY_CONTENT",
            EngineError::MissingFile => "MISSING_FILE",
            EngineError::AnswerCountMismatch { .. } => "ANSWER_COUNT_MISMATCH",
            EngineError::InvalidQuestionIndex(_) => "INVALID_QUESTION_INDEX",
            EngineError::InvalidOptionIndex { .. } => "INVALID_OPTION_INDEX",
            EngineError::DuplicateQuestionIndex(_) => "DUPLICATE_QUESTION_INDEX",
            EngineError::Forbidden(_) => "FORBIDDEN",
            EngineError::MissingScore => "MISSING_SCORE",
            EngineError::ScoreOutOfBounds { .. } => "SCORE_OUT_OF_BOUNDS",
            EngineError::Conflict => "CONFLICT",
            EngineError::Store(_) => "STORE_FAILURE",
        }
    }
}
