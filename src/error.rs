use thiserror::Error;

/// Result type alias using `Error`.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown element id `{0}`")]
    UnknownId(String),

    #[error("unknown category `{0}`")]
    UnknownKind(String),

    #[error("element `{id}` has no `{kind}` relationship")]
    MissingRelationship { id: String, kind: String },

    #[error("malformed rule: {0}")]
    MalformedRule(String),

    #[error("malformed puzzle: {0}")]
    MalformedPuzzle(String),

    /// Two already-related elements disagree on a shared kind mapping.
    /// Under correct solver usage this never fires; it signals a defect,
    /// not a puzzle-input error.
    #[error("conflicting `{kind}` relationships: `{left}` vs `{right}`")]
    GraphConflict {
        kind: String,
        left: String,
        right: String,
    },

    #[error("division by zero while evaluating a `/` rule")]
    DivisionByZero,

    #[error("element id `{0}` carries no digits, numeric value undefined")]
    NonNumericId(String),

    #[error("element `{id}` is not a member of category `{kind}`")]
    KindMismatch { id: String, kind: String },

    #[error("failed to read puzzle: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid puzzle JSON: {0}")]
    Json(#[from] serde_json::Error),
}
