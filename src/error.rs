use thiserror::Error;

/// Errors raised while loading a question bank. Loading is all or nothing.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("could not read question bank: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed question bank at line {row}: {reason}")]
    MalformedInput { row: u64, reason: String },
}

impl BankError {
    pub fn malformed<S: Into<String>>(row: u64, reason: S) -> Self {
        BankError::MalformedInput {
            row,
            reason: reason.into(),
        }
    }
}

/// Operations attempted in a session state that cannot honor them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("select at least one year and one category first")]
    NoFilter,
    #[error("there are no questions left to submit")]
    NothingToSubmit,
}
