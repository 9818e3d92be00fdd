use crate::errors::domain::{DomainError, ErrorCode};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorCode {
    InvalidPattern,
}

impl ErrorCode for QueryErrorCode {
    fn as_code_str(self) -> &'static str {
        match self {
            Self::InvalidPattern => "invalid_pattern",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    code: QueryErrorCode,
    message: String,
}

impl QueryError {
    pub fn new(code: QueryErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_pattern(pattern: &str, error: regex::Error) -> Self {
        Self::new(
            QueryErrorCode::InvalidPattern,
            format!("Invalid wildcard pattern {pattern:?}: {error}"),
        )
    }

    pub fn code(&self) -> QueryErrorCode {
        self.code
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for QueryError {}

impl DomainError for QueryError {
    type Code = QueryErrorCode;

    fn error_code(&self) -> QueryErrorCode {
        self.code
    }

    fn message(&self) -> &str {
        &self.message
    }
}
