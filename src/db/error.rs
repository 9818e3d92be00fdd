//! Failures of the reference SQLite adapter. The code names the step that
//! failed; the message carries the underlying rusqlite, I/O or JSON error.

use crate::errors::domain::{DomainError, ErrorCode};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorCode {
    OpenFailed,
    SchemaInitFailed,
    ReadFailed,
    WriteFailed,
    SerializeFailed,
}

impl ErrorCode for DbErrorCode {
    fn as_code_str(self) -> &'static str {
        match self {
            Self::OpenFailed => "open_failed",
            Self::SchemaInitFailed => "schema_init_failed",
            Self::ReadFailed => "read_failed",
            Self::WriteFailed => "write_failed",
            Self::SerializeFailed => "serialize_failed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DbError {
    code: DbErrorCode,
    message: String,
}

impl DbError {
    pub fn new(code: DbErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// `"{context}: {source}"` under `code`.
    pub fn wrap(code: DbErrorCode, context: impl Into<String>, source: impl fmt::Display) -> Self {
        Self::new(code, format!("{}: {source}", context.into()))
    }

    pub fn code(&self) -> DbErrorCode {
        self.code
    }
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DbError {}

impl DomainError for DbError {
    type Code = DbErrorCode;

    fn error_code(&self) -> DbErrorCode {
        self.code
    }

    fn message(&self) -> &str {
        &self.message
    }
}

pub type DbResult<T> = Result<T, DbError>;
