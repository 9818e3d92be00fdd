use super::{ApiError, ApiResult};

/// Stable snake_case code reported to hosts.
pub trait ErrorCode: Copy {
    #[allow(clippy::wrong_self_convention)]
    fn as_code_str(self) -> &'static str;
}

/// An error owned by one concern of the crate: a typed code plus a message.
pub trait DomainError: std::error::Error {
    type Code: ErrorCode;

    fn error_code(&self) -> Self::Code;
    fn message(&self) -> &str;

    fn code_str(&self) -> &'static str {
        self.error_code().as_code_str()
    }

    fn to_api_error(&self) -> ApiError {
        ApiError::new(self.code_str(), self.message())
    }
}

pub fn map_api_result<T, E>(result: Result<T, E>) -> ApiResult<T>
where
    E: DomainError,
{
    result.map_err(|error| error.to_api_error())
}

#[cfg(test)]
mod tests {
    use super::map_api_result;
    use crate::db::{DbError, DbErrorCode};
    use crate::query::WildcardPattern;

    #[test]
    fn maps_db_error_to_api_error() {
        let result: Result<(), DbError> =
            Err(DbError::new(DbErrorCode::ReadFailed, "Failed to read tags"));
        let err = map_api_result(result).unwrap_err();
        assert_eq!(err.code, "read_failed");
        assert_eq!(err.message, "Failed to read tags");
    }

    #[test]
    fn passes_ok_values_through() {
        let result = map_api_result(WildcardPattern::new("a$*b")).map(|p| p.is_match("axxb"));
        assert_eq!(result, Ok(true));
    }
}
