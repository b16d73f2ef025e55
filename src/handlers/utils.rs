use crate::error::ApiError;

/// Parse a path segment as a post or user id. Only plain base-10 integers are accepted.
pub fn parse_id(raw: &str, message: &'static str) -> Result<i32, ApiError> {
    raw.trim().parse::<i32>().map_err(|_| ApiError::bad_request(message))
}
