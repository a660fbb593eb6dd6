use super::{ExtractError, TokenExtractor};
use axum::extract::Request;
use axum::http::header::AUTHORIZATION;

/// Extracts a bearer token from the Authorization header
///
/// `Authorization: Bearer <token>`. An absent header or a non-Bearer scheme
/// is treated as "no credential"; header bytes that are not valid UTF-8 are
/// an extraction fault.
#[derive(Debug, Clone, Default)]
pub struct BearerHeaderExtractor;

impl TokenExtractor for BearerHeaderExtractor {
    fn extract(&self, request: &Request) -> Result<Option<String>, ExtractError> {
        let header = match request.headers().get(AUTHORIZATION) {
            Some(value) => value,
            None => return Ok(None),
        };

        let value = header
            .to_str()
            .map_err(|_| ExtractError::Malformed("Authorization header is not valid UTF-8".to_string()))?;

        let token = value
            .strip_prefix("Bearer ")
            .or_else(|| value.strip_prefix("bearer "));

        match token {
            Some(token) if !token.trim().is_empty() => Ok(Some(token.trim().to_string())),
            _ => Ok(None),
        }
    }
}
