use super::{ExtractError, TokenExtractor};
use axum::extract::Request;
use axum::http::header::COOKIE;

/// Extracts a token from a named cookie
#[derive(Debug, Clone)]
pub struct CookieExtractor {
    cookie_name: String,
}

impl CookieExtractor {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }
}

impl TokenExtractor for CookieExtractor {
    fn extract(&self, request: &Request) -> Result<Option<String>, ExtractError> {
        // A request may carry several Cookie headers; scan them all.
        for header in request.headers().get_all(COOKIE) {
            let value = header.to_str().map_err(|_| {
                ExtractError::Malformed("Cookie header is not valid UTF-8".to_string())
            })?;

            for pair in value.split(';') {
                let mut parts = pair.trim().splitn(2, '=');
                let name = parts.next().unwrap_or("");
                let token = parts.next().unwrap_or("");
                if name == self.cookie_name && !token.is_empty() {
                    return Ok(Some(token.to_string()));
                }
            }
        }
        Ok(None)
    }
}
