use super::{ExtractError, TokenExtractor};
use axum::extract::Request;

/// Extracts a token from a named query parameter
///
/// Intended for deployments where clients cannot set headers (e.g. plain
/// anchor-tag downloads). No percent-decoding is applied; bearer tokens are
/// URL-safe by construction.
#[derive(Debug, Clone)]
pub struct QueryParamExtractor {
    param_name: String,
}

impl QueryParamExtractor {
    pub fn new(param_name: impl Into<String>) -> Self {
        Self {
            param_name: param_name.into(),
        }
    }
}

impl TokenExtractor for QueryParamExtractor {
    fn extract(&self, request: &Request) -> Result<Option<String>, ExtractError> {
        let query = match request.uri().query() {
            Some(query) => query,
            None => return Ok(None),
        };

        for pair in query.split('&') {
            let mut parts = pair.splitn(2, '=');
            let name = parts.next().unwrap_or("");
            let token = parts.next().unwrap_or("");
            if name == self.param_name && !token.is_empty() {
                return Ok(Some(token.to_string()));
            }
        }
        Ok(None)
    }
}
