pub mod bearer;
pub mod cookie;
pub mod query;

pub use bearer::BearerHeaderExtractor;
pub use cookie::CookieExtractor;
pub use query::QueryParamExtractor;

use axum::extract::Request;
use thiserror::Error;

/// Unexpected failure while extracting a credential
///
/// Distinct from simple absence: a request with no usable credential is
/// `Ok(None)` and passes through the gate untouched, while an `ExtractError`
/// is a request-processing fault.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Malformed credential carrier: {0}")]
    Malformed(String),
}

/// Token extraction strategy
///
/// The one per-deployment variability in the gate's extraction step:
/// implementations pull an opaque credential out of a header, cookie, query
/// parameter or any other request surface. Must not have side effects.
pub trait TokenExtractor: Send + Sync {
    /// Extract a credential from the request
    ///
    /// `Ok(None)` means no credential is present in the form this strategy
    /// understands; the gate treats the request as not applicable and lets
    /// it flow through. `Err` is reserved for carriers that are present but
    /// unreadable.
    fn extract(&self, request: &Request) -> Result<Option<String>, ExtractError>;
}
