pub mod jwt;

pub use jwt::JwtAuthenticator;

use crate::identity::Identity;
use async_trait::async_trait;
use thiserror::Error;

/// Authentication failure classification
///
/// The two variants are logged and handled at different severities and must
/// stay distinguishable: a rejection is a property of the credential, an
/// internal error is a fault in the verification infrastructure.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The credential is invalid, expired or carries malformed claims
    #[error("Credential rejected: {0}")]
    Rejected(String),

    /// The verification backend failed (unreachable store, misbehaving
    /// upstream); says nothing about the credential itself
    #[error("Authentication backend error: {0}")]
    Internal(String),
}

/// Outcome of an authentication attempt
pub type AuthOutcome = Result<Identity, AuthError>;

/// Pluggable authentication backend
///
/// Verifies an opaque credential and produces an identity. Implementations
/// may perform I/O (remote verification service, credential store); the gate
/// treats any such failure as `AuthError::Internal` rather than assuming the
/// call cannot fail.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Verify a credential
    ///
    /// Invalid, expired or malformed credentials are `Rejected`; backend
    /// faults are `Internal`.
    async fn authenticate(&self, credential: &str) -> AuthOutcome;
}
