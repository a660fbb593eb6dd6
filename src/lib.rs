pub mod authn;
pub mod config;
pub mod context;
pub mod error;
pub mod extract;
pub mod gate;
pub mod handler;
pub mod identity;

pub use authn::{AuthError, AuthOutcome, Authenticator, JwtAuthenticator};
pub use config::GateConfig;
pub use context::{AuthAttributes, SecurityContext};
pub use error::{GateError, Result};
pub use extract::TokenExtractor;
pub use gate::{AuthGate, AuthGateBuilder};
pub use handler::{FailureHandler, PostProcessHandler, ResponseOverlay, SuccessHandler};
pub use identity::Identity;

/// Initialize tracing/logging
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "authgate=debug".into()),
        )
        .with_target(false)
        .compact()
        .init();
}
