use crate::error::{GateError, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::Path;

/// Gate configuration
///
/// Declarative settings for a single gate instance. The collaborator
/// references (authenticator, handlers) are wired in code through
/// [`crate::gate::AuthGateBuilder`]; this struct carries only the values that
/// can come from a config file. Read-only after construction and safely
/// shared across concurrent requests.
#[derive(Debug, Clone, Deserialize)]
pub struct GateConfig {
    /// Name of the service this gate protects (used as the JWT issuer)
    pub service_name: String,
    /// Signing key for credential verification
    pub signing_key: SecretString,
    /// Token extraction strategy
    #[serde(default)]
    pub extractor: ExtractorConfig,
    /// JWT verification settings
    #[serde(default)]
    pub jwt: JwtConfig,
}

/// Token extraction strategy selection
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum ExtractorConfig {
    /// Bearer token from the Authorization header
    Header,
    /// Token from a named cookie
    Cookie { name: String },
    /// Token from a named query parameter
    Query { name: String },
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig::Header
    }
}

/// JWT verification settings
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Algorithm to use (HS256, HS384 or HS512)
    #[serde(default = "default_jwt_algorithm")]
    pub algorithm: String,
    /// Whether to pin the issuer claim to the service name
    #[serde(default = "default_true")]
    pub validate_issuer: bool,
    /// Audience to validate (not validated if unset)
    #[serde(default)]
    pub audience: Option<String>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            algorithm: default_jwt_algorithm(),
            validate_issuer: true,
            audience: None,
        }
    }
}

fn default_jwt_algorithm() -> String {
    "HS256".to_string()
}

fn default_true() -> bool {
    true
}

impl GateConfig {
    /// Create a configuration from its two required values
    pub fn new(service_name: impl Into<String>, signing_key: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            signing_key: SecretString::new(signing_key.into()),
            extractor: ExtractorConfig::default(),
            jwt: JwtConfig::default(),
        }
    }

    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GateConfig = serde_yaml::from_str(&content)
            .map_err(|e| GateError::Serialization(format!("Invalid YAML: {}", e)))?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// Called eagerly at gate construction; a gate is never built from a
    /// configuration that fails here.
    pub fn validate(&self) -> Result<()> {
        if self.service_name.trim().is_empty() {
            return Err(GateError::Config(
                "service_name must not be empty".to_string(),
            ));
        }
        if self.signing_key.expose_secret().trim().is_empty() {
            return Err(GateError::Config(
                "signing_key must not be empty".to_string(),
            ));
        }
        match self.jwt.algorithm.to_uppercase().as_str() {
            "HS256" | "HS384" | "HS512" => {}
            other => {
                return Err(GateError::Config(format!(
                    "Unsupported JWT algorithm: {}",
                    other
                )));
            }
        }
        match &self.extractor {
            ExtractorConfig::Cookie { name } | ExtractorConfig::Query { name }
                if name.trim().is_empty() =>
            {
                return Err(GateError::Config(
                    "extractor name must not be empty".to_string(),
                ));
            }
            _ => {}
        }
        Ok(())
    }
}
