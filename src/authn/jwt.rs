use super::{AuthError, AuthOutcome, Authenticator};
use crate::config::GateConfig;
use crate::error::{GateError, Result};
use crate::identity::Identity;
use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (numeric user ID, rendered as a string per RFC 7519)
    pub sub: String,
    /// Login name
    pub username: String,
    /// Display name
    #[serde(default)]
    pub nickname: Option<String>,
    /// Role names
    #[serde(default)]
    pub roles: Vec<String>,
    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Audience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<usize>,
}

/// JWT-backed authenticator
///
/// Verifies HMAC-signed tokens against the gate's signing key. Every
/// verification failure is a rejection; this authenticator has no backend to
/// fail, so it never produces `AuthError::Internal`.
pub struct JwtAuthenticator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAuthenticator {
    /// Create a new JWT authenticator from gate configuration
    pub fn new(config: &GateConfig) -> Result<Self> {
        let algorithm = Self::parse_algorithm(&config.jwt.algorithm)?;
        let decoding_key =
            DecodingKey::from_secret(config.signing_key.expose_secret().as_bytes());

        let mut validation = Validation::new(algorithm);
        if config.jwt.validate_issuer {
            validation.set_issuer(&[&config.service_name]);
        }
        if let Some(audience) = &config.jwt.audience {
            validation.set_audience(&[audience]);
        }
        validation.validate_exp = true;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Parse algorithm string to Algorithm enum
    fn parse_algorithm(algo: &str) -> Result<Algorithm> {
        match algo.to_uppercase().as_str() {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            _ => Err(GateError::Config(format!(
                "Unsupported algorithm: {}",
                algo
            ))),
        }
    }
}

#[async_trait]
impl Authenticator for JwtAuthenticator {
    async fn authenticate(&self, credential: &str) -> AuthOutcome {
        let token_data = decode::<Claims>(credential, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::Rejected(format!("Token validation failed: {}", e)))?;

        let claims = token_data.claims;

        let user_id: u64 = claims
            .sub
            .parse()
            .map_err(|_| AuthError::Rejected(format!("Non-numeric subject: {}", claims.sub)))?;

        let display_name = claims.nickname.unwrap_or_else(|| claims.username.clone());

        Ok(Identity::new(
            user_id,
            claims.username,
            display_name,
            claims.roles,
        ))
    }
}
