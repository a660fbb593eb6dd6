use serde::{Deserialize, Serialize};

/// Authenticated principal
///
/// Produced by an [`crate::authn::Authenticator`] on success and installed
/// into the request-scoped security context. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable user identifier
    pub user_id: u64,
    /// Login name
    pub username: String,
    /// Human-readable display name
    pub display_name: String,
    /// Role names granted to the principal
    pub roles: Vec<String>,
}

impl Identity {
    pub fn new(
        user_id: u64,
        username: impl Into<String>,
        display_name: impl Into<String>,
        roles: Vec<String>,
    ) -> Self {
        Self {
            user_id,
            username: username.into(),
            display_name: display_name.into(),
            roles,
        }
    }

    /// Whether the principal holds the given role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_role() {
        let identity = Identity::new(42, "alice", "Alice", vec!["user".to_string()]);
        assert!(identity.has_role("user"));
        assert!(!identity.has_role("admin"));
    }
}
