use crate::identity::Identity;
use axum::http::Extensions;
use std::sync::Arc;

/// Stable attribute key names
///
/// Downstream consumers that export request attributes (e.g. into forwarded
/// headers or structured logs) use these names; they are a compatibility
/// contract and must not change between releases.
pub mod keys {
    pub const USER_ID: &str = "auth.user_id";
    pub const USERNAME: &str = "auth.username";
    pub const DISPLAY_NAME: &str = "auth.display_name";
    pub const ROLES: &str = "auth.roles";
}

/// Request-scoped security context
///
/// Present in a request's extensions if and only if the gate authenticated
/// the request. Downstream authorization logic reads the identity from here.
/// Scoped to a single in-flight request; never shared between requests.
#[derive(Debug, Clone)]
pub struct SecurityContext {
    identity: Arc<Identity>,
}

impl SecurityContext {
    pub fn new(identity: Arc<Identity>) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

/// Request attributes written on successful authentication
///
/// A flattened copy of the identity fields, mirroring the attribute keys in
/// [`keys`]. Kept separate from [`SecurityContext`] so handlers that only
/// need the raw attribute values do not reach through the identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthAttributes {
    pub user_id: u64,
    pub username: String,
    pub display_name: String,
    pub roles: Vec<String>,
}

impl From<&Identity> for AuthAttributes {
    fn from(identity: &Identity) -> Self {
        Self {
            user_id: identity.user_id,
            username: identity.username.clone(),
            display_name: identity.display_name.clone(),
            roles: identity.roles.clone(),
        }
    }
}

impl AuthAttributes {
    /// Render the attributes as (key, value) string pairs under the stable
    /// names in [`keys`]
    pub fn as_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (keys::USER_ID, self.user_id.to_string()),
            (keys::USERNAME, self.username.clone()),
            (keys::DISPLAY_NAME, self.display_name.clone()),
            (keys::ROLES, self.roles.join(",")),
        ]
    }
}

/// Install the identity into the request's extensions
///
/// Writes both the security context and the flattened attributes. Always
/// called before any success handler runs, so handlers observe a fully
/// populated context.
pub fn install(extensions: &mut Extensions, identity: Arc<Identity>) {
    extensions.insert(AuthAttributes::from(identity.as_ref()));
    extensions.insert(SecurityContext::new(identity));
}

/// Remove any identity state from the request's extensions
///
/// Called on every failure path before the failure handler, so stale state
/// from an earlier pipeline stage cannot leak past a failed authentication.
pub fn clear(extensions: &mut Extensions) {
    extensions.remove::<SecurityContext>();
    extensions.remove::<AuthAttributes>();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_identity() -> Arc<Identity> {
        Arc::new(Identity::new(
            42,
            "alice",
            "Alice",
            vec!["user".to_string()],
        ))
    }

    #[test]
    fn test_install_writes_context_and_attributes() {
        let mut extensions = Extensions::new();
        install(&mut extensions, test_identity());

        let ctx = extensions.get::<SecurityContext>().unwrap();
        assert_eq!(ctx.identity().user_id, 42);

        let attrs = extensions.get::<AuthAttributes>().unwrap();
        assert_eq!(attrs.username, "alice");
        assert_eq!(attrs.roles, vec!["user".to_string()]);
    }

    #[test]
    fn test_clear_removes_stale_state() {
        let mut extensions = Extensions::new();
        install(&mut extensions, test_identity());
        clear(&mut extensions);

        assert!(extensions.get::<SecurityContext>().is_none());
        assert!(extensions.get::<AuthAttributes>().is_none());
    }

    #[test]
    fn test_attribute_pairs_use_stable_keys() {
        let attrs = AuthAttributes::from(test_identity().as_ref());
        let pairs = attrs.as_pairs();
        assert!(pairs.contains(&(keys::USER_ID, "42".to_string())));
        assert!(pairs.contains(&(keys::ROLES, "user".to_string())));
    }
}
