use crate::authn::{AuthError, Authenticator};
use crate::config::{ExtractorConfig, GateConfig};
use crate::context;
use crate::error::{GateError, Result};
use crate::extract::{
    BearerHeaderExtractor, CookieExtractor, QueryParamExtractor, TokenExtractor,
};
use crate::handler::{FailureHandler, PostProcessHandler, ResponseOverlay, SuccessHandler};
use crate::identity::Identity;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tracing::{debug, error};

/// Per-request authentication gate
///
/// Intercepts each request once: extracts a credential, verifies it through
/// the configured [`Authenticator`], and either installs the resulting
/// identity into the request's security context or routes the failure to the
/// failure handler. The downstream pipeline always runs exactly once per
/// request, whatever the outcome; only an unexpected extraction fault aborts
/// the request instead.
///
/// Immutable after construction and shared across concurrent requests via
/// `Arc`; all per-request state lives in the request itself.
///
/// ```ignore
/// let gate = Arc::new(
///     AuthGate::builder(GateConfig::new("user-service", signing_key))
///         .authenticator(Arc::new(JwtAuthenticator::new(&config)?))
///         .build()?,
/// );
/// let app = Router::new()
///     .route("/profile", get(profile))
///     .layer(middleware::from_fn_with_state(gate, AuthGate::handle));
/// ```
pub struct AuthGate {
    config: GateConfig,
    extractor: Arc<dyn TokenExtractor>,
    authenticator: Arc<dyn Authenticator>,
    success_handler: Option<Arc<dyn SuccessHandler>>,
    failure_handler: Option<Arc<dyn FailureHandler>>,
    post_process_handler: Option<Arc<dyn PostProcessHandler>>,
}

impl AuthGate {
    /// Start building a gate from a validated-on-build configuration
    pub fn builder(config: GateConfig) -> AuthGateBuilder {
        AuthGateBuilder {
            config,
            extractor: None,
            authenticator: None,
            success_handler: None,
            failure_handler: None,
            post_process_handler: None,
        }
    }

    /// Name of the service this gate protects
    pub fn service_name(&self) -> &str {
        &self.config.service_name
    }

    /// Middleware entry point for axum
    ///
    /// Wire with `middleware::from_fn_with_state(gate, AuthGate::handle)`.
    pub async fn handle(
        State(gate): State<Arc<AuthGate>>,
        request: Request,
        next: Next,
    ) -> Response {
        gate.intercept(request, next).await
    }

    /// Intercept one request
    ///
    /// The decision sequence: extract, authenticate, branch on outcome,
    /// continue the pipeline. Handlers record response mutations in an
    /// overlay which is applied after the downstream response is produced.
    pub async fn intercept(&self, mut request: Request, next: Next) -> Response {
        let credential = match self.extractor.extract(&request) {
            Ok(Some(credential)) => credential,
            Ok(None) => {
                // Anonymous or differently-authenticated request; not ours.
                debug!(
                    service = %self.config.service_name,
                    "no credential presented, passing request through"
                );
                return next.run(request).await;
            }
            Err(e) => {
                error!(service = %self.config.service_name, error = %e, "credential extraction fault");
                return GateError::Extraction(e.to_string()).into_response();
            }
        };

        let mut overlay = ResponseOverlay::new();

        match self.authenticator.authenticate(&credential).await {
            Ok(identity) => {
                self.successful_authentication(&mut request, &mut overlay, identity)
                    .await;
            }
            Err(failed) => {
                match &failed {
                    AuthError::Internal(reason) => {
                        error!(
                            service = %self.config.service_name,
                            %reason,
                            "internal error occurred while trying to authenticate the request"
                        );
                    }
                    AuthError::Rejected(reason) => {
                        debug!(service = %self.config.service_name, %reason, "authentication request failed");
                    }
                }
                self.unsuccessful_authentication(&mut request, &mut overlay, &failed)
                    .await;
            }
        }

        let response = next.run(request).await;
        overlay.apply(response)
    }

    /// Success path: populate context, then run hooks
    ///
    /// Context installation precedes every handler invocation so handlers
    /// observe a fully populated request. The post-process hook runs before
    /// the success handler.
    async fn successful_authentication(
        &self,
        request: &mut Request,
        overlay: &mut ResponseOverlay,
        identity: Identity,
    ) {
        let identity = Arc::new(identity);
        context::install(request.extensions_mut(), identity.clone());
        debug!(
            user_id = identity.user_id,
            username = %identity.username,
            "authentication success, security context populated"
        );

        if let Some(handler) = &self.post_process_handler {
            handler.post_process(request, overlay, &identity).await;
        }
        if let Some(handler) = &self.success_handler {
            handler.on_success(request, overlay, &identity).await;
        }
    }

    /// Failure path: clear any stale context, then run the failure hook
    ///
    /// The handler may record response mutations but the pipeline still
    /// continues afterwards.
    async fn unsuccessful_authentication(
        &self,
        request: &mut Request,
        overlay: &mut ResponseOverlay,
        failed: &AuthError,
    ) {
        context::clear(request.extensions_mut());
        debug!("security context cleared after failed authentication");

        if let Some(handler) = &self.failure_handler {
            handler.on_failure(request, overlay, failed).await;
        }
    }
}

/// Builder for [`AuthGate`]
///
/// `build()` validates the configuration and the collaborator wiring
/// eagerly; a gate with a missing authenticator, empty service name or empty
/// signing key never reaches request-serving state.
pub struct AuthGateBuilder {
    config: GateConfig,
    extractor: Option<Arc<dyn TokenExtractor>>,
    authenticator: Option<Arc<dyn Authenticator>>,
    success_handler: Option<Arc<dyn SuccessHandler>>,
    failure_handler: Option<Arc<dyn FailureHandler>>,
    post_process_handler: Option<Arc<dyn PostProcessHandler>>,
}

impl AuthGateBuilder {
    /// Set the authentication backend (required)
    pub fn authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Override the token extraction strategy
    ///
    /// Defaults to the strategy named by the configuration (bearer header
    /// unless configured otherwise).
    pub fn extractor(mut self, extractor: Arc<dyn TokenExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Set the success handler (optional)
    pub fn success_handler(mut self, handler: Arc<dyn SuccessHandler>) -> Self {
        self.success_handler = Some(handler);
        self
    }

    /// Set the failure handler (optional)
    pub fn failure_handler(mut self, handler: Arc<dyn FailureHandler>) -> Self {
        self.failure_handler = Some(handler);
        self
    }

    /// Set the post-process handler (optional)
    pub fn post_process_handler(mut self, handler: Arc<dyn PostProcessHandler>) -> Self {
        self.post_process_handler = Some(handler);
        self
    }

    /// Validate and build the gate
    pub fn build(self) -> Result<AuthGate> {
        self.config.validate()?;

        let authenticator = self.authenticator.ok_or_else(|| {
            GateError::Config("authenticator must not be null".to_string())
        })?;

        let extractor = self.extractor.unwrap_or_else(|| match &self.config.extractor {
            ExtractorConfig::Header => Arc::new(BearerHeaderExtractor),
            ExtractorConfig::Cookie { name } => Arc::new(CookieExtractor::new(name.clone())),
            ExtractorConfig::Query { name } => Arc::new(QueryParamExtractor::new(name.clone())),
        });

        Ok(AuthGate {
            config: self.config,
            extractor,
            authenticator,
            success_handler: self.success_handler,
            failure_handler: self.failure_handler,
            post_process_handler: self.post_process_handler,
        })
    }
}
