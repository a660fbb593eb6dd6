use crate::authn::AuthError;
use crate::identity::Identity;
use async_trait::async_trait;
use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::Response;
use bytes::Bytes;

/// Deferred response mutations recorded by handlers
///
/// Handlers run before the downstream pipeline has produced a response, so
/// they cannot touch the response directly. They record status, header and
/// body changes here and the gate applies them exactly once after the
/// pipeline continuation returns. An untouched overlay leaves the downstream
/// response unchanged.
#[derive(Debug, Default)]
pub struct ResponseOverlay {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl ResponseOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the response status
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    /// Insert a response header, replacing any downstream value
    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Replace the response body
    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = Some(body.into());
    }

    /// Whether any mutation has been recorded
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.headers.is_empty() && self.body.is_none()
    }

    /// Apply the recorded mutations to the downstream response
    pub(crate) fn apply(self, mut response: Response) -> Response {
        if let Some(status) = self.status {
            *response.status_mut() = status;
        }
        for (name, value) in self.headers.iter() {
            response.headers_mut().insert(name.clone(), value.clone());
        }
        if let Some(bytes) = self.body {
            response.headers_mut().remove(axum::http::header::CONTENT_LENGTH);
            *response.body_mut() = Body::from(bytes);
        }
        response
    }
}

/// Invoked after a successful authentication, once the identity has been
/// installed into the request context
#[async_trait]
pub trait SuccessHandler: Send + Sync {
    async fn on_success(
        &self,
        request: &Request,
        overlay: &mut ResponseOverlay,
        identity: &Identity,
    );
}

/// Invoked when authentication fails, after any stale identity context has
/// been cleared
///
/// May record response mutations but must not halt the pipeline; the gate
/// always continues to the downstream stage afterwards.
#[async_trait]
pub trait FailureHandler: Send + Sync {
    async fn on_failure(
        &self,
        request: &Request,
        overlay: &mut ResponseOverlay,
        error: &AuthError,
    );
}

/// Optional hook for cross-system session propagation (e.g. single sign-on)
///
/// Runs only on successful authentication, after context installation and
/// before the success handler.
#[async_trait]
pub trait PostProcessHandler: Send + Sync {
    async fn post_process(
        &self,
        request: &Request,
        overlay: &mut ResponseOverlay,
        identity: &Identity,
    );
}
