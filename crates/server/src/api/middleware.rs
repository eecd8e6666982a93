//! Authentication and metrics middleware for API routes.

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use queuedesk_core::{AuthError, Credentials, Operator};

use super::ErrorResponse;
use crate::metrics::{
    normalize_path, AUTH_FAILURES_TOTAL, HTTP_REQUESTS_IN_FLIGHT, HTTP_REQUESTS_TOTAL,
    HTTP_REQUEST_DURATION,
};
use crate::state::AppState;

/// Metrics middleware that tracks HTTP request duration and counts.
///
/// This middleware records:
/// - Request duration (histogram)
/// - Request count (counter)
/// - Requests in flight (gauge)
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());

    HTTP_REQUESTS_IN_FLIGHT.inc();
    let response = next.run(request).await;
    HTTP_REQUESTS_IN_FLIGHT.dec();

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    HTTP_REQUEST_DURATION
        .with_label_values(&[&method, &path, &status])
        .observe(duration);
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &path, &status])
        .inc();

    response
}

/// Gate for staff-only routes.
///
/// Reads the API key from `X-API-Key` or `Authorization: Bearer` and checks
/// it with the configured authenticator. The admitted [`Operator`] is stored
/// in the request extensions for [`AuthOperator`].
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let credentials = Credentials::from_headers(
        request
            .headers()
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v))),
    );

    match state.authenticator().authenticate(&credentials).await {
        Ok(operator) => {
            request.extensions_mut().insert(operator);
            next.run(request).await
        }
        Err(e) => {
            let (reason, status) = match &e {
                AuthError::MissingCredentials => ("missing_credentials", StatusCode::UNAUTHORIZED),
                AuthError::InvalidKey => ("invalid_key", StatusCode::UNAUTHORIZED),
                AuthError::Misconfigured(_) => {
                    ("misconfigured", StatusCode::INTERNAL_SERVER_ERROR)
                }
            };
            AUTH_FAILURES_TOTAL.with_label_values(&[reason]).inc();
            tracing::warn!(reason, path = %request.uri().path(), "Admin request rejected");

            let error = if status == StatusCode::UNAUTHORIZED {
                "Unauthorized".to_string()
            } else {
                e.to_string()
            };
            (status, Json(ErrorResponse { error })).into_response()
        }
    }
}

/// Extractor for the name of the operator admitted by [`auth_middleware`].
///
/// Falls back to the unverified operator when the route is not behind the
/// middleware.
#[derive(Debug, Clone)]
pub struct AuthOperator(pub String);

impl<S> FromRequestParts<S> for AuthOperator
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let name = parts
            .extensions
            .get::<Operator>()
            .map(|op| op.name.clone())
            .unwrap_or_else(|| Operator::unverified().name);
        std::future::ready(Ok(AuthOperator(name)))
    }
}
