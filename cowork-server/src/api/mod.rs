//! HTTP API
//!
//! One module per resource, each exposing `router()` nested under `/api/...`.

pub mod bookings;
pub mod devices;
pub mod health;
pub mod rooms;
pub mod workspaces;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;
use crate::middleware;
use crate::utils::{AppError, AppResult};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID generator (uuid v4)
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Router with every route registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(workspaces::router())
        .merge(rooms::router())
        .merge(devices::router())
        .merge(bookings::router())
        .merge(health::router())
}

/// Fully configured application, shared by the server and the tests
pub fn build_app(state: ServerState) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        // Request logging - sees the request id set below
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .with_state(state)
}

/// Reject a body `id` that disagrees with the path
pub(crate) fn ensure_path_id(path_id: i64, body_id: Option<i64>) -> AppResult<()> {
    match body_id {
        Some(id) if id != path_id => Err(AppError::invalid_request(format!(
            "Body id {id} does not match path id {path_id}"
        ))
        .with_detail("id", id)),
        _ => Ok(()),
    }
}
