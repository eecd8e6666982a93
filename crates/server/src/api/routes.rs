use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::middleware::{auth_middleware, metrics_middleware};
use super::{handlers, qr, queue, services, tickets};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let static_dir = state.config().server.static_dir.clone();

    // Visitor-facing routes
    let public_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/qr", get(qr::qr_code))
        .route("/services", get(services::list_services))
        .route("/services/{id}/tickets", get(services::list_service_tickets))
        .route("/tickets", post(tickets::create_ticket))
        .route("/tickets/{id}", get(tickets::get_ticket))
        .route("/tickets/{id}", delete(tickets::cancel_ticket))
        .route("/queue", get(queue::get_queue));

    // Staff routes, behind the authenticator
    let admin_routes = Router::new()
        .route("/services", post(services::create_service))
        .route("/services/{id}", delete(services::delete_service))
        .route("/services/{id}/next", post(services::serve_next))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_routes = public_routes.merge(admin_routes).with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .route("/metrics", get(handlers::metrics))
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
