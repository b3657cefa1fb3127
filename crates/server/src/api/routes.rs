use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{handlers, middleware::metrics_middleware, tickets};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/agents", get(handlers::list_agents))
        .route("/metrics", get(handlers::metrics))
        // Tickets
        .route(
            "/tickets",
            post(tickets::create_ticket).get(tickets::list_tickets),
        )
        .route(
            "/tickets/{id}",
            get(tickets::get_ticket).delete(tickets::delete_ticket),
        )
        .route("/tickets/{id}/assign", post(tickets::assign_ticket))
        .route("/tickets/{id}/resolve", post(tickets::resolve_ticket))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
