use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::{
    middleware::logging,
    routes::{export, form, health, messages},
    state::AppState,
};

pub fn build_router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Submission
        .route("/", get(form::index))
        .route("/form", get(form::show_form))
        .route("/submit", post(form::submit))
        .route("/thanks", get(form::thanks))
        // Administration
        .route("/messages", get(messages::list_messages))
        .route(
            "/messages/edit/:id",
            get(messages::edit_form).post(messages::update_message),
        )
        .route("/messages/delete/:id", post(messages::delete_message))
        // Export
        .route("/export/csv", get(export::export_csv))
        .route("/export/pdf", get(export::export_pdf));

    let routes = match &state.config.server.static_dir {
        Some(dir) => routes.fallback_service(ServeDir::new(dir)),
        None => routes,
    };

    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    routes
        .layer(middleware::from_fn(logging::log_request))
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
