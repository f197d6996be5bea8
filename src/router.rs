// src/router.rs

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{config::AppState, handlers};

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        // Catálogo e renderização sem estado
        .route("/api/dashboards", get(handlers::dashboard::list_dashboards))
        .route("/api/dashboards/{module}", get(handlers::dashboard::get_dashboard))
        // Visualizações montadas: guardam a aba e o filtro entre requisições
        .route("/api/views", post(handlers::views::create_view))
        .route(
            "/api/views/{id}",
            get(handlers::views::get_view).delete(handlers::views::close_view),
        )
        .route("/api/views/{id}/selection", put(handlers::views::update_selection))
        .with_state(app_state)
}
