// src/handlers/dashboard.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::i18n::Locale,
    models::dashboard::DashboardQuery,
};

// GET /api/dashboards
pub async fn list_dashboards(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.dashboard_service.catalog())
}

// GET /api/dashboards/{module}?tab=&filter=
// Renderização sem estado: a seleção vem inteira na query
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(module): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let view = app_state.dashboard_service.render_module(
        &module,
        query.tab.as_deref(),
        query.filter.as_deref(),
        &locale.number_format(),
    )?;

    Ok((StatusCode::OK, Json(view)))
}
