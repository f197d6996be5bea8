// src/handlers/views.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::i18n::Locale,
    models::dashboard::{CreateViewPayload, DashboardModule, UpdateSelectionPayload, ViewResponse},
    services::view_service::ViewSession,
};

fn respond(app_state: &AppState, session: ViewSession, locale: &Locale) -> ViewResponse {
    ViewResponse {
        id: session.id,
        opened_at: session.opened_at,
        view: app_state.dashboard_service.render(&session.selection, &locale.number_format()),
    }
}

// POST /api/views
pub async fn create_view(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateViewPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let module = DashboardModule::from_id(payload.module.trim())
        .ok_or_else(|| AppError::ModuleNotFound(payload.module.clone()))?;

    let session = app_state.view_service.open(module).await?;

    Ok((StatusCode::CREATED, Json(respond(&app_state, session, &locale))))
}

// GET /api/views/{id}
pub async fn get_view(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(view_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = app_state.view_service.get(view_id).await?;

    Ok((StatusCode::OK, Json(respond(&app_state, session, &locale))))
}

// PUT /api/views/{id}/selection
pub async fn update_selection(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(view_id): Path<Uuid>,
    Json(payload): Json<UpdateSelectionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = app_state
        .view_service
        .select(view_id, payload.tab.as_deref(), payload.filter.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(respond(&app_state, session, &locale))))
}

// DELETE /api/views/{id}
pub async fn close_view(
    State(app_state): State<AppState>,
    Path(view_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.view_service.close(view_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
