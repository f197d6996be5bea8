use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Painel '{0}' não encontrado")]
    ModuleNotFound(String),

    #[error("Visualização {0} não encontrada")]
    ViewNotFound(Uuid),

    #[error("Limite de {0} visualizações abertas atingido")]
    ViewLimitReached(usize),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::BTreeMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::ModuleNotFound(ref module) => (
                StatusCode::NOT_FOUND,
                format!("O painel '{}' não existe.", module),
            ),
            AppError::ViewNotFound(_) => (
                StatusCode::NOT_FOUND,
                "Visualização não encontrada ou já encerrada.".to_string(),
            ),
            AppError::ViewLimitReached(limit) => (
                StatusCode::TOO_MANY_REQUESTS,
                format!("Limite de {} visualizações abertas atingido.", limit),
            ),

            // O resto vira 500. O `tracing` loga a mensagem detalhada.
            ref e @ AppError::InternalServerError(_) => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
