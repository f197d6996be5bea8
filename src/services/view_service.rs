// src/services/view_service.rs

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::dashboard::DashboardModule,
    services::selection::ModuleSelection,
};

/// Um painel montado: a seleção vive enquanto a visualização estiver aberta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSession {
    pub id: Uuid,
    pub opened_at: DateTime<Utc>,
    pub selection: ModuleSelection,
}

// Registro em memória das visualizações abertas
#[derive(Clone)]
pub struct ViewService {
    views: Arc<RwLock<HashMap<Uuid, ViewSession>>>,
    max_open: usize,
}

impl ViewService {
    pub fn new(max_open: usize) -> Self {
        Self {
            views: Arc::new(RwLock::new(HashMap::new())),
            max_open,
        }
    }

    /// Monta um painel na aba e filtro iniciais.
    pub async fn open(&self, module: DashboardModule) -> Result<ViewSession, AppError> {
        let mut views = self.views.write().await;
        if views.len() >= self.max_open {
            tracing::warn!(limit = self.max_open, "Limite de visualizações abertas atingido");
            return Err(AppError::ViewLimitReached(self.max_open));
        }

        let session = ViewSession {
            id: Uuid::new_v4(),
            opened_at: Utc::now(),
            selection: ModuleSelection::initial(module),
        };
        views.insert(session.id, session);

        tracing::info!(view = %session.id, module = module.id(), open = views.len(), "Visualização aberta");
        Ok(session)
    }

    pub async fn get(&self, id: Uuid) -> Result<ViewSession, AppError> {
        self.views
            .read()
            .await
            .get(&id)
            .copied()
            .ok_or(AppError::ViewNotFound(id))
    }

    /// Troca de aba e/ou filtro. Ids desconhecidos voltam para a primeira opção.
    pub async fn select(&self, id: Uuid, tab: Option<&str>, filter: Option<&str>) -> Result<ViewSession, AppError> {
        let mut views = self.views.write().await;
        let session = views.get_mut(&id).ok_or(AppError::ViewNotFound(id))?;

        session.selection.apply(tab, filter);
        tracing::debug!(view = %id, tab = session.selection.active_tab_id(), "Seleção alterada");

        Ok(*session)
    }

    // Desmontar descarta a seleção
    pub async fn close(&self, id: Uuid) -> Result<(), AppError> {
        let mut views = self.views.write().await;
        if views.remove(&id).is_none() {
            return Err(AppError::ViewNotFound(id));
        }
        tracing::info!(view = %id, open = views.len(), "Visualização encerrada");
        Ok(())
    }
}
