// src/config.rs

use std::{env, path::PathBuf};

use anyhow::Context;

use crate::{
    db::SnapshotRepository,
    services::{dashboard_service::DashboardService, view_service::ViewService},
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_OPEN_VIEWS: usize = 256;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    // Sem caminho, usa os snapshots embutidos no binário
    pub snapshot_path: Option<PathBuf>,
    pub max_open_views: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            snapshot_path: None,
            max_open_views: DEFAULT_MAX_OPEN_VIEWS,
        }
    }
}

impl AppConfig {
    /// Lê o `.env` (se existir) e as variáveis de ambiente.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let snapshot_path = env::var("SNAPSHOT_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let max_open_views = match env::var("MAX_OPEN_VIEWS") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("MAX_OPEN_VIEWS inválido: '{}'", raw))?,
            Err(_) => DEFAULT_MAX_OPEN_VIEWS,
        };

        Ok(Self { bind_addr, snapshot_path, max_open_views })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub view_service: ViewService,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let repo = SnapshotRepository::load(config.snapshot_path.as_deref()).await?;
        Ok(Self::with_repository(config, repo))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_repository(config: &AppConfig, repo: SnapshotRepository) -> Self {
        Self {
            dashboard_service: DashboardService::new(repo),
            view_service: ViewService::new(config.max_open_views),
        }
    }
}
