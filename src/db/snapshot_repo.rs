// src/db/snapshot_repo.rs

use std::{collections::HashMap, path::Path, sync::Arc};

use anyhow::Context;

use crate::models::{dashboard::DashboardModule, metrics::MetricSnapshot};

// Snapshots de demonstração que acompanham o binário
const BUNDLED_SNAPSHOTS: &str = include_str!("../../data/snapshots.json");

/// Fonte única das métricas. Carregada uma vez na subida e nunca reescrita.
#[derive(Clone, Debug, Default)]
pub struct SnapshotRepository {
    snapshots: Arc<HashMap<DashboardModule, MetricSnapshot>>,
    empty: Arc<MetricSnapshot>,
}

impl SnapshotRepository {
    pub fn from_map(snapshots: HashMap<DashboardModule, MetricSnapshot>) -> Self {
        Self {
            snapshots: Arc::new(snapshots),
            empty: Arc::new(MetricSnapshot::default()),
        }
    }

    /// Lê o arquivo informado ou, sem caminho, os snapshots embutidos.
    pub async fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let raw = match path {
            Some(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Falha ao ler os snapshots em {}", path.display()))?,
            None => BUNDLED_SNAPSHOTS.to_string(),
        };

        let repo = Self::from_json(&raw)?;
        tracing::info!(
            "✅ Snapshots carregados ({} módulos, origem: {})",
            repo.snapshots.len(),
            path.map_or_else(|| "embutido".to_string(), |p| p.display().to_string())
        );
        Ok(repo)
    }

    /// Objeto JSON `{ "<módulo>": MetricSnapshot }`. Chaves desconhecidas são ignoradas e
    /// um módulo malformado vira snapshot vazio; só o documento inteiro inválido é erro.
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let parsed: HashMap<String, serde_json::Value> =
            serde_json::from_str(raw).context("Snapshots em formato inválido")?;

        let mut snapshots = HashMap::new();
        for (key, value) in parsed {
            let Some(module) = DashboardModule::from_id(&key) else {
                tracing::warn!(module = %key, "Snapshot de módulo desconhecido ignorado");
                continue;
            };
            match serde_json::from_value::<MetricSnapshot>(value) {
                Ok(snapshot) => {
                    snapshots.insert(module, snapshot);
                }
                Err(e) => tracing::warn!(module = module.id(), error = %e, "Snapshot malformado, módulo sem dados"),
            }
        }

        for module in DashboardModule::ALL {
            if !snapshots.contains_key(module) {
                tracing::warn!(module = module.id(), "Módulo sem snapshot, painéis vão mostrar 'no data'");
            }
        }

        Ok(Self::from_map(snapshots))
    }

    // Módulo sem snapshot rende como snapshot vazio
    pub fn snapshot(&self, module: DashboardModule) -> &MetricSnapshot {
        self.snapshots.get(&module).unwrap_or(&self.empty)
    }
}
