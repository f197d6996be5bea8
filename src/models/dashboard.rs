// src/models/dashboard.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- Enums ---

/// Os painéis do admin. Cada um é uma instância do mesmo padrão (abas + métricas).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardModule {
    Financial,
    Orders,
    Products,
    Reports,
    Executive,
}

impl DashboardModule {
    pub const ALL: &'static [DashboardModule] = &[
        DashboardModule::Financial,
        DashboardModule::Orders,
        DashboardModule::Products,
        DashboardModule::Reports,
        DashboardModule::Executive,
    ];

    pub fn id(self) -> &'static str {
        match self {
            DashboardModule::Financial => "financial",
            DashboardModule::Orders => "orders",
            DashboardModule::Products => "products",
            DashboardModule::Reports => "reports",
            DashboardModule::Executive => "executive",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DashboardModule::Financial => "Financial Management",
            DashboardModule::Orders => "Order Management",
            DashboardModule::Products => "Product Management",
            DashboardModule::Reports => "Reports & Analytics",
            DashboardModule::Executive => "Executive Dashboard",
        }
    }

    // Módulo é rota: aqui não existe fallback, o handler responde 404.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.id().eq_ignore_ascii_case(id))
    }
}

/// Classificação qualitativa de uma métrica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Good,
    Warning,
    Critical,
}

impl Tier {
    pub fn color(self) -> &'static str {
        match self {
            Tier::Good => "#16a34a",
            Tier::Warning => "#d97706",
            Tier::Critical => "#dc2626",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Currency,
    Percent,
    Days,
    Count,
    Rating,
    Ratio,
}

// --- Structs ---

// Valor pronto para exibição, recalculado a cada render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetric {
    pub label: String,
    pub value: String,       // "$2,485,000", "32 days", "no data"
    pub raw_value: Option<f64>, // Sem clamp: 140% continua 140 aqui
    pub unit: Unit,
    pub change_vs_prior: Option<String>, // "+8.7%" ou "n/a"
    pub tier: Option<Tier>,
}

/// A árvore de render devolvida ao front-end.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RenderNode {
    Section {
        title: String,
        children: Vec<RenderNode>,
    },
    MetricCard(DerivedMetric),
    // Os "gráficos" do admin são barras de progresso
    ProgressBar {
        label: String,
        value: String,
        percent: f64, // largura da barra, sempre entre 0 e 100
        tier: Option<Tier>,
        color: Option<String>,
    },
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    // Sub-tela opaca (InvoiceManagement, ProductCatalog...)
    ChildPanel {
        panel: String,
    },
    Placeholder {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionItem {
    pub id: String,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub module: DashboardModule,
    pub title: String,
    pub captured_at: Option<DateTime<Utc>>,
    pub tabs: Vec<OptionItem>,
    pub filters: Vec<OptionItem>,
    pub active_tab: String,
    pub active_filter: Option<String>,
    pub header: Vec<RenderNode>, // Cards do topo, visíveis em todas as abas
    pub body: RenderNode,        // Painel da aba ativa
}

// Catálogo: GET /api/dashboards
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    pub module: DashboardModule,
    pub title: String,
    pub tabs: Vec<OptionItem>,
    pub filters: Vec<OptionItem>,
}

// Resposta das visualizações montadas (POST/GET/PUT /api/views)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    pub id: Uuid,
    pub opened_at: DateTime<Utc>,
    pub view: DashboardView,
}

// --- Payloads ---

// Query de GET /api/dashboards/{module}
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
    pub filter: Option<String>,
}

// POST /api/views
#[derive(Debug, Deserialize, Validate)]
pub struct CreateViewPayload {
    #[validate(length(min = 1, max = 32, message = "Informe o id do painel (até 32 caracteres)."))]
    pub module: String,
}

// PUT /api/views/{id}/selection. Campo ausente mantém a seleção atual.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateSelectionPayload {
    #[validate(length(min = 1, max = 32, message = "O id da aba deve ter entre 1 e 32 caracteres."))]
    pub tab: Option<String>,
    #[validate(length(min = 1, max = 32, message = "O id do filtro deve ter entre 1 e 32 caracteres."))]
    pub filter: Option<String>,
}
