// src/services/dashboard_service.rs

use crate::{
    common::{error::AppError, format::NumberFormat},
    dashboards::{
        describe, executive::ExecutiveDashboard, financial::FinancialDashboard, orders::OrdersDashboard,
        products::ProductsDashboard, render_view, reports::ReportsDashboard,
    },
    db::SnapshotRepository,
    models::dashboard::{DashboardModule, DashboardView, ModuleDescriptor},
    services::selection::ModuleSelection,
};

#[derive(Clone)]
pub struct DashboardService {
    repo: SnapshotRepository,
}

impl DashboardService {
    pub fn new(repo: SnapshotRepository) -> Self {
        Self { repo }
    }

    /// Catálogo dos painéis, com as abas e filtros de cada um.
    pub fn catalog(&self) -> Vec<ModuleDescriptor> {
        DashboardModule::ALL
            .iter()
            .map(|module| match module {
                DashboardModule::Financial => describe::<FinancialDashboard>(),
                DashboardModule::Orders => describe::<OrdersDashboard>(),
                DashboardModule::Products => describe::<ProductsDashboard>(),
                DashboardModule::Reports => describe::<ReportsDashboard>(),
                DashboardModule::Executive => describe::<ExecutiveDashboard>(),
            })
            .collect()
    }

    /// Renderiza a seleção atual sobre o snapshot do módulo. Sempre devolve uma árvore:
    /// falhas ficam restritas ao painel que falhou.
    pub fn render(&self, selection: &ModuleSelection, fmt: &NumberFormat) -> DashboardView {
        let snapshot = self.repo.snapshot(selection.module());

        match selection {
            ModuleSelection::Financial(s) => render_view::<FinancialDashboard>(snapshot, s, fmt),
            ModuleSelection::Orders(s) => render_view::<OrdersDashboard>(snapshot, s, fmt),
            ModuleSelection::Products(s) => render_view::<ProductsDashboard>(snapshot, s, fmt),
            ModuleSelection::Reports(s) => render_view::<ReportsDashboard>(snapshot, s, fmt),
            ModuleSelection::Executive(s) => render_view::<ExecutiveDashboard>(snapshot, s, fmt),
        }
    }

    /// Renderização sem estado: parte da seleção inicial e aplica aba/filtro pedidos.
    pub fn render_module(
        &self,
        module_id: &str,
        tab: Option<&str>,
        filter: Option<&str>,
        fmt: &NumberFormat,
    ) -> Result<DashboardView, AppError> {
        let module = DashboardModule::from_id(module_id)
            .ok_or_else(|| AppError::ModuleNotFound(module_id.to_string()))?;

        let mut selection = ModuleSelection::initial(module);
        selection.apply(tab, filter);

        Ok(self.render(&selection, fmt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service() -> DashboardService {
        DashboardService::new(SnapshotRepository::load(None).await.unwrap())
    }

    #[tokio::test]
    async fn rendering_is_idempotent() {
        let service = service().await;
        for module in DashboardModule::ALL {
            let selection = ModuleSelection::initial(*module);
            assert_eq!(
                service.render(&selection, &NumberFormat::EN),
                service.render(&selection, &NumberFormat::EN)
            );
        }
    }

    #[tokio::test]
    async fn switching_tabs_back_restores_the_same_tree() {
        let service = service().await;
        let mut selection = ModuleSelection::initial(DashboardModule::Financial);

        let first = service.render(&selection, &NumberFormat::EN);
        selection.apply(Some("credit"), None);
        let other = service.render(&selection, &NumberFormat::EN);
        selection.apply(Some("invoices"), None);
        let back = service.render(&selection, &NumberFormat::EN);

        assert_ne!(first, other);
        assert_eq!(first, back);
    }

    #[tokio::test]
    async fn header_is_the_same_on_every_tab() {
        let service = service().await;
        let mut selection = ModuleSelection::initial(DashboardModule::Orders);
        let header = service.render(&selection, &NumberFormat::EN).header;

        for tab in ["processing", "fulfillment", "returns"] {
            selection.apply(Some(tab), None);
            assert_eq!(service.render(&selection, &NumberFormat::EN).header, header);
        }
    }

    #[tokio::test]
    async fn unknown_module_is_not_found() {
        let service = service().await;
        let err = service.render_module("billing", None, None, &NumberFormat::EN).unwrap_err();
        assert!(matches!(err, AppError::ModuleNotFound(ref m) if m == "billing"));
    }

    #[tokio::test]
    async fn unknown_tab_and_filter_fall_back_to_first() {
        let service = service().await;
        let view = service
            .render_module("reports", Some("forecast"), Some("decade"), &NumberFormat::EN)
            .unwrap();
        assert_eq!(view.active_tab, "sales");
        assert_eq!(view.active_filter.as_deref(), Some("month"));
    }

    #[tokio::test]
    async fn catalog_lists_every_module_in_order() {
        let catalog = service().await.catalog();
        let modules: Vec<_> = catalog.iter().map(|d| d.module).collect();
        assert_eq!(modules, DashboardModule::ALL.to_vec());

        let executive = catalog.last().unwrap();
        assert_eq!(executive.tabs.len(), 3);
        assert_eq!(executive.filters.len(), 3);
        assert!(catalog[0].filters.is_empty());
    }

    #[test]
    fn module_without_snapshot_renders_no_data() {
        let service = DashboardService::new(SnapshotRepository::default());
        let view = service.render(&ModuleSelection::initial(DashboardModule::Products), &NumberFormat::EN);
        assert_eq!(view.captured_at, None);
        assert!(view.header.iter().all(|n| matches!(
            n,
            crate::models::dashboard::RenderNode::MetricCard(m) if m.value == "no data"
        )));
    }
}
