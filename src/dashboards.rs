// src/dashboards.rs

pub mod executive;
pub mod financial;
pub mod orders;
pub mod products;
pub mod reports;

use crate::{
    common::format::NumberFormat,
    models::{
        dashboard::{DashboardModule, DashboardView, ModuleDescriptor, RenderNode},
        metrics::MetricSnapshot,
    },
    services::{
        render::{isolate, RenderError},
        selection::{Selectable, UiSelection},
    },
};

/// Um painel do admin: abas fixas, filtro opcional, cards de topo e um painel por aba.
pub trait Dashboard {
    type Tab: Selectable;
    type Filter: Selectable;

    const MODULE: DashboardModule;

    /// Cards do topo, iguais em todas as abas.
    fn header(snapshot: &MetricSnapshot, fmt: &NumberFormat) -> Vec<RenderNode>;

    /// Conteúdo da aba ativa.
    fn panel(
        selection: &UiSelection<Self::Tab, Self::Filter>,
        snapshot: &MetricSnapshot,
        fmt: &NumberFormat,
    ) -> Result<RenderNode, RenderError>;
}

/// Projeção pura de (snapshot, seleção, formato) na árvore de render.
pub fn render_view<D: Dashboard>(
    snapshot: &MetricSnapshot,
    selection: &UiSelection<D::Tab, D::Filter>,
    fmt: &NumberFormat,
) -> DashboardView {
    let tab = selection.active_tab();
    let has_filter = UiSelection::<D::Tab, D::Filter>::has_filter();

    DashboardView {
        module: D::MODULE,
        title: D::MODULE.title().to_string(),
        captured_at: snapshot.captured_at,
        tabs: D::Tab::options(tab),
        filters: if has_filter { D::Filter::options(selection.active_filter()) } else { Vec::new() },
        active_tab: tab.id().to_string(),
        active_filter: has_filter.then(|| selection.active_filter().id().to_string()),
        header: D::header(snapshot, fmt),
        body: isolate(tab.id(), D::panel(selection, snapshot, fmt)),
    }
}

pub fn describe<D: Dashboard>() -> ModuleDescriptor {
    let has_filter = UiSelection::<D::Tab, D::Filter>::has_filter();
    ModuleDescriptor {
        module: D::MODULE,
        title: D::MODULE.title().to_string(),
        tabs: D::Tab::options(D::Tab::first()),
        filters: if has_filter { D::Filter::options(D::Filter::first()) } else { Vec::new() },
    }
}
