// src/services/selection.rs

use crate::{
    dashboards::{
        executive::ExecutiveDashboard, financial::FinancialDashboard, orders::OrdersDashboard,
        products::ProductsDashboard, reports::ReportsDashboard, Dashboard,
    },
    models::dashboard::{DashboardModule, OptionItem},
};

/// Enum fechado de opções selecionáveis (abas, filtros, categorias).
///
/// `ALL` nunca é vazio: a primeira opção é o estado inicial e também o
/// fallback para ids desconhecidos.
pub trait Selectable: Copy + Eq + std::fmt::Debug + Send + Sync + 'static {
    const ALL: &'static [Self];

    fn id(self) -> &'static str;
    fn label(self) -> &'static str;

    fn first() -> Self {
        Self::ALL[0]
    }

    fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL.iter().copied().find(|option| option.id().eq_ignore_ascii_case(id))
    }

    fn parse_or_first(id: &str) -> Self {
        Self::from_id(id).unwrap_or_else(|| {
            tracing::debug!(id, fallback = Self::first().id(), "Opção desconhecida, usando a primeira");
            Self::first()
        })
    }

    fn options(active: Self) -> Vec<OptionItem> {
        Self::ALL
            .iter()
            .map(|option| OptionItem {
                id: option.id().to_string(),
                label: option.label().to_string(),
                active: *option == active,
            })
            .collect()
    }
}

// Gera o enum e a implementação de `Selectable` a partir da lista (variante => (id, rótulo)).
macro_rules! selectable {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => ($id:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::services::selection::Selectable for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn id(self) -> &'static str {
                match self {
                    $($name::$variant => $id),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }
    };
}
pub(crate) use selectable;

selectable! {
    /// Filtro dos painéis que não têm filtro.
    pub enum NoFilter {
        All => ("all", "All"),
    }
}

// ---
// UISelection: a única peça de estado local de um painel
// ---
// Máquina de estados simples: começa na primeira aba, muda só por ação do usuário,
// sem histórico e sem transições automáticas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiSelection<T, F> {
    active_tab: T,
    active_filter: F,
}

impl<T: Selectable, F: Selectable> Default for UiSelection<T, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Selectable, F: Selectable> UiSelection<T, F> {
    pub fn new() -> Self {
        Self {
            active_tab: T::first(),
            active_filter: F::first(),
        }
    }

    pub fn active_tab(&self) -> T {
        self.active_tab
    }

    pub fn active_filter(&self) -> F {
        self.active_filter
    }

    /// Só faz sentido mostrar filtros quando há mais de uma opção.
    pub fn has_filter() -> bool {
        F::ALL.len() > 1
    }

    pub fn select_tab(&mut self, tab: T) {
        self.active_tab = tab;
    }

    pub fn select_tab_id(&mut self, id: &str) -> T {
        self.active_tab = T::parse_or_first(id);
        self.active_tab
    }

    pub fn select_filter(&mut self, filter: F) {
        self.active_filter = filter;
    }

    pub fn select_filter_id(&mut self, id: &str) -> F {
        self.active_filter = F::parse_or_first(id);
        self.active_filter
    }

    pub fn apply(&mut self, tab: Option<&str>, filter: Option<&str>) {
        if let Some(tab) = tab {
            self.select_tab_id(tab);
        }
        if let Some(filter) = filter {
            self.select_filter_id(filter);
        }
    }
}

/// Seleção de um painel específico: união fechada sobre os módulos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleSelection {
    Financial(UiSelection<<FinancialDashboard as Dashboard>::Tab, <FinancialDashboard as Dashboard>::Filter>),
    Orders(UiSelection<<OrdersDashboard as Dashboard>::Tab, <OrdersDashboard as Dashboard>::Filter>),
    Products(UiSelection<<ProductsDashboard as Dashboard>::Tab, <ProductsDashboard as Dashboard>::Filter>),
    Reports(UiSelection<<ReportsDashboard as Dashboard>::Tab, <ReportsDashboard as Dashboard>::Filter>),
    Executive(UiSelection<<ExecutiveDashboard as Dashboard>::Tab, <ExecutiveDashboard as Dashboard>::Filter>),
}

impl ModuleSelection {
    pub fn initial(module: DashboardModule) -> Self {
        match module {
            DashboardModule::Financial => ModuleSelection::Financial(UiSelection::new()),
            DashboardModule::Orders => ModuleSelection::Orders(UiSelection::new()),
            DashboardModule::Products => ModuleSelection::Products(UiSelection::new()),
            DashboardModule::Reports => ModuleSelection::Reports(UiSelection::new()),
            DashboardModule::Executive => ModuleSelection::Executive(UiSelection::new()),
        }
    }

    pub fn module(&self) -> DashboardModule {
        match self {
            ModuleSelection::Financial(_) => DashboardModule::Financial,
            ModuleSelection::Orders(_) => DashboardModule::Orders,
            ModuleSelection::Products(_) => DashboardModule::Products,
            ModuleSelection::Reports(_) => DashboardModule::Reports,
            ModuleSelection::Executive(_) => DashboardModule::Executive,
        }
    }

    pub fn apply(&mut self, tab: Option<&str>, filter: Option<&str>) {
        match self {
            ModuleSelection::Financial(selection) => selection.apply(tab, filter),
            ModuleSelection::Orders(selection) => selection.apply(tab, filter),
            ModuleSelection::Products(selection) => selection.apply(tab, filter),
            ModuleSelection::Reports(selection) => selection.apply(tab, filter),
            ModuleSelection::Executive(selection) => selection.apply(tab, filter),
        }
    }

    pub fn active_tab_id(&self) -> &'static str {
        match self {
            ModuleSelection::Financial(selection) => selection.active_tab().id(),
            ModuleSelection::Orders(selection) => selection.active_tab().id(),
            ModuleSelection::Products(selection) => selection.active_tab().id(),
            ModuleSelection::Reports(selection) => selection.active_tab().id(),
            ModuleSelection::Executive(selection) => selection.active_tab().id(),
        }
    }
}
