// src/dashboards/reports.rs

use crate::{
    common::format::NumberFormat,
    dashboards::Dashboard,
    models::{
        dashboard::{DashboardModule, RenderNode, Unit},
        metrics::{MetricSnapshot, SeriesPoint, TimeSeries},
    },
    services::{
        calculator::{self, metric, percent_change, point_comparison, point_target, Measure, MetricDef, TierRule},
        classifier::{classify, MetricCategory},
        render::{self, BreakdownBars, RenderError, SeriesBars},
        selection::{selectable, UiSelection},
    },
};

selectable! {
    pub enum ReportTab {
        Sales => ("sales", "Sales"),
        Customers => ("customers", "Customers"),
        Inventory => ("inventory", "Inventory"),
        Financial => ("financial", "Financial"),
    }
}

selectable! {
    /// Janela de análise sobre as séries mensais.
    pub enum ReportPeriod {
        Month => ("month", "This Month"),
        Quarter => ("quarter", "This Quarter"),
        Year => ("year", "This Year"),
    }
}

impl ReportPeriod {
    pub fn months(self) -> usize {
        match self {
            ReportPeriod::Month => 1,
            ReportPeriod::Quarter => 3,
            ReportPeriod::Year => 12,
        }
    }

    /// Os últimos pontos da série que caem na janela.
    pub fn window(self, series: &TimeSeries) -> &[SeriesPoint] {
        series.last(self.months())
    }
}

/// Busca a série e recorta a janela do período. Série ausente ou vazia é erro do painel.
pub fn windowed<'a>(
    snapshot: &'a MetricSnapshot,
    key: &'static str,
    period: ReportPeriod,
) -> Result<&'a [SeriesPoint], RenderError> {
    let series = snapshot.series(key).ok_or(RenderError::MissingSeries(key))?;
    if series.is_empty() {
        return Err(RenderError::EmptySeries(key));
    }
    Ok(period.window(series))
}

/// Cards de uma janela: total contra o mesmo período anterior e atingimento da meta.
pub fn window_cards(label: &str, points: &[SeriesPoint], fmt: &NumberFormat) -> Vec<RenderNode> {
    let total = calculator::sum(points);

    let change = match (total, calculator::sum_of(points, point_comparison)) {
        (Measure::Value(current), Measure::Value(prior)) => percent_change(current, prior),
        _ => Measure::Undefined,
    };
    let growth_tier = change.value().map(|c| classify(MetricCategory::Growth, c));

    let attainment = match (total, calculator::sum_of(points, point_target)) {
        (Measure::Value(actual), Measure::Value(target)) => calculator::share_of(actual, target),
        _ => Measure::Undefined,
    };
    let attainment_tier = attainment.value().map(|a| classify(MetricCategory::TargetAttainment, a));

    vec![
        RenderNode::MetricCard(metric(label, Unit::Currency, total, Some(change), growth_tier, fmt)),
        RenderNode::MetricCard(metric("Target Attainment", Unit::Ratio, attainment, None, attainment_tier, fmt)),
    ]
}

const CUSTOMER_CARDS: &[MetricDef] = &[
    MetricDef::new("New Customers", "newCustomers", Unit::Count)
        .compared_to("previousNewCustomers")
        .tiered(TierRule::Change(MetricCategory::Growth)),
    MetricDef::new("Active Customers", "activeCustomers", Unit::Count),
    MetricDef::new("Customer Satisfaction", "customerSatisfaction", Unit::Rating)
        .tiered(TierRule::Own(MetricCategory::CustomerSatisfaction)),
    MetricDef::new("Repeat Purchase Rate", "repeatPurchaseRate", Unit::Percent),
];

const INVENTORY_CARDS: &[MetricDef] = &[
    MetricDef::new("Inventory Turnover", "inventoryTurnover", Unit::Rating),
    MetricDef::new("Days of Stock", "daysOfStock", Unit::Days)
        .tiered(TierRule::Own(MetricCategory::StockCover)),
];

const FINANCIAL_CARDS: &[MetricDef] = &[
    MetricDef::new("Gross Margin", "grossMargin", Unit::Percent)
        .tiered(TierRule::Own(MetricCategory::ProfitMargin)),
    MetricDef::new("Net Margin", "netMargin", Unit::Percent)
        .tiered(TierRule::Own(MetricCategory::ProfitMargin)),
    MetricDef::new("Operating Expenses", "operatingExpenses", Unit::Currency)
        .compared_to("previousOperatingExpenses"),
];

pub struct ReportsDashboard;

impl Dashboard for ReportsDashboard {
    type Tab = ReportTab;
    type Filter = ReportPeriod;

    const MODULE: DashboardModule = DashboardModule::Reports;

    // Relatórios não têm cards fixos: tudo depende da aba e do período
    fn header(_snapshot: &MetricSnapshot, _fmt: &NumberFormat) -> Vec<RenderNode> {
        Vec::new()
    }

    fn panel(
        selection: &UiSelection<ReportTab, ReportPeriod>,
        snapshot: &MetricSnapshot,
        fmt: &NumberFormat,
    ) -> Result<RenderNode, RenderError> {
        match selection.active_tab() {
            ReportTab::Sales => {
                let window = windowed(snapshot, "sales", selection.active_filter());

                // Sem a série, somem o resumo e as barras mensais; as categorias continuam
                let summary = render::isolate(
                    "salesSummary",
                    window.clone().map(|points| {
                        let mut cards = window_cards("Period Sales", points, fmt);
                        cards.extend([
                            RenderNode::MetricCard(metric("Avg Monthly Sales", Unit::Currency, calculator::average(points), None, None, fmt)),
                            RenderNode::MetricCard(metric("Best Month", Unit::Currency, calculator::max(points), None, None, fmt)),
                            RenderNode::MetricCard(metric("Weakest Month", Unit::Currency, calculator::min(points), None, None, fmt)),
                        ]);
                        render::section("Summary", cards)
                    }),
                );
                let monthly = render::isolate(
                    "monthlySales",
                    window.map(|points| {
                        render::section("Monthly Sales", render::series_bars(points, SeriesBars::RelativeToMax, fmt))
                    }),
                );
                let categories = render::isolate(
                    "salesByCategory",
                    render::breakdown_bars(snapshot, "salesByCategory", BreakdownBars::ShareOfTotal, fmt)
                        .map(|bars| render::section("Sales by Category", bars)),
                );

                Ok(render::section("Sales", vec![summary, monthly, categories]))
            }
            ReportTab::Customers => {
                let mut children = render::cards(snapshot, CUSTOMER_CARDS, fmt);
                children.push(render::isolate(
                    "customersBySegment",
                    render::breakdown_bars(snapshot, "customersBySegment", BreakdownBars::ShareOfTotal, fmt)
                        .map(|bars| render::section("Revenue by Segment", bars)),
                ));
                Ok(render::section("Customers", children))
            }
            ReportTab::Inventory => {
                let mut children = render::cards(snapshot, INVENTORY_CARDS, fmt);
                children.push(render::child_panel("inventory-report"));
                Ok(render::section("Inventory", children))
            }
            ReportTab::Financial => {
                let mut children = render::cards(snapshot, FINANCIAL_CARDS, fmt);
                children.push(render::child_panel("financial-statements"));
                Ok(render::section("Financial", children))
            }
        }
    }
}
