// src/dashboards/executive.rs

use crate::{
    common::format::NumberFormat,
    dashboards::{
        reports::{window_cards, windowed, ReportPeriod},
        Dashboard,
    },
    models::{
        dashboard::{DashboardModule, DerivedMetric, RenderNode, Unit},
        metrics::MetricSnapshot,
    },
    services::{
        calculator::{accuracy_ratio, derive_metric, health_score, metric, Measure, MetricDef, TierRule},
        classifier::{classify, MetricCategory},
        render::{self, BreakdownBars, RenderError, SeriesBars},
        selection::{selectable, Selectable, UiSelection},
    },
};

selectable! {
    pub enum ExecutiveTab {
        Overview => ("overview", "Overview"),
        Forecast => ("forecast", "Forecast"),
        Performance => ("performance", "Performance"),
    }
}

const TOTAL_REVENUE: MetricDef = MetricDef::new("Total Revenue", "totalRevenue", Unit::Currency)
    .compared_to("previousRevenue")
    .tiered(TierRule::Fact("monthlyGrowth", MetricCategory::Growth));

// Indicadores que entram na nota de saúde
const KPIS: &[MetricDef] = &[
    TOTAL_REVENUE,
    MetricDef::new("Total Orders", "totalOrders", Unit::Count)
        .compared_to("previousOrders")
        .tiered(TierRule::Change(MetricCategory::Growth)),
    MetricDef::new("Active Customers", "activeCustomers", Unit::Count)
        .compared_to("previousActiveCustomers")
        .tiered(TierRule::Change(MetricCategory::Growth)),
    MetricDef::new("Net Margin", "netMargin", Unit::Percent)
        .tiered(TierRule::Own(MetricCategory::ProfitMargin)),
    MetricDef::new("On-time Delivery", "onTimeDeliveryRate", Unit::Percent)
        .tiered(TierRule::Own(MetricCategory::OnTimeDelivery)),
    MetricDef::new("Customer Satisfaction", "customerSatisfaction", Unit::Rating)
        .tiered(TierRule::Own(MetricCategory::CustomerSatisfaction)),
    MetricDef::new("Avg Payment Days", "averagePaymentDays", Unit::Days)
        .tiered(TierRule::Own(MetricCategory::DaysToPay)),
];

fn kpi_metrics(snapshot: &MetricSnapshot, fmt: &NumberFormat) -> Vec<DerivedMetric> {
    KPIS.iter().map(|def| derive_metric(snapshot, def, fmt)).collect()
}

/// Nota de 0 a 100 a partir dos tiers dos indicadores que têm dados.
fn health(kpis: &[DerivedMetric], fmt: &NumberFormat) -> DerivedMetric {
    let tiers: Vec<_> = kpis.iter().filter_map(|m| m.tier).collect();
    let score = health_score(&tiers);
    let tier = score.value().map(|s| classify(MetricCategory::HealthScore, s));
    metric("Business Health", Unit::Rating, score, None, tier, fmt)
}

// Realizado no ano contra a previsão do ano
fn forecast_accuracy(snapshot: &MetricSnapshot, fmt: &NumberFormat) -> DerivedMetric {
    let accuracy = match (snapshot.fact("currentYearTotal"), snapshot.fact("forecastTotal")) {
        (Some(actual), Some(forecast)) => accuracy_ratio(actual, forecast),
        _ => Measure::Undefined,
    };
    let tier = accuracy.value().map(|a| classify(MetricCategory::ForecastAccuracy, a));
    metric("Forecast Accuracy", Unit::Ratio, accuracy, None, tier, fmt)
}

pub struct ExecutiveDashboard;

impl Dashboard for ExecutiveDashboard {
    type Tab = ExecutiveTab;
    type Filter = ReportPeriod;

    const MODULE: DashboardModule = DashboardModule::Executive;

    fn header(snapshot: &MetricSnapshot, fmt: &NumberFormat) -> Vec<RenderNode> {
        let kpis = kpi_metrics(snapshot, fmt);
        vec![
            RenderNode::MetricCard(derive_metric(snapshot, &TOTAL_REVENUE, fmt)),
            RenderNode::MetricCard(health(&kpis, fmt)),
        ]
    }

    fn panel(
        selection: &UiSelection<ExecutiveTab, ReportPeriod>,
        snapshot: &MetricSnapshot,
        fmt: &NumberFormat,
    ) -> Result<RenderNode, RenderError> {
        let period = selection.active_filter();

        match selection.active_tab() {
            ExecutiveTab::Overview => {
                let indicators = kpi_metrics(snapshot, fmt)
                    .into_iter()
                    .map(RenderNode::MetricCard)
                    .collect();
                let revenue = render::isolate(
                    "revenue",
                    windowed(snapshot, "revenue", period)
                        .map(|points| render::section(period.label(), window_cards("Period Revenue", points, fmt))),
                );
                Ok(render::section("Overview", vec![render::section("Key Indicators", indicators), revenue]))
            }
            ExecutiveTab::Forecast => {
                let against_target = render::isolate(
                    "revenue",
                    windowed(snapshot, "revenue", period).map(|points| {
                        render::section("Revenue vs Target", render::series_bars(points, SeriesBars::AgainstTarget, fmt))
                    }),
                );
                Ok(render::section(
                    "Forecast",
                    vec![RenderNode::MetricCard(forecast_accuracy(snapshot, fmt)), against_target],
                ))
            }
            ExecutiveTab::Performance => {
                let bars = render::breakdown_bars(snapshot, "regionalPerformance", BreakdownBars::ShareOfTotal, fmt)?;
                Ok(render::section("Regional Performance", bars))
            }
        }
    }
}
