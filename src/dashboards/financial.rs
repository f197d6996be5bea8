// src/dashboards/financial.rs

use crate::{
    common::format::NumberFormat,
    dashboards::Dashboard,
    models::{
        dashboard::{DashboardModule, DerivedMetric, RenderNode, Unit},
        metrics::MetricSnapshot,
    },
    services::{
        calculator::{metric, share_of, Measure, MetricDef, TierRule},
        classifier::{classify, MetricCategory},
        render::{self, BreakdownBars, Column, RenderError},
        selection::{selectable, NoFilter, UiSelection},
    },
};

selectable! {
    pub enum FinanceTab {
        Invoices => ("invoices", "Invoices"),
        Payments => ("payments", "Payments"),
        Credit => ("credit", "Credit"),
        Reporting => ("reporting", "Reporting"),
    }
}

const HEADER: &[MetricDef] = &[
    MetricDef::new("Total Revenue", "totalRevenue", Unit::Currency)
        .compared_to("previousRevenue")
        .tiered(TierRule::Fact("monthlyGrowth", MetricCategory::Growth)),
    MetricDef::new("Pending Invoices", "pendingInvoices", Unit::Count),
    // O valor vencido vem do snapshot; o tier vem da razão vencido / a receber
    MetricDef::new("Overdue Amount", "overdueAmount", Unit::Currency)
        .tiered(TierRule::Fact("overdueRatio", MetricCategory::OverdueRatio)),
    MetricDef::new("Avg Payment Days", "averagePaymentDays", Unit::Days)
        .tiered(TierRule::Own(MetricCategory::DaysToPay)),
];

const INVOICE_CARDS: &[MetricDef] = &[
    MetricDef::new("Pending Amount", "pendingAmount", Unit::Currency),
    MetricDef::new("Overdue Invoices", "overdueCount", Unit::Count),
];

const INVOICE_COLUMNS: &[Column] = &[
    Column::text("invoice", "Invoice"),
    Column::text("customer", "Customer"),
    Column::number("amount", "Amount", Unit::Currency),
    Column::text("dueDate", "Due Date"),
    Column::text("status", "Status"),
];

const PAYMENT_CARDS: &[MetricDef] = &[
    MetricDef::new("Collected This Month", "collectedThisMonth", Unit::Currency)
        .compared_to("previousCollected")
        .tiered(TierRule::Change(MetricCategory::Growth)),
    MetricDef::new("Cash on Hand", "cashOnHand", Unit::Currency),
];

const CREDIT_CARDS: &[MetricDef] = &[
    MetricDef::new("Total Credit Limit", "creditLimitTotal", Unit::Currency),
    MetricDef::new("Customers on Credit Hold", "customersOnCreditHold", Unit::Count),
];

pub struct FinancialDashboard;

impl Dashboard for FinancialDashboard {
    type Tab = FinanceTab;
    type Filter = NoFilter;

    const MODULE: DashboardModule = DashboardModule::Financial;

    fn header(snapshot: &MetricSnapshot, fmt: &NumberFormat) -> Vec<RenderNode> {
        render::cards(snapshot, HEADER, fmt)
    }

    fn panel(
        selection: &UiSelection<FinanceTab, NoFilter>,
        snapshot: &MetricSnapshot,
        fmt: &NumberFormat,
    ) -> Result<RenderNode, RenderError> {
        let node = match selection.active_tab() {
            FinanceTab::Invoices => {
                let mut children = render::cards(snapshot, INVOICE_CARDS, fmt);
                children.push(render::isolate(
                    "recentInvoices",
                    render::table(snapshot, "recentInvoices", INVOICE_COLUMNS, |_| true, fmt),
                ));
                children.push(render::child_panel("invoice-management"));
                render::section("Invoices", children)
            }
            FinanceTab::Payments => {
                let mut children = render::cards(snapshot, PAYMENT_CARDS, fmt);
                children.push(render::child_panel("payment-tracking"));
                render::section("Payments", children)
            }
            FinanceTab::Credit => {
                let mut children = vec![RenderNode::MetricCard(credit_utilization(snapshot, fmt))];
                children.extend(render::cards(snapshot, CREDIT_CARDS, fmt));
                children.push(render::child_panel("credit-management"));
                render::section("Credit", children)
            }
            FinanceTab::Reporting => {
                let bars = match render::breakdown_bars(snapshot, "revenueByCategory", BreakdownBars::ShareOfTotal, fmt) {
                    Ok(bars) => render::section("Revenue by Category", bars),
                    Err(e) => render::isolate("revenueByCategory", Err(e)),
                };
                render::section("Reporting", vec![bars, render::child_panel("financial-reports")])
            }
        };
        Ok(node)
    }
}

// Crédito usado / limite total
fn credit_utilization(snapshot: &MetricSnapshot, fmt: &NumberFormat) -> DerivedMetric {
    let measure = match (snapshot.fact("creditUsed"), snapshot.fact("creditLimitTotal")) {
        (Some(used), Some(limit)) => share_of(used, limit),
        _ => Measure::Undefined,
    };
    let tier = measure.value().map(|v| classify(MetricCategory::CreditUtilization, v));
    metric("Credit Utilization", Unit::Percent, measure, None, tier, fmt)
}
