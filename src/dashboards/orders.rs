// src/dashboards/orders.rs

use serde_json::Value;

use crate::{
    common::format::NumberFormat,
    dashboards::Dashboard,
    models::{
        dashboard::{DashboardModule, RenderNode, Unit},
        metrics::{MetricSnapshot, TableRow},
    },
    services::{
        calculator::{derive_metric, share_of, Measure, MetricDef, TierRule},
        classifier::MetricCategory,
        render::{self, Column, RenderError},
        selection::{selectable, Selectable, UiSelection},
    },
};

selectable! {
    pub enum OrderTab {
        Overview => ("overview", "Overview"),
        Processing => ("processing", "Processing"),
        Fulfillment => ("fulfillment", "Fulfillment"),
        Returns => ("returns", "Returns"),
    }
}

selectable! {
    /// Filtro de status da lista de pedidos recentes.
    pub enum OrderStatusFilter {
        All => ("all", "All Orders"),
        Pending => ("pending", "Pending"),
        Processing => ("processing", "Processing"),
        Shipped => ("shipped", "Shipped"),
        Delivered => ("delivered", "Delivered"),
    }
}

impl OrderStatusFilter {
    fn accepts(self, row: &TableRow) -> bool {
        match self {
            OrderStatusFilter::All => true,
            status => row
                .get("status")
                .and_then(Value::as_str)
                .is_some_and(|s| s.eq_ignore_ascii_case(status.id())),
        }
    }
}

const HEADER: &[MetricDef] = &[
    MetricDef::new("Total Orders", "totalOrders", Unit::Count)
        .compared_to("previousOrders")
        .tiered(TierRule::Change(MetricCategory::Growth)),
    MetricDef::new("Pending Orders", "pendingOrders", Unit::Count),
    MetricDef::new("Avg Order Value", "averageOrderValue", Unit::Currency)
        .compared_to("previousAverageOrderValue")
        .tiered(TierRule::Change(MetricCategory::Growth)),
    MetricDef::new("On-time Delivery", "onTimeDeliveryRate", Unit::Percent)
        .tiered(TierRule::Own(MetricCategory::OnTimeDelivery)),
];

// (rótulo, fato) das barras de status
const STATUS_FACTS: &[(&str, &str)] = &[
    ("Pending", "pendingOrders"),
    ("Processing", "processingOrders"),
    ("Shipped", "shippedOrders"),
    ("Delivered", "deliveredOrders"),
];

const ORDER_COLUMNS: &[Column] = &[
    Column::text("order", "Order"),
    Column::text("customer", "Customer"),
    Column::number("amount", "Amount", Unit::Currency),
    Column::text("status", "Status"),
    Column::text("date", "Date"),
];

const FULFILLMENT_CARDS: &[MetricDef] = &[
    MetricDef::new("Shipped Orders", "shippedOrders", Unit::Count),
    MetricDef::new("On-time Delivery", "onTimeDeliveryRate", Unit::Percent)
        .tiered(TierRule::Own(MetricCategory::OnTimeDelivery)),
    MetricDef::new("Avg Lead Time", "averageLeadTimeDays", Unit::Days),
];

const RETURN_CARDS: &[MetricDef] = &[
    MetricDef::new("Return Rate", "returnRate", Unit::Percent)
        .tiered(TierRule::Own(MetricCategory::ReturnRate)),
    MetricDef::new("Open Returns", "openReturns", Unit::Count),
    MetricDef::new("Refunded Amount", "refundedAmount", Unit::Currency),
];

pub struct OrdersDashboard;

impl Dashboard for OrdersDashboard {
    type Tab = OrderTab;
    type Filter = OrderStatusFilter;

    const MODULE: DashboardModule = DashboardModule::Orders;

    fn header(snapshot: &MetricSnapshot, fmt: &NumberFormat) -> Vec<RenderNode> {
        render::cards(snapshot, HEADER, fmt)
    }

    fn panel(
        selection: &UiSelection<OrderTab, OrderStatusFilter>,
        snapshot: &MetricSnapshot,
        fmt: &NumberFormat,
    ) -> Result<RenderNode, RenderError> {
        let node = match selection.active_tab() {
            OrderTab::Overview => {
                let filter = selection.active_filter();
                let orders = render::isolate(
                    "recentOrders",
                    render::table(snapshot, "recentOrders", ORDER_COLUMNS, |row| filter.accepts(row), fmt),
                );
                render::section(
                    "Overview",
                    vec![
                        render::section("Orders by Status", status_bars(snapshot, fmt)),
                        render::section("Recent Orders", vec![orders]),
                    ],
                )
            }
            OrderTab::Processing => render::section(
                "Processing",
                vec![
                    RenderNode::MetricCard(derive_metric(
                        snapshot,
                        &MetricDef::new("Orders in Processing", "processingOrders", Unit::Count),
                        fmt,
                    )),
                    render::child_panel("order-processing"),
                ],
            ),
            OrderTab::Fulfillment => {
                let mut children = render::cards(snapshot, FULFILLMENT_CARDS, fmt);
                children.push(render::child_panel("shipping-tracking"));
                render::section("Fulfillment", children)
            }
            OrderTab::Returns => {
                let mut children = render::cards(snapshot, RETURN_CARDS, fmt);
                children.push(render::child_panel("returns-management"));
                render::section("Returns", children)
            }
        };
        Ok(node)
    }
}

// Participação de cada status no total de pedidos
fn status_bars(snapshot: &MetricSnapshot, fmt: &NumberFormat) -> Vec<RenderNode> {
    let total = snapshot.fact("totalOrders");

    STATUS_FACTS
        .iter()
        .map(|(label, fact)| {
            let count = Measure::from_option(snapshot.fact(fact));
            let share = match (count, total) {
                (Measure::Value(count), Some(total)) => share_of(count, total),
                _ => Measure::Undefined,
            };
            render::progress_bar(label, count.display(Unit::Count, fmt), share, None)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dashboards::{fixtures, render_view},
        models::dashboard::{DashboardView, Tier},
    };

    fn view(selection: &UiSelection<OrderTab, OrderStatusFilter>) -> DashboardView {
        render_view::<OrdersDashboard>(&fixtures::snapshot("orders"), selection, &NumberFormat::EN)
    }

    fn table_rows(node: &RenderNode) -> Vec<Vec<String>> {
        match node {
            RenderNode::Table { rows, .. } => rows.clone(),
            RenderNode::Section { children, .. } => children.iter().flat_map(table_rows).collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn header_tiers_follow_growth_and_delivery_tables() {
        let view = view(&UiSelection::new());

        let orders = fixtures::card(&view.header, "Total Orders");
        assert_eq!(orders.value, "1,247");
        assert_eq!(orders.change_vs_prior.as_deref(), Some("+7.9%"));
        assert_eq!(orders.tier, Some(Tier::Good));

        let delivery = fixtures::card(&view.header, "On-time Delivery");
        assert_eq!(delivery.value, "94.2%");
        assert_eq!(delivery.tier, Some(Tier::Warning));
    }

    #[test]
    fn status_filter_narrows_recent_orders() {
        let mut selection = UiSelection::new();
        assert_eq!(table_rows(&view(&selection).body).len(), 6);

        selection.select_filter(OrderStatusFilter::Pending);
        let rows = table_rows(&view(&selection).body);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row[3] == "pending"));

        assert_eq!(view(&selection).active_filter.as_deref(), Some("pending"));
    }

    #[test]
    fn filter_without_matches_shows_placeholder_for_the_table_only() {
        let snapshot: MetricSnapshot = serde_json::from_value(serde_json::json!({
            "facts": { "totalOrders": 10, "pendingOrders": 4 },
            "tables": { "recentOrders": [ { "order": "ORD-1", "status": "pending" } ] }
        }))
        .unwrap();
        let mut selection = UiSelection::new();
        selection.select_filter(OrderStatusFilter::Delivered);

        let view = render_view::<OrdersDashboard>(&snapshot, &selection, &NumberFormat::EN);

        assert_eq!(fixtures::count_kind(&view.body, "placeholder"), 1);
        assert_eq!(fixtures::count_kind(&view.body, "progressBar"), 4);
    }

    #[test]
    fn status_bars_are_shares_of_total_orders() {
        let bars = status_bars(&fixtures::snapshot("orders"), &NumberFormat::EN);
        let delivered = bars.last().unwrap();
        match delivered {
            RenderNode::ProgressBar { label, value, percent, .. } => {
                assert_eq!(label, "Delivered");
                assert_eq!(value, "660");
                assert!((percent - 52.9270).abs() < 0.001);
            }
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn returns_tab_classifies_return_rate() {
        let mut selection = UiSelection::new();
        selection.select_tab(OrderTab::Returns);
        let view = view(&selection);

        let rate = fixtures::card(std::slice::from_ref(&view.body), "Return Rate");
        assert_eq!(rate.tier, Some(Tier::Warning));
        assert_eq!(fixtures::child_panels(&view.body), vec!["returns-management".to_string()]);
    }

    #[test]
    fn filter_options_are_exposed() {
        let view = view(&UiSelection::new());
        let ids: Vec<&str> = view.filters.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["all", "pending", "processing", "shipped", "delivered"]);
        assert_eq!(OrderStatusFilter::parse_or_first("cancelled"), OrderStatusFilter::All);
    }
}
