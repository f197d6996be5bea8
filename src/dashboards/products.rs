// src/dashboards/products.rs

use crate::{
    common::format::NumberFormat,
    dashboards::Dashboard,
    models::{
        dashboard::{DashboardModule, RenderNode, Unit},
        metrics::MetricSnapshot,
    },
    services::{
        calculator::{MetricDef, TierRule},
        classifier::MetricCategory,
        render::{self, BreakdownBars, Column, RenderError},
        selection::{selectable, NoFilter, UiSelection},
    },
};

selectable! {
    pub enum ProductTab {
        Catalog => ("catalog", "Catalog"),
        Inventory => ("inventory", "Inventory"),
        Pricing => ("pricing", "Pricing"),
        Suppliers => ("suppliers", "Suppliers"),
    }
}

const HEADER: &[MetricDef] = &[
    MetricDef::new("Total Products", "totalProducts", Unit::Count),
    MetricDef::new("Active Products", "activeProducts", Unit::Count),
    MetricDef::new("Low Stock Items", "lowStockItems", Unit::Count),
    MetricDef::new("Avg Margin", "averageMargin", Unit::Percent)
        .tiered(TierRule::Own(MetricCategory::ProfitMargin)),
];

const INVENTORY_CARDS: &[MetricDef] = &[
    MetricDef::new("Inventory Value", "inventoryValue", Unit::Currency)
        .compared_to("previousInventoryValue"),
    MetricDef::new("Out of Stock", "outOfStock", Unit::Count),
    MetricDef::new("Days of Stock", "daysOfStock", Unit::Days)
        .tiered(TierRule::Own(MetricCategory::StockCover)),
];

const LOW_STOCK_COLUMNS: &[Column] = &[
    Column::text("sku", "SKU"),
    Column::text("name", "Product"),
    Column::number("onHand", "On Hand", Unit::Count),
    Column::number("reorderPoint", "Reorder Point", Unit::Count),
    Column::text("supplier", "Supplier"),
];

const SUPPLIER_CARDS: &[MetricDef] = &[
    MetricDef::new("Suppliers", "supplierCount", Unit::Count),
    MetricDef::new("Supplier On-time Rate", "supplierOnTimeRate", Unit::Percent)
        .tiered(TierRule::Own(MetricCategory::OnTimeDelivery)),
];

pub struct ProductsDashboard;

impl Dashboard for ProductsDashboard {
    type Tab = ProductTab;
    type Filter = NoFilter;

    const MODULE: DashboardModule = DashboardModule::Products;

    fn header(snapshot: &MetricSnapshot, fmt: &NumberFormat) -> Vec<RenderNode> {
        render::cards(snapshot, HEADER, fmt)
    }

    fn panel(
        selection: &UiSelection<ProductTab, NoFilter>,
        snapshot: &MetricSnapshot,
        fmt: &NumberFormat,
    ) -> Result<RenderNode, RenderError> {
        match selection.active_tab() {
            ProductTab::Catalog => Ok(render::section("Catalog", vec![render::child_panel("product-catalog")])),
            ProductTab::Inventory => {
                let mut children = render::cards(snapshot, INVENTORY_CARDS, fmt);
                children.push(render::isolate(
                    "stockByCategory",
                    render::breakdown_bars(snapshot, "stockByCategory", BreakdownBars::ShareOfTotal, fmt)
                        .map(|bars| render::section("Stock by Category", bars)),
                ));
                children.push(render::isolate(
                    "lowStock",
                    render::table(snapshot, "lowStock", LOW_STOCK_COLUMNS, |_| true, fmt)
                        .map(|table| render::section("Low Stock", vec![table])),
                ));
                Ok(render::section("Inventory", children))
            }
            // A aba de preços é só o detalhamento de margens: sem ele, não há o que mostrar
            ProductTab::Pricing => {
                let bars = render::breakdown_bars(
                    snapshot,
                    "marginByCategory",
                    BreakdownBars::Rate(MetricCategory::ProfitMargin),
                    fmt,
                )?;
                Ok(render::section("Margin by Category", bars))
            }
            ProductTab::Suppliers => {
                let mut children = render::cards(snapshot, SUPPLIER_CARDS, fmt);
                children.push(render::child_panel("supplier-management"));
                Ok(render::section("Suppliers", children))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dashboards::{fixtures, render_view},
        models::dashboard::{DashboardView, Tier},
        services::render::placeholder,
    };

    fn view(snapshot: &MetricSnapshot, tab: ProductTab) -> DashboardView {
        let mut selection = UiSelection::new();
        selection.select_tab(tab);
        render_view::<ProductsDashboard>(snapshot, &selection, &NumberFormat::EN)
    }

    #[test]
    fn inventory_tab_classifies_stock_cover() {
        let view = view(&fixtures::snapshot("products"), ProductTab::Inventory);

        let cover = fixtures::card(std::slice::from_ref(&view.body), "Days of Stock");
        assert_eq!(cover.value, "38 days");
        assert_eq!(cover.tier, Some(Tier::Good));

        let value = fixtures::card(std::slice::from_ref(&view.body), "Inventory Value");
        assert_eq!(value.value, "$4,250,000");
        assert_eq!(value.change_vs_prior.as_deref(), Some("+6.0%"));

        assert_eq!(fixtures::count_kind(&view.body, "progressBar"), 5);
        assert_eq!(fixtures::count_kind(&view.body, "table"), 1);
    }

    #[test]
    fn pricing_tab_colours_margins() {
        let view = view(&fixtures::snapshot("products"), ProductTab::Pricing);

        let tiers: Vec<Option<Tier>> = match &view.body {
            RenderNode::Section { children, .. } => children
                .iter()
                .map(|c| match c {
                    RenderNode::ProgressBar { tier, .. } => *tier,
                    other => panic!("unexpected node {:?}", other),
                })
                .collect(),
            other => panic!("unexpected node {:?}", other),
        };
        assert_eq!(
            tiers,
            vec![Some(Tier::Good), Some(Tier::Good), Some(Tier::Good), Some(Tier::Warning), Some(Tier::Good)]
        );
    }

    #[test]
    fn pricing_without_breakdown_is_isolated_from_the_header() {
        let snapshot: MetricSnapshot = serde_json::from_value(serde_json::json!({
            "facts": { "totalProducts": 1856 }
        }))
        .unwrap();

        let view = view(&snapshot, ProductTab::Pricing);

        assert_eq!(view.body, placeholder());
        assert_eq!(fixtures::card(&view.header, "Total Products").value, "1,856");
    }

    #[test]
    fn catalog_is_an_opaque_child_panel() {
        let view = view(&fixtures::snapshot("products"), ProductTab::Catalog);
        assert_eq!(fixtures::child_panels(&view.body), vec!["product-catalog".to_string()]);
    }
}
