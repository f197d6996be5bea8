// src/services/calculator.rs

use crate::{
    common::format::{NumberFormat, NOT_APPLICABLE, NO_DATA},
    models::{
        dashboard::{DerivedMetric, Tier, Unit},
        metrics::{MetricSnapshot, SeriesPoint},
    },
    services::classifier::{classify, MetricCategory},
};

/// Limite de exibição para razões (acurácia, atingimento). O valor guardado não é cortado.
pub const DISPLAY_RATIO_LIMIT: f64 = 999.0;

/// Resultado de um cálculo derivado.
///
/// `NotApplicable` é a divisão por zero ("n/a"); `Undefined` é a falta de dados
/// (campo ausente, série vazia) e aparece como "no data". NaN e infinito nunca
/// chegam na tela.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    Value(f64),
    NotApplicable,
    Undefined,
}

impl Measure {
    fn checked(value: f64) -> Self {
        if value.is_finite() {
            Measure::Value(value)
        } else {
            Measure::NotApplicable
        }
    }

    pub fn from_option(value: Option<f64>) -> Self {
        value.map_or(Measure::Undefined, Measure::checked)
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Measure::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn display(self, unit: Unit, fmt: &NumberFormat) -> String {
        match self {
            Measure::Value(v) => format_value(unit, v, fmt).unwrap_or_else(|| NO_DATA.to_string()),
            Measure::NotApplicable => NOT_APPLICABLE.to_string(),
            Measure::Undefined => NO_DATA.to_string(),
        }
    }

    // Variação percentual com sinal
    pub fn display_change(self, fmt: &NumberFormat) -> String {
        match self {
            Measure::Value(v) => fmt.signed_percent(v).unwrap_or_else(|| NO_DATA.to_string()),
            Measure::NotApplicable => NOT_APPLICABLE.to_string(),
            Measure::Undefined => NO_DATA.to_string(),
        }
    }
}

// ---
// Fórmulas
// ---

/// `(atual - base) / base * 100`. Base zero não quebra: vira "n/a".
pub fn percent_change(current: f64, baseline: f64) -> Measure {
    if baseline == 0.0 || !current.is_finite() || !baseline.is_finite() {
        return Measure::NotApplicable;
    }
    Measure::checked((current - baseline) / baseline * 100.0)
}

/// Participação de `part` em `total`, em %.
pub fn share_of(part: f64, total: f64) -> Measure {
    if total == 0.0 || !part.is_finite() || !total.is_finite() {
        return Measure::NotApplicable;
    }
    Measure::checked(part / total * 100.0)
}

/// Realizado contra previsto, em %. Sem clamp: 140% e -5% continuam visíveis.
pub fn accuracy_ratio(actual: f64, forecast: f64) -> Measure {
    share_of(actual, forecast)
}

// Os agregados ignoram pontos sem valor.
fn values(points: &[SeriesPoint], field: fn(&SeriesPoint) -> Option<f64>) -> impl Iterator<Item = f64> + '_ {
    points.iter().filter_map(field).filter(|v| v.is_finite())
}

pub fn point_value(point: &SeriesPoint) -> Option<f64> {
    point.value
}

pub fn point_comparison(point: &SeriesPoint) -> Option<f64> {
    point.comparison_value
}

pub fn point_target(point: &SeriesPoint) -> Option<f64> {
    point.target_value
}

/// Soma de um campo da série. Sem nenhum valor: `Undefined`; estourou: `NotApplicable`.
pub fn sum_of(points: &[SeriesPoint], field: fn(&SeriesPoint) -> Option<f64>) -> Measure {
    let mut total: Option<f64> = None;
    for v in values(points, field) {
        let next = total.unwrap_or(0.0) + v;
        if !next.is_finite() {
            return Measure::NotApplicable;
        }
        total = Some(next);
    }
    Measure::from_option(total)
}

pub fn sum(points: &[SeriesPoint]) -> Measure {
    sum_of(points, point_value)
}

/// Média: só existe com pelo menos um valor (nunca divide por zero).
pub fn average(points: &[SeriesPoint]) -> Measure {
    let (total, count) = values(points, point_value).fold((0.0, 0usize), |(t, c), v| (t + v, c + 1));
    if count == 0 {
        return Measure::Undefined;
    }
    Measure::checked(total / count as f64)
}

pub fn min(points: &[SeriesPoint]) -> Measure {
    values(points, point_value)
        .reduce(f64::min)
        .map_or(Measure::Undefined, Measure::Value)
}

pub fn max(points: &[SeriesPoint]) -> Measure {
    values(points, point_value)
        .reduce(f64::max)
        .map_or(Measure::Undefined, Measure::Value)
}

fn tier_weight(tier: Tier) -> f64 {
    match tier {
        Tier::Good => 100.0,
        Tier::Warning => 50.0,
        Tier::Critical => 0.0,
    }
}

/// Nota de saúde (0 a 100): média dos pesos dos tiers.
pub fn health_score(tiers: &[Tier]) -> Measure {
    if tiers.is_empty() {
        return Measure::Undefined;
    }
    let total: f64 = tiers.iter().copied().map(tier_weight).sum();
    Measure::checked(total / tiers.len() as f64)
}

// ---
// Formatação por unidade
// ---

pub fn format_value(unit: Unit, value: f64, fmt: &NumberFormat) -> Option<String> {
    match unit {
        Unit::Currency => fmt.currency(value),
        Unit::Percent => fmt.percent(value),
        Unit::Count => fmt.integer(value),
        Unit::Rating => fmt.decimal(value, 1),
        Unit::Days => fmt.integer(value).map(|days| {
            if days == "1" { "1 day".to_string() } else { format!("{} days", days) }
        }),
        Unit::Ratio => display_ratio(value, fmt),
    }
}

// Clamp só na tela
fn display_ratio(value: f64, fmt: &NumberFormat) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    if value > DISPLAY_RATIO_LIMIT {
        return fmt.integer(DISPLAY_RATIO_LIMIT).map(|limit| format!(">{}%", limit));
    }
    if value < -DISPLAY_RATIO_LIMIT {
        return fmt.integer(-DISPLAY_RATIO_LIMIT).map(|limit| format!("<{}%", limit));
    }
    fmt.percent(value)
}

// ---
// DerivedMetric
// ---

/// De onde vem o tier de um card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TierRule {
    None,
    // O próprio valor do card
    Own(MetricCategory),
    // Outro fato do snapshot (ex: receita colorida pelo crescimento mensal)
    Fact(&'static str, MetricCategory),
    // A variação contra a base
    Change(MetricCategory),
}

/// Declaração de um card a partir de um fato do snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricDef {
    pub label: &'static str,
    pub fact: &'static str,
    pub unit: Unit,
    pub baseline: Option<&'static str>,
    pub tier: TierRule,
}

impl MetricDef {
    pub const fn new(label: &'static str, fact: &'static str, unit: Unit) -> Self {
        Self { label, fact, unit, baseline: None, tier: TierRule::None }
    }

    pub const fn compared_to(mut self, baseline: &'static str) -> Self {
        self.baseline = Some(baseline);
        self
    }

    pub const fn tiered(mut self, tier: TierRule) -> Self {
        self.tier = tier;
        self
    }
}

pub fn metric(
    label: &str,
    unit: Unit,
    measure: Measure,
    change: Option<Measure>,
    tier: Option<Tier>,
    fmt: &NumberFormat,
) -> DerivedMetric {
    DerivedMetric {
        label: label.to_string(),
        value: measure.display(unit, fmt),
        raw_value: measure.value(),
        unit,
        change_vs_prior: change.map(|c| c.display_change(fmt)),
        // Sem valor, sem cor
        tier: measure.value().and(tier),
    }
}

pub fn derive_metric(snapshot: &MetricSnapshot, def: &MetricDef, fmt: &NumberFormat) -> DerivedMetric {
    let current = snapshot.fact(def.fact);

    let change = def.baseline.map(|baseline| match (current, snapshot.fact(baseline)) {
        (Some(current), Some(baseline)) => percent_change(current, baseline),
        _ => Measure::Undefined,
    });

    let tier = match def.tier {
        TierRule::None => None,
        TierRule::Own(category) => current.map(|v| classify(category, v)),
        TierRule::Fact(name, category) => snapshot.fact(name).map(|v| classify(category, v)),
        TierRule::Change(category) => change.and_then(Measure::value).map(|v| classify(category, v)),
    };

    metric(def.label, def.unit, Measure::from_option(current), change, tier, fmt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn point(value: Option<f64>) -> SeriesPoint {
        SeriesPoint { period: "2024-01".into(), value, ..Default::default() }
    }

    #[test]
    fn percent_change_against_zero_is_not_applicable() {
        for current in [0.0, 1.0, -250.0, 2_485_000.0, f64::MAX] {
            assert_eq!(percent_change(current, 0.0), Measure::NotApplicable);
        }
        assert_eq!(percent_change(f64::NAN, 10.0), Measure::NotApplicable);
        assert_eq!(percent_change(0.0, 0.0).display_change(&NumberFormat::EN), "n/a");
    }

    #[test]
    fn percent_change_formula() {
        assert_eq!(percent_change(110.0, 100.0), Measure::Value(10.0));
        assert_eq!(percent_change(50.0, 100.0), Measure::Value(-50.0));
        assert_eq!(percent_change(-50.0, -100.0), Measure::Value(-50.0));
    }

    #[test]
    fn average_of_empty_series_is_undefined() {
        assert_eq!(average(&[]), Measure::Undefined);
        assert_eq!(average(&[point(None), point(None)]), Measure::Undefined);
        assert_eq!(average(&[]).display(Unit::Currency, &NumberFormat::EN), "no data");
    }

    #[test]
    fn aggregates_skip_missing_points() {
        let points = [point(Some(10.0)), point(None), point(Some(30.0)), point(Some(20.0))];
        assert_eq!(sum(&points), Measure::Value(60.0));
        assert_eq!(average(&points), Measure::Value(20.0));
        assert_eq!(min(&points), Measure::Value(10.0));
        assert_eq!(max(&points), Measure::Value(30.0));
        assert_eq!(sum(&[]), Measure::Undefined);
        assert_eq!(min(&[]), Measure::Undefined);
    }

    #[test]
    fn overflowing_sum_does_not_restart_the_total() {
        let points = [point(Some(1e308)), point(Some(1e308)), point(Some(5.0))];
        assert_eq!(sum(&points), Measure::NotApplicable);
        assert_eq!(sum(&points).display(Unit::Currency, &NumberFormat::EN), "n/a");
        assert_eq!(sum(&[point(Some(-1e308)), point(Some(1e308)), point(Some(5.0))]), Measure::Value(5.0));
    }

    #[test]
    fn accuracy_ratio_is_not_clamped_in_storage() {
        assert_eq!(accuracy_ratio(0.0, 1000.0), Measure::Value(0.0));
        assert_eq!(accuracy_ratio(1400.0, 1000.0), Measure::Value(140.0));
        assert_eq!(accuracy_ratio(-50.0, 1000.0), Measure::Value(-5.0));
        assert_eq!(accuracy_ratio(10.0, 0.0), Measure::NotApplicable);

        let huge = accuracy_ratio(50_000.0, 10.0);
        assert_eq!(huge.value(), Some(500_000.0));
        assert_eq!(huge.display(Unit::Ratio, &NumberFormat::EN), ">999%");
        assert_eq!(accuracy_ratio(-50_000.0, 10.0).display(Unit::Ratio, &NumberFormat::EN), "<-999%");
        assert_eq!(accuracy_ratio(0.0, 1000.0).display(Unit::Ratio, &NumberFormat::EN), "0.0%");
    }

    #[test]
    fn health_score_weights_tiers() {
        assert_eq!(health_score(&[]), Measure::Undefined);
        assert_eq!(health_score(&[Tier::Good, Tier::Critical]), Measure::Value(50.0));
        assert_eq!(health_score(&[Tier::Good, Tier::Good, Tier::Warning, Tier::Warning]), Measure::Value(75.0));
    }

    #[test]
    fn days_are_pluralised() {
        let fmt = NumberFormat::EN;
        assert_eq!(format_value(Unit::Days, 32.0, &fmt).as_deref(), Some("32 days"));
        assert_eq!(format_value(Unit::Days, 1.0, &fmt).as_deref(), Some("1 day"));
    }

    #[test]
    fn total_revenue_is_tiered_by_monthly_growth() {
        let snapshot: MetricSnapshot = serde_json::from_value(json!({
            "facts": { "totalRevenue": 2485000, "monthlyGrowth": 8.7 }
        }))
        .unwrap();
        let def = MetricDef::new("Total Revenue", "totalRevenue", Unit::Currency)
            .tiered(TierRule::Fact("monthlyGrowth", MetricCategory::Growth));

        let derived = derive_metric(&snapshot, &def, &NumberFormat::EN);

        assert_eq!(derived.label, "Total Revenue");
        assert_eq!(derived.value, "$2,485,000");
        assert_eq!(derived.tier, Some(Tier::Good));
        assert_eq!(derived.change_vs_prior, None);
    }

    #[test]
    fn average_payment_days_of_32_is_a_warning() {
        let snapshot: MetricSnapshot = serde_json::from_value(json!({
            "facts": { "averagePaymentDays": 32 }
        }))
        .unwrap();
        let def = MetricDef::new("Avg Payment Days", "averagePaymentDays", Unit::Days)
            .tiered(TierRule::Own(MetricCategory::DaysToPay));

        let derived = derive_metric(&snapshot, &def, &NumberFormat::EN);

        assert_eq!(derived.value, "32 days");
        assert_eq!(derived.tier, Some(Tier::Warning));
    }

    #[test]
    fn missing_fact_degrades_to_no_data() {
        let snapshot = MetricSnapshot::default();
        let def = MetricDef::new("Total Revenue", "totalRevenue", Unit::Currency)
            .compared_to("previousRevenue")
            .tiered(TierRule::Own(MetricCategory::Growth));

        let derived = derive_metric(&snapshot, &def, &NumberFormat::EN);

        assert_eq!(derived.value, "no data");
        assert_eq!(derived.raw_value, None);
        assert_eq!(derived.change_vs_prior.as_deref(), Some("no data"));
        assert_eq!(derived.tier, None);
    }

    #[test]
    fn change_rule_classifies_the_delta() {
        let snapshot: MetricSnapshot = serde_json::from_value(json!({
            "facts": { "orders": 1247, "previousOrders": 1156 }
        }))
        .unwrap();
        let def = MetricDef::new("Total Orders", "orders", Unit::Count)
            .compared_to("previousOrders")
            .tiered(TierRule::Change(MetricCategory::Growth));

        let derived = derive_metric(&snapshot, &def, &NumberFormat::EN);

        assert_eq!(derived.value, "1,247");
        assert_eq!(derived.change_vs_prior.as_deref(), Some("+7.9%"));
        assert_eq!(derived.tier, Some(Tier::Good));
    }
}
