// src/services/render.rs

use serde_json::Value;
use thiserror::Error;

use crate::{
    common::format::{NumberFormat, NO_DATA},
    models::{
        dashboard::{RenderNode, Tier, Unit},
        metrics::{MetricSnapshot, SeriesPoint, TableRow},
    },
    services::{
        calculator::{self, derive_metric, format_value, Measure, MetricDef},
        classifier::{classify, MetricCategory},
    },
};

// Falha ao montar UM painel. Nunca vira erro HTTP: o painel vira placeholder.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RenderError {
    #[error("série '{0}' ausente no snapshot")]
    MissingSeries(&'static str),

    #[error("série '{0}' não tem pontos")]
    EmptySeries(&'static str),

    #[error("detalhamento '{0}' ausente no snapshot")]
    MissingBreakdown(&'static str),

    #[error("tabela '{0}' ausente no snapshot")]
    MissingTable(&'static str),
}

/// Isola o painel: um erro aqui não derruba os painéis vizinhos.
pub fn isolate(panel: &str, result: Result<RenderNode, RenderError>) -> RenderNode {
    match result {
        Ok(node) => node,
        Err(e) => {
            tracing::warn!(panel, error = %e, "Painel sem dados, exibindo placeholder");
            placeholder()
        }
    }
}

pub fn placeholder() -> RenderNode {
    RenderNode::Placeholder { message: NO_DATA.to_string() }
}

pub fn section(title: &str, children: Vec<RenderNode>) -> RenderNode {
    RenderNode::Section { title: title.to_string(), children }
}

pub fn child_panel(panel: &str) -> RenderNode {
    RenderNode::ChildPanel { panel: panel.to_string() }
}

pub fn cards(snapshot: &MetricSnapshot, defs: &[MetricDef], fmt: &NumberFormat) -> Vec<RenderNode> {
    defs.iter()
        .map(|def| RenderNode::MetricCard(derive_metric(snapshot, def, fmt)))
        .collect()
}

pub fn progress_bar(label: &str, value: String, percent: Measure, tier: Option<Tier>) -> RenderNode {
    RenderNode::ProgressBar {
        label: label.to_string(),
        value,
        // Largura da barra: só a exibição é limitada a 0..=100
        percent: percent.value().map_or(0.0, |p| p.clamp(0.0, 100.0)),
        tier,
        color: tier.map(|t| t.color().to_string()),
    }
}

// ---
// Detalhamento por categoria
// ---

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BreakdownBars {
    /// Barra = participação; valor em moeda; tier pelo crescimento da categoria.
    ShareOfTotal,
    /// Barra = o próprio valor (já é %); tier pela categoria indicada.
    Rate(MetricCategory),
}

pub fn breakdown_bars(
    snapshot: &MetricSnapshot,
    key: &'static str,
    mode: BreakdownBars,
    fmt: &NumberFormat,
) -> Result<Vec<RenderNode>, RenderError> {
    let breakdown = snapshot
        .breakdown(key)
        .filter(|b| !b.is_empty())
        .ok_or(RenderError::MissingBreakdown(key))?;

    let total: f64 = breakdown
        .entries
        .iter()
        .filter_map(|e| e.value)
        .filter(|v| v.is_finite())
        .sum();

    let bars = breakdown
        .entries
        .iter()
        .map(|entry| {
            let value = Measure::from_option(entry.value);
            match mode {
                BreakdownBars::ShareOfTotal => {
                    // Usa a participação informada; se faltar, calcula sobre o total
                    let share = match (entry.share, entry.value) {
                        (Some(share), _) if share.is_finite() => Measure::Value(share),
                        (_, Some(v)) => calculator::share_of(v, total),
                        _ => Measure::Undefined,
                    };
                    let text = match (value, share) {
                        (Measure::Value(_), Measure::Value(s)) => format!(
                            "{} ({})",
                            value.display(Unit::Currency, fmt),
                            fmt.percent(s).unwrap_or_else(|| NO_DATA.to_string())
                        ),
                        _ => value.display(Unit::Currency, fmt),
                    };
                    let tier = value
                        .value()
                        .and(entry.growth_rate)
                        .filter(|g| g.is_finite())
                        .map(|g| classify(MetricCategory::Growth, g));
                    progress_bar(&entry.category, text, share, tier)
                }
                BreakdownBars::Rate(category) => {
                    let tier = value.value().map(|v| classify(category, v));
                    progress_bar(&entry.category, value.display(Unit::Percent, fmt), value, tier)
                }
            }
        })
        .collect();

    Ok(bars)
}

// ---
// Séries temporais como barras
// ---

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesBars {
    /// Barra relativa ao maior valor da janela.
    RelativeToMax,
    /// Barra = % da meta do período, com tier de atingimento.
    AgainstTarget,
}

pub fn series_bars(points: &[SeriesPoint], mode: SeriesBars, fmt: &NumberFormat) -> Vec<RenderNode> {
    let peak = calculator::max(points);

    points
        .iter()
        .map(|point| {
            let value = Measure::from_option(point.value);
            let text = value.display(Unit::Currency, fmt);
            match mode {
                SeriesBars::RelativeToMax => {
                    let percent = match (value, peak) {
                        (Measure::Value(v), Measure::Value(p)) => calculator::share_of(v, p),
                        _ => Measure::Undefined,
                    };
                    progress_bar(&point.period, text, percent, None)
                }
                SeriesBars::AgainstTarget => {
                    let attainment = match (point.value, point.target_value) {
                        (Some(v), Some(t)) => calculator::share_of(v, t),
                        _ => Measure::Undefined,
                    };
                    let tier = attainment.value().map(|a| classify(MetricCategory::TargetAttainment, a));
                    progress_bar(&point.period, text, attainment, tier)
                }
            }
        })
        .collect()
}

// ---
// Tabelas
// ---

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub key: &'static str,
    pub title: &'static str,
    pub unit: Option<Unit>, // None = texto
}

impl Column {
    pub const fn text(key: &'static str, title: &'static str) -> Self {
        Self { key, title, unit: None }
    }

    pub const fn number(key: &'static str, title: &'static str, unit: Unit) -> Self {
        Self { key, title, unit: Some(unit) }
    }
}

fn cell(row: &TableRow, column: &Column, fmt: &NumberFormat) -> String {
    let formatted = match (row.get(column.key), column.unit) {
        (Some(Value::Number(n)), Some(unit)) => n.as_f64().and_then(|v| format_value(unit, v, fmt)),
        (Some(Value::String(s)), _) => Some(s.clone()),
        (Some(Value::Number(n)), None) => Some(n.to_string()),
        (Some(Value::Bool(b)), _) => Some(b.to_string()),
        _ => None,
    };
    formatted.unwrap_or_else(|| NO_DATA.to_string())
}

/// Monta a tabela `key` com as colunas pedidas, mantendo só as linhas aceitas por `keep`.
pub fn table<P>(
    snapshot: &MetricSnapshot,
    key: &'static str,
    columns: &[Column],
    keep: P,
    fmt: &NumberFormat,
) -> Result<RenderNode, RenderError>
where
    P: Fn(&TableRow) -> bool,
{
    let rows = snapshot.table(key).ok_or(RenderError::MissingTable(key))?;

    let rows: Vec<Vec<String>> = rows
        .iter()
        .filter(|row| keep(row))
        .map(|row| columns.iter().map(|c| cell(row, c, fmt)).collect())
        .collect();

    if rows.is_empty() {
        return Ok(placeholder());
    }

    Ok(RenderNode::Table {
        columns: columns.iter().map(|c| c.title.to_string()).collect(),
        rows,
    })
}
