// src/models/metrics.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// Uma linha de tabela (pedidos recentes, faturas, estoque baixo).
// Coluna -> valor escalar em JSON.
pub type TableRow = BTreeMap<String, Value>;

// ---
// 1. MetricSnapshot (A "Foto" imutável dos números de um painel)
// ---
// Carregado uma vez na inicialização e nunca alterado depois.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricSnapshot {
    pub captured_at: Option<DateTime<Utc>>,

    // Fatos nomeados: "totalRevenue", "overdueCount"...
    // Guardamos o JSON cru para que um valor malformado vire "no data" e não derrube a carga.
    pub facts: BTreeMap<String, Value>,

    pub series: BTreeMap<String, TimeSeries>,
    pub breakdowns: BTreeMap<String, CategoryBreakdown>,
    pub tables: BTreeMap<String, Vec<TableRow>>,
}

impl MetricSnapshot {
    /// Valor numérico de um fato. `None` quando ausente, não numérico ou não finito.
    pub fn fact(&self, name: &str) -> Option<f64> {
        self.facts
            .get(name)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
    }

    pub fn series(&self, name: &str) -> Option<&TimeSeries> {
        self.series.get(name)
    }

    pub fn breakdown(&self, name: &str) -> Option<&CategoryBreakdown> {
        self.breakdowns.get(name)
    }

    pub fn table(&self, name: &str) -> Option<&[TableRow]> {
        self.tables.get(name).map(Vec::as_slice)
    }
}

// ---
// 2. TimeSeries (Sequência ordenada por período)
// ---
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries {
    pub points: Vec<SeriesPoint>,
}

impl TimeSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Os últimos `n` pontos, mantendo a ordem original.
    pub fn last(&self, n: usize) -> &[SeriesPoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeriesPoint {
    #[serde(deserialize_with = "lenient_text")]
    pub period: String,
    #[serde(deserialize_with = "lenient_number")]
    pub value: Option<f64>,
    // Mesmo período do ano anterior
    #[serde(deserialize_with = "lenient_number")]
    pub comparison_value: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub target_value: Option<f64>,
}

// ---
// 3. CategoryBreakdown (Receita por categoria, pedidos por região...)
// ---
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryBreakdown {
    pub entries: Vec<CategoryShare>,
}

impl CategoryBreakdown {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryShare {
    #[serde(deserialize_with = "lenient_text")]
    pub category: String,
    #[serde(deserialize_with = "lenient_number")]
    pub value: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub share: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub growth_rate: Option<f64>,
}

// ---
// Leitura tolerante: um campo malformado vira "sem valor", nunca erro de carga
// ---

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(raw.as_f64().filter(|v| v.is_finite()))
}

// Rótulos: aceita número ("2024") e descarta o resto
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::String(text) => text,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}
