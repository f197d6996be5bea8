// src/services/classifier.rs

use crate::{models::dashboard::Tier, services::selection::selectable};

selectable! {
    /// Categoria de métrica: cada uma tem a sua tabela fixa de cortes.
    pub enum MetricCategory {
        Growth => ("growth", "Growth"),
        DaysToPay => ("days-to-pay", "Days to pay"),
        OverdueRatio => ("overdue-ratio", "Overdue ratio"),
        ForecastAccuracy => ("forecast-accuracy", "Forecast accuracy"),
        ProfitMargin => ("profit-margin", "Profit margin"),
        OnTimeDelivery => ("on-time-delivery", "On-time delivery"),
        ReturnRate => ("return-rate", "Return rate"),
        StockCover => ("stock-cover", "Stock cover"),
        CreditUtilization => ("credit-utilization", "Credit utilization"),
        CustomerSatisfaction => ("customer-satisfaction", "Customer satisfaction"),
        TargetAttainment => ("target-attainment", "Target attainment"),
        HealthScore => ("health-score", "Health score"),
    }
}

/// Tabela de cortes em ordem crescente. Vale o primeiro corte com `valor < corte`;
/// se nenhum casar, vale `otherwise`. Os intervalos são semiabertos `[lo, hi)`:
/// um valor exatamente no corte pertence ao intervalo de cima.
#[derive(Debug, PartialEq)]
pub struct ThresholdTable {
    pub bounds: &'static [(f64, Tier)],
    pub otherwise: Tier,
}

impl ThresholdTable {
    pub fn classify(&self, value: f64) -> Tier {
        self.bounds
            .iter()
            .find(|(upper, _)| value < *upper)
            .map(|(_, tier)| *tier)
            .unwrap_or(self.otherwise)
    }
}

use crate::models::dashboard::Tier::{Critical, Good, Warning};

// Percentual de crescimento (mês contra mês, ano contra ano)
static GROWTH: ThresholdTable = ThresholdTable {
    bounds: &[(0.0, Critical), (5.0, Warning)],
    otherwise: Good,
};

// Prazo médio de recebimento, em dias
static DAYS_TO_PAY: ThresholdTable = ThresholdTable {
    bounds: &[(30.0, Good), (45.0, Warning)],
    otherwise: Critical,
};

// % do contas a receber que está vencido
static OVERDUE_RATIO: ThresholdTable = ThresholdTable {
    bounds: &[(5.0, Good), (15.0, Warning)],
    otherwise: Critical,
};

// Realizado / previsto * 100. Passar muito da previsão também é alerta.
static FORECAST_ACCURACY: ThresholdTable = ThresholdTable {
    bounds: &[(80.0, Critical), (95.0, Warning), (110.0, Good)],
    otherwise: Warning,
};

static PROFIT_MARGIN: ThresholdTable = ThresholdTable {
    bounds: &[(10.0, Critical), (20.0, Warning)],
    otherwise: Good,
};

static ON_TIME_DELIVERY: ThresholdTable = ThresholdTable {
    bounds: &[(85.0, Critical), (95.0, Warning)],
    otherwise: Good,
};

static RETURN_RATE: ThresholdTable = ThresholdTable {
    bounds: &[(2.0, Good), (5.0, Warning)],
    otherwise: Critical,
};

// Dias de cobertura de estoque: pouco é ruptura, muito é capital parado
static STOCK_COVER: ThresholdTable = ThresholdTable {
    bounds: &[(7.0, Critical), (21.0, Warning), (90.0, Good)],
    otherwise: Warning,
};

static CREDIT_UTILIZATION: ThresholdTable = ThresholdTable {
    bounds: &[(70.0, Good), (90.0, Warning)],
    otherwise: Critical,
};

// Nota de 0 a 5
static CUSTOMER_SATISFACTION: ThresholdTable = ThresholdTable {
    bounds: &[(3.5, Critical), (4.2, Warning)],
    otherwise: Good,
};

// % da meta atingida: good = acima, warning = a caminho, critical = abaixo
static TARGET_ATTAINMENT: ThresholdTable = ThresholdTable {
    bounds: &[(90.0, Critical), (100.0, Warning)],
    otherwise: Good,
};

static HEALTH_SCORE: ThresholdTable = ThresholdTable {
    bounds: &[(50.0, Critical), (75.0, Warning)],
    otherwise: Good,
};

impl MetricCategory {
    pub fn table(self) -> &'static ThresholdTable {
        match self {
            MetricCategory::Growth => &GROWTH,
            MetricCategory::DaysToPay => &DAYS_TO_PAY,
            MetricCategory::OverdueRatio => &OVERDUE_RATIO,
            MetricCategory::ForecastAccuracy => &FORECAST_ACCURACY,
            MetricCategory::ProfitMargin => &PROFIT_MARGIN,
            MetricCategory::OnTimeDelivery => &ON_TIME_DELIVERY,
            MetricCategory::ReturnRate => &RETURN_RATE,
            MetricCategory::StockCover => &STOCK_COVER,
            MetricCategory::CreditUtilization => &CREDIT_UTILIZATION,
            MetricCategory::CustomerSatisfaction => &CUSTOMER_SATISFACTION,
            MetricCategory::TargetAttainment => &TARGET_ATTAINMENT,
            MetricCategory::HealthScore => &HEALTH_SCORE,
        }
    }
}

/// Função pura: mesma categoria e mesmo valor, mesmo tier.
/// Valores não finitos não devem chegar aqui (a calculadora devolve tier vazio).
pub fn classify(category: MetricCategory, value: f64) -> Tier {
    category.table().classify(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::selection::Selectable;

    // (categoria, corte, tier logo abaixo do corte, tier no corte)
    const BOUNDARIES: &[(MetricCategory, f64, Tier, Tier)] = &[
        (MetricCategory::Growth, 0.0, Critical, Warning),
        (MetricCategory::Growth, 5.0, Warning, Good),
        (MetricCategory::DaysToPay, 30.0, Good, Warning),
        (MetricCategory::DaysToPay, 45.0, Warning, Critical),
        (MetricCategory::OverdueRatio, 5.0, Good, Warning),
        (MetricCategory::OverdueRatio, 15.0, Warning, Critical),
        (MetricCategory::ForecastAccuracy, 80.0, Critical, Warning),
        (MetricCategory::ForecastAccuracy, 95.0, Warning, Good),
        (MetricCategory::ForecastAccuracy, 110.0, Good, Warning),
        (MetricCategory::ProfitMargin, 10.0, Critical, Warning),
        (MetricCategory::ProfitMargin, 20.0, Warning, Good),
        (MetricCategory::OnTimeDelivery, 85.0, Critical, Warning),
        (MetricCategory::OnTimeDelivery, 95.0, Warning, Good),
        (MetricCategory::ReturnRate, 2.0, Good, Warning),
        (MetricCategory::ReturnRate, 5.0, Warning, Critical),
        (MetricCategory::StockCover, 7.0, Critical, Warning),
        (MetricCategory::StockCover, 21.0, Warning, Good),
        (MetricCategory::StockCover, 90.0, Good, Warning),
        (MetricCategory::CreditUtilization, 70.0, Good, Warning),
        (MetricCategory::CreditUtilization, 90.0, Warning, Critical),
        (MetricCategory::CustomerSatisfaction, 3.5, Critical, Warning),
        (MetricCategory::CustomerSatisfaction, 4.2, Warning, Good),
        (MetricCategory::TargetAttainment, 90.0, Critical, Warning),
        (MetricCategory::TargetAttainment, 100.0, Warning, Good),
        (MetricCategory::HealthScore, 50.0, Critical, Warning),
        (MetricCategory::HealthScore, 75.0, Warning, Good),
    ];

    #[test]
    fn exact_cutoff_belongs_to_the_upper_interval() {
        for (category, cutoff, below, at) in BOUNDARIES {
            assert_eq!(classify(*category, cutoff - 0.001), *below, "{:?} just below {}", category, cutoff);
            assert_eq!(classify(*category, *cutoff), *at, "{:?} at {}", category, cutoff);
            assert_eq!(classify(*category, cutoff + 0.001), *at, "{:?} just above {}", category, cutoff);
        }
    }

    #[test]
    fn every_cutoff_is_covered_by_the_boundary_list() {
        for category in MetricCategory::ALL {
            let covered = BOUNDARIES.iter().filter(|(c, ..)| c == category).count();
            assert_eq!(covered, category.table().bounds.len(), "{:?}", category);
        }
    }

    #[test]
    fn tables_are_sorted_ascending() {
        for category in MetricCategory::ALL {
            let bounds = category.table().bounds;
            assert!(!bounds.is_empty());
            assert!(bounds.windows(2).all(|w| w[0].0 < w[1].0), "{:?}", category);
        }
    }

    #[test]
    fn days_to_pay_of_32_is_a_warning() {
        assert_eq!(classify(MetricCategory::DaysToPay, 32.0), Warning);
        assert_eq!(classify(MetricCategory::DaysToPay, 29.999), Good);
        assert_eq!(classify(MetricCategory::DaysToPay, 60.0), Critical);
    }

    #[test]
    fn growth_above_five_is_good() {
        assert_eq!(classify(MetricCategory::Growth, 8.7), Good);
        assert_eq!(classify(MetricCategory::Growth, -2.0), Critical);
    }

    #[test]
    fn unknown_category_id_falls_back_to_growth() {
        assert_eq!(MetricCategory::parse_or_first("days-to-pay"), MetricCategory::DaysToPay);
        assert_eq!(MetricCategory::parse_or_first("velocity"), MetricCategory::Growth);
    }
}
