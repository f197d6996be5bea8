// src/common/format.rs

use rust_decimal::{Decimal, RoundingStrategy};

/// Texto exibido quando um valor não existe (campo ausente, série vazia).
pub const NO_DATA: &str = "no data";

/// Texto exibido quando a razão não pode ser calculada (divisão por zero).
pub const NOT_APPLICABLE: &str = "n/a";

const CURRENCY_SYMBOL: &str = "$";

// Separadores numéricos de acordo com o idioma do usuário.
// Isso é só formatação: nenhuma regra de negócio mora aqui.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    group: char,
    decimal: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::EN
    }
}

impl NumberFormat {
    pub const EN: Self = Self { group: ',', decimal: '.' };

    /// Recebe o idioma primário (ex: "pt", "en") vindo do extrator `Locale`.
    pub fn for_locale(lang: &str) -> Self {
        match lang.to_ascii_lowercase().as_str() {
            "pt" | "es" | "de" | "it" | "nl" => Self { group: '.', decimal: ',' },
            "fr" => Self { group: ' ', decimal: ',' },
            _ => Self::EN,
        }
    }

    // Valores monetários: inteiros, com agrupamento e sem casas decimais
    pub fn currency(&self, amount: f64) -> Option<String> {
        let rounded = round(amount, 0)?;
        let sign = if is_negative(rounded) { "-" } else { "" };
        Some(format!("{}{}{}", sign, CURRENCY_SYMBOL, self.digits(rounded.abs(), 0)))
    }

    pub fn integer(&self, value: f64) -> Option<String> {
        self.decimal(value, 0)
    }

    pub fn decimal(&self, value: f64, places: u32) -> Option<String> {
        let rounded = round(value, places)?;
        let sign = if is_negative(rounded) { "-" } else { "" };
        Some(format!("{}{}", sign, self.digits(rounded.abs(), places)))
    }

    pub fn percent(&self, value: f64) -> Option<String> {
        self.decimal(value, 1).map(|text| format!("{}%", text))
    }

    // Variação: sempre com sinal explícito ("+8.7%", "-3.1%")
    pub fn signed_percent(&self, value: f64) -> Option<String> {
        let rounded = round(value, 1)?;
        let sign = if is_negative(rounded) { "-" } else { "+" };
        Some(format!("{}{}%", sign, self.digits(rounded.abs(), 1)))
    }

    fn digits(&self, value: Decimal, places: u32) -> String {
        let text = format!("{:.*}", places as usize, value);
        let (int_part, frac_part) = match text.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (text.as_str(), None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(self.group);
            }
            grouped.push(ch);
        }

        match frac_part {
            Some(frac) => format!("{}{}{}", grouped, self.decimal, frac),
            None => grouped,
        }
    }
}

fn round(value: f64, places: u32) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero))
}

// "-0" não existe na tela
fn is_negative(value: Decimal) -> bool {
    value.is_sign_negative() && !value.is_zero()
}
