// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::common::format::NumberFormat;

const DEFAULT_LANG: &str = "en";

// Extrator de idioma: só decide o agrupamento dos números
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Locale {
    pub fn number_format(&self) -> NumberFormat {
        NumberFormat::for_locale(&self.0)
    }

    fn from_header(value: &str) -> Self {
        let lang = accept_language::parse(value)
            .first() // Idioma de maior peso (ex: "pt-BR")
            .map(|tag| {
                // "pt-BR" -> "pt"
                tag.split('-').next().unwrap_or(tag).to_ascii_lowercase()
            })
            .unwrap_or_else(|| DEFAULT_LANG.to_string());
        Locale(lang)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let locale = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(Locale::from_header)
            .unwrap_or_else(|| Locale(DEFAULT_LANG.to_string()));

        Ok(locale)
    }
}
