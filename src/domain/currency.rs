//! Display currency selection. Prices are always stored in USD and only
//! converted for display.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "CAD")]
    Cad,
    #[serde(rename = "EUR")]
    Eur,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("unknown currency code: {0}")]
    Unknown(String),
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Cad, Currency::Eur];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Cad => "CAD",
            Currency::Eur => "EUR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Cad => "CA$",
            Currency::Eur => "€",
        }
    }

    /// Units of this currency per 1 USD.
    pub fn rate(&self) -> f64 {
        match self {
            Currency::Usd => 1.0,
            Currency::Cad => 1.36,
            Currency::Eur => 0.92,
        }
    }

    pub fn convert(&self, amount_usd: f64) -> f64 {
        amount_usd * self.rate()
    }

    /// Converts a USD amount and renders it, e.g. `CA$1,360.00`.
    pub fn format_price(&self, amount_usd: f64) -> String {
        let converted = self.convert(amount_usd);
        let sign = if converted < 0.0 { "-" } else { "" };
        format!(
            "{sign}{}{}",
            self.symbol(),
            group_thousands(converted.abs())
        )
    }

    pub fn parse(code: &str) -> Result<Self, CurrencyError> {
        match code.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "CAD" => Ok(Currency::Cad),
            "EUR" => Ok(Currency::Eur),
            _ => Err(CurrencyError::Unknown(code.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn group_thousands(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{grouped}.{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_symbol_and_grouping() {
        assert_eq!(Currency::Usd.format_price(1234.5), "$1,234.50");
        assert_eq!(Currency::Usd.format_price(0.0), "$0.00");
        assert_eq!(Currency::Cad.format_price(1000.0), "CA$1,360.00");
        assert_eq!(Currency::Eur.format_price(100.0), "€92.00");
        assert_eq!(Currency::Usd.format_price(-12.0), "-$12.00");
        assert_eq!(Currency::Usd.format_price(1_000_000.0), "$1,000,000.00");
    }

    #[test]
    fn conversion_is_linear() {
        for currency in Currency::ALL {
            let unit = currency.convert(1.0);
            for amount in [0.5, 3.0, 250.0, 12_345.67] {
                let ratio = currency.convert(amount) / unit;
                assert!((ratio - amount).abs() < 1e-9, "{currency} {amount}");
            }
        }
    }

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!(Currency::parse("cad"), Ok(Currency::Cad));
        assert_eq!(" EUR ".parse::<Currency>(), Ok(Currency::Eur));
        assert_eq!(
            Currency::parse("GBP"),
            Err(CurrencyError::Unknown("GBP".to_string()))
        );
    }

    #[test]
    fn serializes_as_iso_code() {
        assert_eq!(serde_json::to_string(&Currency::Cad).unwrap(), "\"CAD\"");
        let parsed: Currency = serde_json::from_str("\"EUR\"").unwrap();
        assert_eq!(parsed, Currency::Eur);
    }
}
