//! Display currency for catalog prices.
//!
//! Prices arrive from the product API as plain numbers in the store's
//! currency. They are kept as `f64` because the only arithmetic the catalog
//! performs is the discount multiplication for display.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported display currencies.
///
/// Serialized as the ISO code; codes are matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places shown for this currency.
    pub fn decimal_places(&self) -> usize {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "INR" => Some(Currency::INR),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }

    /// Format an amount with symbol and fixed decimals, e.g. `₹900.00`.
    pub fn format(&self, amount: f64) -> String {
        format!(
            "{}{:.*}",
            self.symbol(),
            self.decimal_places(),
            amount
        )
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl TryFrom<String> for Currency {
    type Error = CatalogError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::from_code(&code).ok_or(CatalogError::UnknownCurrency(code))
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}

/// Price after applying a percentage discount.
pub fn discounted(base_price: f64, discount_percentage: f64) -> f64 {
    base_price * (1.0 - discount_percentage / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_inr() {
        assert_eq!(Currency::INR.format(900.0), "\u{20b9}900.00");
        assert_eq!(Currency::USD.format(12.5), "$12.50");
    }

    #[test]
    fn test_format_zero_decimals() {
        assert_eq!(Currency::JPY.format(1200.4), "\u{00a5}1200");
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Currency::from_code("inr"), Some(Currency::INR));
        assert_eq!(Currency::from_code("XYZ"), None);
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Currency::EUR).unwrap(), r#""EUR""#);
        let parsed: Currency = serde_json::from_str(r#""usd""#).unwrap();
        assert_eq!(parsed, Currency::USD);
        assert!(serde_json::from_str::<Currency>(r#""XYZ""#).is_err());
    }

    #[test]
    fn test_discounted() {
        assert!((discounted(1000.0, 10.0) - 900.0).abs() < 1e-9);
        assert_eq!(discounted(500.0, 0.0), 500.0);
        assert_eq!(discounted(200.0, 100.0), 0.0);
    }
}
