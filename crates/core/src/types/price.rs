//! Type-safe price representation using decimal arithmetic.
//!
//! The remote API sends money as decimal strings (`"10.50"`) next to an
//! ISO 4217 currency code on the order. `Price` pairs the two for display.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when an amount string is not a decimal number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid amount: {0:?}")]
pub struct PriceError(pub String);

/// A price with currency information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., "USD"). May be empty if the order has none.
    pub currency_code: String,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: String) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Parse an amount string as sent by the API.
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if `amount` is not a decimal number.
    pub fn parse(amount: &str, currency_code: &str) -> Result<Self, PriceError> {
        let amount =
            Decimal::from_str(amount.trim()).map_err(|_| PriceError(amount.to_owned()))?;
        Ok(Self::new(amount, currency_code.to_owned()))
    }

    /// Currency symbol for common codes, `None` otherwise.
    #[must_use]
    pub fn symbol(&self) -> Option<&'static str> {
        match self.currency_code.as_str() {
            "USD" | "CAD" | "AUD" | "NZD" | "MXN" => Some("$"),
            "EUR" => Some("€"),
            "GBP" => Some("£"),
            "JPY" => Some("¥"),
            "INR" => Some("₹"),
            _ => None,
        }
    }

    /// Format for display (e.g., "$19.99", "CHF 19.99").
    #[must_use]
    pub fn display(&self) -> String {
        let amount = self.amount.round_dp(2);
        match self.symbol() {
            Some(symbol) => format!("{symbol}{amount:.2}"),
            None if self.currency_code.is_empty() => format!("{amount:.2}"),
            None => format!("{} {amount:.2}", self.currency_code),
        }
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_known_currency() {
        let price = Price::parse("10.5", "USD").unwrap();
        assert_eq!(price.amount, Decimal::new(105, 1));
        assert_eq!(price.display(), "$10.50");
    }

    #[test]
    fn test_display_unknown_currency_uses_code() {
        let price = Price::parse("7", "CHF").unwrap();
        assert_eq!(price.to_string(), "CHF 7.00");
    }

    #[test]
    fn test_display_without_currency() {
        let price = Price::parse(" 3.456 ", "").unwrap();
        assert_eq!(price.display(), "3.46");
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = Price::parse("ten", "USD").unwrap_err();
        assert_eq!(err, PriceError("ten".to_owned()));
    }
}
