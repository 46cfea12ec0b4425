use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display symbol for the currency, falling back to the code itself.
    pub fn symbol(&self) -> &str {
        CURRENCY_SYMBOLS
            .get(self.0.as_str())
            .copied()
            .unwrap_or(self.0.as_str())
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Currencies offered by the subscription form, in display order.
pub const SUPPORTED_CURRENCIES: [&str; 20] = [
    "USD", "EUR", "GBP", "CNY", "JPY", "KRW", "CAD", "AUD", "CHF", "HKD", "SGD", "SEK", "NOK",
    "DKK", "INR", "BRL", "MXN", "TWD", "THB", "RUB",
];

static CURRENCY_SYMBOLS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("USD", "$"),
        ("EUR", "\u{20AC}"),
        ("GBP", "\u{A3}"),
        ("CNY", "\u{A5}"),
        ("JPY", "\u{A5}"),
        ("KRW", "\u{20A9}"),
        ("CAD", "C$"),
        ("AUD", "A$"),
        ("CHF", "CHF"),
        ("HKD", "HK$"),
        ("SGD", "S$"),
        ("SEK", "kr"),
        ("NOK", "kr"),
        ("DKK", "kr"),
        ("INR", "\u{20B9}"),
        ("BRL", "R$"),
        ("MXN", "MX$"),
        ("TWD", "NT$"),
        ("THB", "\u{E3F}"),
        ("RUB", "\u{20BD}"),
    ])
});

/// Formats an amount with its currency symbol and two decimal places.
pub fn format_amount(amount: f64, currency: &CurrencyCode) -> String {
    format!("{}{:.2}", currency.symbol(), amount)
}

/// Like [`format_amount`] but drops the fractional part on whole amounts,
/// for tight calendar-cell layouts.
pub fn format_amount_short(amount: f64, currency: &CurrencyCode) -> String {
    if amount == amount.floor() {
        format!("{}{}", currency.symbol(), amount as i64)
    } else {
        format!("{}{:.2}", currency.symbol(), amount)
    }
}
