use serde::{Deserialize, Serialize};

use crate::currency::CurrencyCode;

/// User-facing settings. Persisting them is the embedding frontend's job;
/// this crate only defines the shape and the shipped defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub primary_currency: CurrencyCode,
    pub theme: ThemeMode,
    /// Lead times, in days, at which an upcoming charge should be surfaced.
    pub reminder_days_before: Vec<i64>,
    pub enable_notifications: bool,
    pub language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            primary_currency: CurrencyCode::default(),
            theme: ThemeMode::Dark,
            reminder_days_before: vec![1, 3],
            enable_notifications: true,
            language: "en".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}
