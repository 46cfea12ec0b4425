use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::CurrencyCode;
use crate::errors::SubscriptionError;

pub const MIN_BILLING_DAY: u32 = 1;
pub const MAX_BILLING_DAY: u32 = 31;

/// A recurring (or one-time) service charge as entered by the user.
///
/// The record is plain data: schedule math lives in [`crate::subscriptions::billing`]
/// and never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub amount: f64,
    pub currency: CurrencyCode,
    pub cycle: BillingCycle,
    /// Nominal day of month the charge occurs, clamped in shorter months.
    /// Ignored for weekly and one-time cycles.
    pub billing_day: u32,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_end_date: Option<NaiveDate>,
    pub category: String,
    pub status: SubscriptionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        currency: CurrencyCode,
        cycle: BillingCycle,
        billing_day: u32,
        start_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            url: None,
            logo: None,
            amount,
            currency,
            cycle,
            billing_day,
            start_date,
            trial_end_date: None,
            category: "Other".into(),
            status: SubscriptionStatus::Active,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_status(mut self, status: SubscriptionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Fail-fast check applied when a record enters the store. Schedule
    /// functions assume these preconditions hold and never re-check them.
    pub fn validate(&self) -> Result<(), SubscriptionError> {
        if self.name.trim().is_empty() {
            return Err(SubscriptionError::InvalidSubscription(
                "name must not be empty".into(),
            ));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(SubscriptionError::InvalidSubscription(format!(
                "amount must be a non-negative number, got {}",
                self.amount
            )));
        }
        if !(MIN_BILLING_DAY..=MAX_BILLING_DAY).contains(&self.billing_day) {
            return Err(SubscriptionError::InvalidSubscription(format!(
                "billing day must be within {}..={}, got {}",
                MIN_BILLING_DAY, MAX_BILLING_DAY, self.billing_day
            )));
        }
        Ok(())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn is_billable(&self) -> bool {
        self.status.is_billable()
    }
}

/// Recurrence pattern of a subscription's charge.
///
/// Every schedule function matches exhaustively on this enum, so adding a
/// cycle fails to compile until all call sites handle it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BillingCycle {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    OneTime,
}

impl BillingCycle {
    pub fn label(&self) -> &'static str {
        match self {
            BillingCycle::Weekly => "Weekly",
            BillingCycle::Monthly => "Monthly",
            BillingCycle::Quarterly => "Quarterly",
            BillingCycle::Yearly => "Yearly",
            BillingCycle::OneTime => "One-time",
        }
    }

    /// Short per-period suffix for price labels, e.g. "$9.99/mo".
    pub fn suffix(&self) -> &'static str {
        match self {
            BillingCycle::Weekly => "/wk",
            BillingCycle::Monthly => "/mo",
            BillingCycle::Quarterly => "/qtr",
            BillingCycle::Yearly => "/yr",
            BillingCycle::OneTime => "",
        }
    }

    /// Period length in months for the month-stepped cycles.
    pub fn months(&self) -> Option<u32> {
        match self {
            BillingCycle::Monthly => Some(1),
            BillingCycle::Quarterly => Some(3),
            BillingCycle::Yearly => Some(12),
            BillingCycle::Weekly | BillingCycle::OneTime => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Paused,
    Trial,
    Cancelled,
}

impl SubscriptionStatus {
    /// Whether the subscription currently incurs charges and should count
    /// toward spend totals.
    pub fn is_billable(&self) -> bool {
        matches!(self, SubscriptionStatus::Active | SubscriptionStatus::Trial)
    }
}
