//! Spend normalization and aggregation across mixed-cycle subscriptions.

use chrono::NaiveDate;

use super::billing::{days_until_billing, total_spent_to_date};
use super::subscription::{BillingCycle, Subscription};

/// Average weeks per month. Deliberately approximate; swapping in exact week
/// counting would change every displayed total.
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// Normalized per-month cost of a subscription. One-time charges contribute
/// nothing to recurring spend.
pub fn monthly_equivalent(sub: &Subscription) -> f64 {
    match sub.cycle {
        BillingCycle::Weekly => sub.amount * WEEKS_PER_MONTH,
        BillingCycle::Monthly => sub.amount,
        BillingCycle::Quarterly => sub.amount / 3.0,
        BillingCycle::Yearly => sub.amount / 12.0,
        BillingCycle::OneTime => 0.0,
    }
}

/// Total monthly-equivalent spend over billable (active or trial)
/// subscriptions.
pub fn monthly_total(subscriptions: &[Subscription]) -> f64 {
    subscriptions
        .iter()
        .filter(|sub| sub.is_billable())
        .map(monthly_equivalent)
        .sum()
}

/// Cumulative amount spent across billable subscriptions, per
/// [`total_spent_to_date`]'s elapsed-period estimate.
pub fn total_spent(subscriptions: &[Subscription], today: NaiveDate) -> f64 {
    subscriptions
        .iter()
        .filter(|sub| sub.is_billable())
        .map(|sub| total_spent_to_date(sub, today))
        .sum()
}

/// Whether a host scheduler should surface a reminder for this subscription
/// today, given the configured lead times in days.
pub fn due_for_reminder(sub: &Subscription, today: NaiveDate, reminder_days: &[i64]) -> bool {
    sub.is_billable() && reminder_days.contains(&days_until_billing(sub, today))
}
