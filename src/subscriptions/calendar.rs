//! Buckets billing occurrences by day for calendar rendering.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use super::billing::{billing_date_in_month, weekly_billing_dates_in_month};
use super::subscription::{BillingCycle, Subscription, SubscriptionStatus};

/// Maps every day of the given month that has at least one occurrence to the
/// subscriptions billing on it, in ascending date order. Cancelled
/// subscriptions never appear; weekly ones may appear under several days.
pub fn billing_dates_by_day(
    subscriptions: &[Subscription],
    year: i32,
    month: u32,
) -> BTreeMap<NaiveDate, Vec<Subscription>> {
    let mut by_day: BTreeMap<NaiveDate, Vec<Subscription>> = BTreeMap::new();
    for sub in subscriptions {
        if sub.status == SubscriptionStatus::Cancelled {
            continue;
        }
        if sub.cycle == BillingCycle::Weekly {
            for occurrence in weekly_billing_dates_in_month(sub, year, month) {
                by_day.entry(occurrence).or_default().push(sub.clone());
            }
        } else if let Some(occurrence) = billing_date_in_month(sub, year, month) {
            by_day.entry(occurrence).or_default().push(sub.clone());
        }
    }
    by_day
}

/// Subscriptions billing on one specific day, for a day-detail view.
pub fn subscriptions_on(subscriptions: &[Subscription], date: NaiveDate) -> Vec<Subscription> {
    billing_dates_by_day(subscriptions, date.year(), date.month())
        .remove(&date)
        .unwrap_or_default()
}
