//! Owning collection of subscription records with the query surface the
//! list and calendar views consume. Persistence of the collection belongs to
//! the embedding frontend; every record type serializes with serde.

use std::cmp::Ordering;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::SubscriptionError;

use super::billing::{days_until_billing, next_billing_date};
use super::subscription::{Subscription, SubscriptionStatus};

/// Sort orders offered by the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    /// Soonest upcoming charge first.
    NextBilling,
    /// Case-insensitive alphabetical.
    Name,
    /// Most expensive first.
    Amount,
    /// Most recently added first.
    DateAdded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(SubscriptionStatus),
}

impl StatusFilter {
    fn matches(&self, sub: &Subscription) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => sub.status == *status,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubscriptionStore {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from already-deserialized records, validating each.
    pub fn from_records(records: Vec<Subscription>) -> Result<Self, SubscriptionError> {
        for record in &records {
            record.validate()?;
        }
        Ok(Self {
            subscriptions: records,
        })
    }

    pub fn add(&mut self, subscription: Subscription) -> Result<Uuid, SubscriptionError> {
        subscription.validate()?;
        let id = subscription.id;
        self.subscriptions.push(subscription);
        Ok(id)
    }

    pub fn get(&self, id: Uuid) -> Option<&Subscription> {
        self.subscriptions.iter().find(|sub| sub.id == id)
    }

    /// Applies an edit to the record, refreshing its updated-at stamp. The
    /// edit is discarded if it leaves the record invalid.
    pub fn update<F>(&mut self, id: Uuid, edit: F) -> Result<(), SubscriptionError>
    where
        F: FnOnce(&mut Subscription),
    {
        let slot = self
            .subscriptions
            .iter_mut()
            .find(|sub| sub.id == id)
            .ok_or(SubscriptionError::UnknownSubscription(id))?;
        let mut updated = slot.clone();
        edit(&mut updated);
        updated.id = id;
        updated.validate()?;
        updated.touch();
        *slot = updated;
        Ok(())
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Subscription, SubscriptionError> {
        let index = self
            .subscriptions
            .iter()
            .position(|sub| sub.id == id)
            .ok_or(SubscriptionError::UnknownSubscription(id))?;
        Ok(self.subscriptions.remove(index))
    }

    /// Flips a paused subscription back to active; any other status pauses.
    pub fn toggle_pause(&mut self, id: Uuid) -> Result<SubscriptionStatus, SubscriptionError> {
        let mut toggled = SubscriptionStatus::Paused;
        self.update(id, |sub| {
            sub.status = if sub.status == SubscriptionStatus::Paused {
                SubscriptionStatus::Active
            } else {
                SubscriptionStatus::Paused
            };
            toggled = sub.status;
        })?;
        Ok(toggled)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subscription> {
        self.subscriptions.iter()
    }

    pub fn records(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Case-insensitive name/category search, optional status filter, sorted
    /// per `sort`. `today` anchors the next-billing order.
    pub fn search(
        &self,
        query: &str,
        status: StatusFilter,
        sort: SortBy,
        today: NaiveDate,
    ) -> Vec<&Subscription> {
        let needle = query.trim().to_lowercase();
        let mut result: Vec<&Subscription> = self
            .subscriptions
            .iter()
            .filter(|sub| {
                needle.is_empty()
                    || sub.name.to_lowercase().contains(&needle)
                    || sub.category.to_lowercase().contains(&needle)
            })
            .filter(|sub| status.matches(sub))
            .collect();

        match sort {
            SortBy::NextBilling => {
                result.sort_by_key(|sub| next_billing_date(sub, today));
            }
            SortBy::Name => {
                result.sort_by_key(|sub| sub.name.to_lowercase());
            }
            SortBy::Amount => {
                result.sort_by(|a, b| {
                    b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal)
                });
            }
            SortBy::DateAdded => {
                result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
        }
        result
    }

    /// Billable subscriptions whose next charge lands within `days` of
    /// `today`, soonest first. Already-billed one-time charges are excluded.
    pub fn upcoming_within(&self, days: i64, today: NaiveDate) -> Vec<&Subscription> {
        let mut result: Vec<&Subscription> = self
            .subscriptions
            .iter()
            .filter(|sub| sub.is_billable())
            .filter(|sub| {
                let until = days_until_billing(sub, today);
                (0..=days).contains(&until)
            })
            .collect();
        result.sort_by_key(|sub| next_billing_date(sub, today));
        result
    }
}
