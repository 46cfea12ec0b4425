//! Pure billing-schedule arithmetic.
//!
//! Every function here is deterministic over its explicit inputs: the
//! subscription record plus a reference date or target month. The system
//! clock is never read; callers supply "today" (see [`crate::utils::today`]).

use chrono::{Datelike, Duration, NaiveDate};

use super::subscription::{BillingCycle, Subscription};

/// Upper bound on cycle-advancement iterations. Weekly is the densest cycle,
/// so this covers several decades of elapsed schedule.
const MAX_CYCLE_STEPS: usize = 4096;

const DAYS_PER_WEEK: i64 = 7;

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

/// Moves `date` to the nominal billing day, reduced to the last valid day of
/// the month when the nominal day overshoots it.
fn clamp_day(date: NaiveDate, day: u32) -> NaiveDate {
    let clamped = day.min(days_in_month(date.year(), date.month()));
    NaiveDate::from_ymd_opt(date.year(), date.month(), clamped).unwrap_or(date)
}

fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

/// Advances one cycle period. Month-stepped cycles re-clamp to the nominal
/// billing day after every step, so a day-31 anchor returns to the 31st in
/// any month long enough to hold it.
fn advance_one_cycle(date: NaiveDate, cycle: BillingCycle, billing_day: u32) -> NaiveDate {
    match cycle {
        BillingCycle::Weekly => date + Duration::weeks(1),
        BillingCycle::Monthly => clamp_day(add_months(date, 1), billing_day),
        BillingCycle::Quarterly => clamp_day(add_months(date, 3), billing_day),
        BillingCycle::Yearly => clamp_day(add_months(date, 12), billing_day),
        BillingCycle::OneTime => date,
    }
}

/// First occurrence on or after `today`.
///
/// One-time subscriptions return their start date unconditionally, even when
/// it lies in the past; callers decide how to present an already-billed
/// charge.
pub fn next_billing_date(sub: &Subscription, today: NaiveDate) -> NaiveDate {
    let mut next = match sub.cycle {
        BillingCycle::Weekly | BillingCycle::OneTime => sub.start_date,
        BillingCycle::Monthly | BillingCycle::Quarterly | BillingCycle::Yearly => {
            clamp_day(sub.start_date, sub.billing_day)
        }
    };
    if sub.cycle == BillingCycle::OneTime {
        return next;
    }
    let mut guard = 0usize;
    while next < today && guard < MAX_CYCLE_STEPS {
        next = advance_one_cycle(next, sub.cycle, sub.billing_day);
        guard += 1;
    }
    next
}

/// The occurrence falling inside the given calendar month, if any.
///
/// Months are 1-based. Weekly subscriptions always return `None` here because
/// they bill several times a month; use [`weekly_billing_dates_in_month`].
pub fn billing_date_in_month(sub: &Subscription, year: i32, month: u32) -> Option<NaiveDate> {
    match sub.cycle {
        BillingCycle::OneTime => {
            if sub.start_date.year() == year && sub.start_date.month() == month {
                Some(sub.start_date)
            } else {
                None
            }
        }
        BillingCycle::Weekly => None,
        BillingCycle::Monthly | BillingCycle::Quarterly | BillingCycle::Yearly => {
            let day = sub.billing_day.min(days_in_month(year, month));
            let candidate = NaiveDate::from_ymd_opt(year, month, day)?;
            // No occurrence predates the subscription, including in its own
            // start month when the billing day falls before the start day.
            if candidate < sub.start_date {
                return None;
            }
            match sub.cycle {
                BillingCycle::Yearly => {
                    if sub.start_date.month() != month {
                        return None;
                    }
                }
                BillingCycle::Quarterly => {
                    let offset = (year - sub.start_date.year()) * 12
                        + (month as i32 - sub.start_date.month() as i32);
                    if offset < 0 || offset % 3 != 0 {
                        return None;
                    }
                }
                _ => {}
            }
            Some(candidate)
        }
    }
}

/// Every weekly occurrence inside the given calendar month, ascending.
/// Empty for any other cycle.
pub fn weekly_billing_dates_in_month(sub: &Subscription, year: i32, month: u32) -> Vec<NaiveDate> {
    if sub.cycle != BillingCycle::Weekly {
        return Vec::new();
    }
    let month_start = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => date,
        None => return Vec::new(),
    };
    let month_end = clamp_day(month_start, days_in_month(year, month));

    let mut dates = Vec::new();
    let mut current = sub.start_date;
    while current < month_start {
        current += Duration::weeks(1);
    }
    while current <= month_end {
        // Collect only dates inside the target month itself.
        if current.year() == year && current.month() == month {
            dates.push(current);
        }
        current += Duration::weeks(1);
    }
    dates
}

/// Amount charged so far: `amount` times the number of complete cycle
/// periods elapsed since the start date.
///
/// This counts elapsed periods, not occurrences as adjusted by day-of-month
/// clamping, so for high billing days the two can differ by a sub-period
/// phase. It is a magnitude estimate, not a ledger.
pub fn total_spent_to_date(sub: &Subscription, today: NaiveDate) -> f64 {
    if today < sub.start_date {
        return 0.0;
    }
    let periods = match sub.cycle {
        BillingCycle::OneTime => return sub.amount,
        BillingCycle::Weekly => (today - sub.start_date).num_days() / DAYS_PER_WEEK,
        BillingCycle::Monthly => complete_months_between(sub.start_date, today),
        BillingCycle::Quarterly => complete_months_between(sub.start_date, today) / 3,
        BillingCycle::Yearly => complete_months_between(sub.start_date, today) / 12,
    };
    periods.max(0) as f64 * sub.amount
}

/// Whole days from `today` until the next occurrence. Non-negative for every
/// recurring cycle; a one-time charge already billed yields a negative count.
pub fn days_until_billing(sub: &Subscription, today: NaiveDate) -> i64 {
    (next_billing_date(sub, today) - today).num_days()
}

fn complete_months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut months =
        (end.year() - start.year()) as i64 * 12 + (end.month() as i64 - start.month() as i64);
    if months > 0 && add_months(start, months as i32) > end {
        months -= 1;
    }
    months.max(0)
}
