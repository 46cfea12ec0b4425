use chrono::NaiveDate;
use subtrack_core::currency::CurrencyCode;
use subtrack_core::errors::SubscriptionError;
use subtrack_core::subscriptions::{
    billing_dates_by_day, due_for_reminder, monthly_total, subscriptions_on, total_spent,
    BillingCycle, SortBy, StatusFilter, Subscription, SubscriptionStatus, SubscriptionStore,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn make_sub(
    name: &str,
    amount: f64,
    cycle: BillingCycle,
    billing_day: u32,
    start: NaiveDate,
) -> Subscription {
    Subscription::new(
        name,
        amount,
        CurrencyCode::default(),
        cycle,
        billing_day,
        start,
    )
}

#[test]
fn add_get_remove_roundtrip() {
    let mut store = SubscriptionStore::new();
    let id = store
        .add(make_sub(
            "Streamly",
            9.99,
            BillingCycle::Monthly,
            15,
            date(2025, 1, 15),
        ))
        .expect("add subscription");
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(id).map(|sub| sub.name.as_str()), Some("Streamly"));

    let removed = store.remove(id).expect("remove subscription");
    assert_eq!(removed.id, id);
    assert!(store.is_empty());
}

#[test]
fn add_rejects_invalid_records() {
    let mut store = SubscriptionStore::new();
    let mut bad = make_sub("Bad", 5.0, BillingCycle::Monthly, 15, date(2025, 1, 15));
    bad.billing_day = 40;
    let err = store.add(bad).unwrap_err();
    assert!(matches!(err, SubscriptionError::InvalidSubscription(_)));
    assert!(store.is_empty());
}

#[test]
fn update_edits_and_touches() {
    let mut store = SubscriptionStore::new();
    let id = store
        .add(make_sub(
            "Streamly",
            9.99,
            BillingCycle::Monthly,
            15,
            date(2025, 1, 15),
        ))
        .unwrap();
    let before = store.get(id).unwrap().updated_at;

    store
        .update(id, |sub| {
            sub.amount = 12.99;
            sub.notes = Some("price hike".into());
        })
        .expect("update subscription");

    let sub = store.get(id).unwrap();
    assert_eq!(sub.amount, 12.99);
    assert_eq!(sub.notes.as_deref(), Some("price hike"));
    assert!(sub.updated_at >= before);
}

#[test]
fn update_discards_invalid_edits() {
    let mut store = SubscriptionStore::new();
    let id = store
        .add(make_sub(
            "Streamly",
            9.99,
            BillingCycle::Monthly,
            15,
            date(2025, 1, 15),
        ))
        .unwrap();

    let err = store.update(id, |sub| sub.amount = -5.0).unwrap_err();
    assert!(matches!(err, SubscriptionError::InvalidSubscription(_)));
    assert_eq!(store.get(id).unwrap().amount, 9.99, "edit must not stick");
}

#[test]
fn unknown_ids_are_reported() {
    let mut store = SubscriptionStore::new();
    let ghost = uuid::Uuid::new_v4();
    assert!(matches!(
        store.update(ghost, |_| {}),
        Err(SubscriptionError::UnknownSubscription(id)) if id == ghost
    ));
    assert!(store.remove(ghost).is_err());
    assert!(store.toggle_pause(ghost).is_err());
}

#[test]
fn toggle_pause_flips_between_paused_and_active() {
    let mut store = SubscriptionStore::new();
    let id = store
        .add(make_sub(
            "Streamly",
            9.99,
            BillingCycle::Monthly,
            15,
            date(2025, 1, 15),
        ))
        .unwrap();

    assert_eq!(store.toggle_pause(id).unwrap(), SubscriptionStatus::Paused);
    assert_eq!(store.toggle_pause(id).unwrap(), SubscriptionStatus::Active);
}

fn seeded_store() -> SubscriptionStore {
    let mut store = SubscriptionStore::new();
    store
        .add(
            make_sub("Streamly", 15.99, BillingCycle::Monthly, 20, date(2025, 1, 20))
                .with_category("Streaming")
                .with_url("https://streamly.example"),
        )
        .unwrap();
    store
        .add(
            make_sub("Cloudbox", 99.0, BillingCycle::Yearly, 1, date(2025, 3, 1))
                .with_category("Cloud Storage"),
        )
        .unwrap();
    store
        .add(
            make_sub("Notewise", 4.5, BillingCycle::Monthly, 10, date(2025, 2, 10))
                .with_category("Productivity")
                .with_status(SubscriptionStatus::Paused),
        )
        .unwrap();
    store
}

#[test]
fn search_matches_name_and_category_case_insensitively() {
    let store = seeded_store();
    let today = date(2025, 8, 7);

    let by_name = store.search("STREAM", StatusFilter::All, SortBy::Name, today);
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name, "Streamly");

    let by_category = store.search("CLOUD", StatusFilter::All, SortBy::Name, today);
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].name, "Cloudbox");

    let none = store.search("zzz", StatusFilter::All, SortBy::Name, today);
    assert!(none.is_empty());
}

#[test]
fn search_filters_by_status() {
    let store = seeded_store();
    let today = date(2025, 8, 7);
    let paused = store.search(
        "",
        StatusFilter::Only(SubscriptionStatus::Paused),
        SortBy::Name,
        today,
    );
    assert_eq!(paused.len(), 1);
    assert_eq!(paused[0].name, "Notewise");
}

#[test]
fn search_sort_orders() {
    let store = seeded_store();
    let today = date(2025, 8, 7);

    let names: Vec<&str> = store
        .search("", StatusFilter::All, SortBy::Name, today)
        .iter()
        .map(|sub| sub.name.as_str())
        .collect();
    assert_eq!(names, vec!["Cloudbox", "Notewise", "Streamly"]);

    let amounts: Vec<f64> = store
        .search("", StatusFilter::All, SortBy::Amount, today)
        .iter()
        .map(|sub| sub.amount)
        .collect();
    assert_eq!(amounts, vec![99.0, 15.99, 4.5]);

    // Next occurrences from Aug 7: Notewise Aug 10, Streamly Aug 20,
    // Cloudbox Mar 1 next year.
    let by_billing: Vec<&str> = store
        .search("", StatusFilter::All, SortBy::NextBilling, today)
        .iter()
        .map(|sub| sub.name.as_str())
        .collect();
    assert_eq!(by_billing, vec!["Notewise", "Streamly", "Cloudbox"]);
}

#[test]
fn upcoming_within_horizon_excludes_far_and_unbillable() {
    let store = seeded_store();
    let today = date(2025, 8, 7);
    // Notewise is paused; Cloudbox renews next March.
    let upcoming = store.upcoming_within(30, today);
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].name, "Streamly");
}

#[test]
fn calendar_buckets_by_day_and_skips_cancelled() {
    let subs = vec![
        make_sub("Streamly", 15.99, BillingCycle::Monthly, 20, date(2025, 1, 20)),
        make_sub("Weekly Veg", 8.0, BillingCycle::Weekly, 1, date(2025, 1, 1)),
        make_sub("Gone", 5.0, BillingCycle::Monthly, 20, date(2025, 1, 20))
            .with_status(SubscriptionStatus::Cancelled),
    ];
    let by_day = billing_dates_by_day(&subs, 2025, 2);

    let streamly_day = date(2025, 2, 20);
    assert_eq!(by_day.get(&streamly_day).map(|v| v.len()), Some(1));
    assert_eq!(by_day[&streamly_day][0].name, "Streamly");

    // Four weekly buckets plus the monthly one.
    assert_eq!(by_day.len(), 5);
    for veg_day in [
        date(2025, 2, 5),
        date(2025, 2, 12),
        date(2025, 2, 19),
        date(2025, 2, 26),
    ] {
        assert_eq!(by_day[&veg_day][0].name, "Weekly Veg");
    }

    assert!(by_day
        .values()
        .flatten()
        .all(|sub| sub.status != SubscriptionStatus::Cancelled));
}

#[test]
fn subscriptions_on_returns_a_single_day() {
    let subs = vec![make_sub(
        "Streamly",
        15.99,
        BillingCycle::Monthly,
        20,
        date(2025, 1, 20),
    )];
    let hits = subscriptions_on(&subs, date(2025, 2, 20));
    assert_eq!(hits.len(), 1);
    assert!(subscriptions_on(&subs, date(2025, 2, 21)).is_empty());
}

#[test]
fn monthly_total_normalizes_cycles() {
    let subs = vec![
        make_sub("Monthly", 10.0, BillingCycle::Monthly, 1, date(2025, 1, 1)),
        make_sub("Yearly", 120.0, BillingCycle::Yearly, 1, date(2025, 1, 1)),
        make_sub("Quarterly", 30.0, BillingCycle::Quarterly, 1, date(2025, 1, 1)),
        make_sub("Once", 500.0, BillingCycle::OneTime, 1, date(2025, 1, 1)),
    ];
    // 10 + 120/12 + 30/3, one-time contributes nothing.
    assert!((monthly_total(&subs) - 30.0).abs() < 1e-9);
}

#[test]
fn total_spent_aggregates_billable_only() {
    let subs = vec![
        make_sub("Monthly", 10.0, BillingCycle::Monthly, 1, date(2025, 1, 1)),
        make_sub("Once", 50.0, BillingCycle::OneTime, 1, date(2025, 1, 1)),
        make_sub("Paused", 99.0, BillingCycle::Monthly, 1, date(2025, 1, 1))
            .with_status(SubscriptionStatus::Paused),
    ];
    // Three complete months of the monthly sub plus the one-time charge.
    assert_eq!(total_spent(&subs, date(2025, 4, 1)), 80.0);
}

#[test]
fn reminder_predicate_respects_lead_times_and_status() {
    let sub = make_sub("Streamly", 15.99, BillingCycle::Monthly, 20, date(2025, 1, 20));
    let lead_times = [1, 3];
    assert!(due_for_reminder(&sub, date(2025, 8, 17), &lead_times));
    assert!(due_for_reminder(&sub, date(2025, 8, 19), &lead_times));
    assert!(!due_for_reminder(&sub, date(2025, 8, 15), &lead_times));
    assert!(!due_for_reminder(&sub, date(2025, 8, 20), &lead_times));

    let paused = sub.clone().with_status(SubscriptionStatus::Paused);
    assert!(!due_for_reminder(&paused, date(2025, 8, 19), &lead_times));
}

#[test]
fn records_written_by_the_extension_deserialize_unchanged() {
    let raw = r#"{
        "id": "6f61b0c4-5f2e-4f61-9b34-0f3a4f6a1c11",
        "name": "Streamly",
        "url": "https://streamly.example",
        "logo": null,
        "amount": 9.99,
        "currency": "USD",
        "cycle": "one-time",
        "billingDay": 15,
        "startDate": "2025-01-15",
        "trialEndDate": null,
        "category": "Streaming",
        "status": "trial",
        "notes": null,
        "createdAt": "2025-01-15T00:00:00Z",
        "updatedAt": "2025-01-15T00:00:00Z"
    }"#;
    let sub: Subscription = serde_json::from_str(raw).expect("deserialize record");
    assert_eq!(sub.cycle, BillingCycle::OneTime);
    assert_eq!(sub.status, SubscriptionStatus::Trial);
    assert_eq!(sub.start_date, date(2025, 1, 15));
    assert!(sub.logo.is_none());
    assert!(sub.validate().is_ok());

    let json = serde_json::to_string(&sub).expect("serialize record");
    assert!(json.contains("\"one-time\""));
    assert!(json.contains("\"trial\""));
}

#[test]
fn store_from_records_validates_everything() {
    let good = make_sub("Ok", 1.0, BillingCycle::Monthly, 1, date(2025, 1, 1));
    let mut bad = make_sub("Bad", 1.0, BillingCycle::Monthly, 1, date(2025, 1, 1));
    bad.amount = f64::NAN;
    assert!(SubscriptionStore::from_records(vec![good.clone()]).is_ok());
    assert!(SubscriptionStore::from_records(vec![good, bad]).is_err());
}
