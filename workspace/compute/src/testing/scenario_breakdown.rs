use rust_decimal::Decimal;

use crate::breakdown::BreakdownFilter;
use crate::currency::CurrencyTable;
use crate::{default_compute, BudgetCalculator};

use super::helpers;

#[tokio::test]
async fn test_breakdown_resolves_rate_history_per_entry() {
    let db = helpers::setup_db().await;

    let user = helpers::create_user(&db, "alice", Some("Alice Doe")).await;
    let project = helpers::create_project(&db, "Relaunch").await;

    // Rate history: 10/hr from January, 20/hr from February
    helpers::create_rate(
        &db,
        user.id,
        project.id,
        "USD",
        Decimal::new(10, 0),
        helpers::dt("2024-01-01 00:00:00"),
    )
    .await;
    helpers::create_rate(
        &db,
        user.id,
        project.id,
        "USD",
        Decimal::new(20, 0),
        helpers::dt("2024-02-01 00:00:00"),
    )
    .await;

    // One task started mid-January, one mid-February, 5 hours booked each
    let january_task =
        helpers::create_task(&db, project.id, "January work", Some(helpers::dt("2024-01-15 09:00:00")))
            .await;
    let february_task =
        helpers::create_task(&db, project.id, "February work", Some(helpers::dt("2024-02-15 09:00:00")))
            .await;
    helpers::create_time_entry(&db, january_task.id, user.id, "Work", Decimal::new(5, 0)).await;
    helpers::create_time_entry(&db, february_task.id, user.id, "Work", Decimal::new(5, 0)).await;

    let compute = default_compute(Some(helpers::dt("2024-06-01 12:00:00")));
    let mut annotated = compute
        .compute_breakdown(&db, project.id, BreakdownFilter::default())
        .await
        .unwrap();
    annotated.sort_by_key(|a| a.entry.start);

    assert_eq!(annotated.len(), 2);
    // January entry at 10/hr, February entry at 20/hr
    assert_eq!(annotated[0].cost, Decimal::new(50, 0));
    assert_eq!(annotated[1].cost, Decimal::new(100, 0));
    assert_eq!(annotated[0].entry.username, "alice");
    assert_eq!(annotated[0].entry.task_title, "January work");
}

#[tokio::test]
async fn test_breakdown_filters_by_user() {
    let db = helpers::setup_db().await;

    let alice = helpers::create_user(&db, "alice", None).await;
    let bob = helpers::create_user(&db, "bob", None).await;
    let project = helpers::create_project(&db, "Relaunch").await;
    let task =
        helpers::create_task(&db, project.id, "Design", Some(helpers::dt("2024-01-02 09:00:00"))).await;

    helpers::create_time_entry(&db, task.id, alice.id, "Wireframes", Decimal::new(5, 0)).await;
    helpers::create_time_entry(&db, task.id, bob.id, "Reviews", Decimal::new(2, 0)).await;

    let compute = default_compute(Some(helpers::dt("2024-06-01 12:00:00")));

    let all = compute
        .compute_breakdown(&db, project.id, BreakdownFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let only_bob = compute
        .compute_breakdown(&db, project.id, BreakdownFilter { user_id: Some(bob.id) })
        .await
        .unwrap();
    assert_eq!(only_bob.len(), 1);
    assert_eq!(only_bob[0].entry.username, "bob");
}

#[tokio::test]
async fn test_breakdown_excludes_non_positive_time_and_other_projects() {
    let db = helpers::setup_db().await;

    let user = helpers::create_user(&db, "alice", None).await;
    let project = helpers::create_project(&db, "Relaunch").await;
    let other_project = helpers::create_project(&db, "Elsewhere").await;

    let task =
        helpers::create_task(&db, project.id, "Design", Some(helpers::dt("2024-01-02 09:00:00"))).await;
    let other_task = helpers::create_task(
        &db,
        other_project.id,
        "Other design",
        Some(helpers::dt("2024-01-02 09:00:00")),
    )
    .await;

    helpers::create_time_entry(&db, task.id, user.id, "Booked", Decimal::new(3, 0)).await;
    helpers::create_time_entry(&db, task.id, user.id, "Placeholder", Decimal::ZERO).await;
    helpers::create_time_entry(&db, other_task.id, user.id, "Foreign", Decimal::new(9, 0)).await;

    let compute = default_compute(Some(helpers::dt("2024-06-01 12:00:00")));
    let annotated = compute
        .compute_breakdown(&db, project.id, BreakdownFilter::default())
        .await
        .unwrap();

    assert_eq!(annotated.len(), 1);
    assert_eq!(annotated[0].entry.entry_title, "Booked");
}

#[tokio::test]
async fn test_rates_of_other_projects_do_not_apply() {
    let db = helpers::setup_db().await;

    let user = helpers::create_user(&db, "alice", None).await;
    let project = helpers::create_project(&db, "Relaunch").await;
    let other_project = helpers::create_project(&db, "Elsewhere").await;

    // The user is only rated on the other project
    helpers::create_rate(
        &db,
        user.id,
        other_project.id,
        "USD",
        Decimal::new(99, 0),
        helpers::dt("2024-01-01 00:00:00"),
    )
    .await;

    let task =
        helpers::create_task(&db, project.id, "Design", Some(helpers::dt("2024-01-02 09:00:00"))).await;
    helpers::create_time_entry(&db, task.id, user.id, "Wireframes", Decimal::new(4, 0)).await;

    let compute = default_compute(Some(helpers::dt("2024-06-01 12:00:00")));
    let annotated = compute
        .compute_breakdown(&db, project.id, BreakdownFilter::default())
        .await
        .unwrap();

    assert_eq!(annotated.len(), 1);
    assert_eq!(annotated[0].cost, Decimal::ZERO);
}

#[tokio::test]
async fn test_foreign_currency_rate_converts_to_base() {
    let db = helpers::setup_db().await;

    let user = helpers::create_user(&db, "alice", None).await;
    let project = helpers::create_project(&db, "Relaunch").await;

    helpers::create_currency_rate(&db, "EUR", Decimal::new(11, 1)).await; // 1.1
    helpers::create_rate(
        &db,
        user.id,
        project.id,
        "EUR",
        Decimal::new(20, 0),
        helpers::dt("2024-01-01 00:00:00"),
    )
    .await;

    let task =
        helpers::create_task(&db, project.id, "Design", Some(helpers::dt("2024-01-02 09:00:00"))).await;
    helpers::create_time_entry(&db, task.id, user.id, "Wireframes", Decimal::new(5, 0)).await;

    let converter = CurrencyTable::load(&db, "USD").await.unwrap();
    let compute = BudgetCalculator::new_with_now(
        helpers::dt("2024-06-01 12:00:00"),
        Box::new(converter),
    );

    let annotated = compute
        .compute_breakdown(&db, project.id, BreakdownFilter::default())
        .await
        .unwrap();

    // 20 EUR/hr * 1.1 * 5h = 110 in base currency
    assert_eq!(annotated[0].cost, Decimal::new(110, 0));
}

#[tokio::test]
async fn test_empty_project_yields_empty_breakdown() {
    let db = helpers::setup_db().await;
    let project = helpers::create_project(&db, "Relaunch").await;

    let compute = default_compute(Some(helpers::dt("2024-06-01 12:00:00")));
    let annotated = compute
        .compute_breakdown(&db, project.id, BreakdownFilter::default())
        .await
        .unwrap();

    assert!(annotated.is_empty());
}
