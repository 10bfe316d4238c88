use rust_decimal::Decimal;

use crate::default_compute;

use super::helpers;

#[tokio::test]
async fn test_series_reconciles_credits_against_costs() {
    let db = helpers::setup_db().await;

    let user = helpers::create_user(&db, "alice", None).await;
    let project = helpers::create_project(&db, "Relaunch").await;

    helpers::create_rate(
        &db,
        user.id,
        project.id,
        "USD",
        Decimal::new(20, 0),
        helpers::dt("2024-01-01 00:00:00"),
    )
    .await;

    // Credit on the 1st, 5 hours of work on the 2nd
    helpers::create_credit(
        &db,
        project.id,
        Decimal::new(100, 0),
        "Kickoff",
        helpers::day("2024-01-01"),
    )
    .await;
    let task =
        helpers::create_task(&db, project.id, "Design", Some(helpers::dt("2024-01-02 09:00:00"))).await;
    helpers::create_time_entry(&db, task.id, user.id, "Wireframes", Decimal::new(5, 0)).await;

    let compute = default_compute(Some(helpers::dt("2024-03-01 12:00:00")));
    let df = compute.compute_daily_series(&db, project.id).await.unwrap();

    assert_eq!(df.height(), 2);

    let ins = df.column("in").unwrap().str().unwrap();
    let outs = df.column("out").unwrap().str().unwrap();
    let lefts = df.column("left").unwrap().str().unwrap();

    assert_eq!(ins.get(0), Some("100"));
    assert_eq!(outs.get(0), Some("0"));
    assert_eq!(lefts.get(0), Some("100"));

    assert_eq!(ins.get(1), Some("0"));
    assert_eq!(outs.get(1), Some("-100"));
    assert_eq!(lefts.get(1), Some("0"));
}

#[tokio::test]
async fn test_series_of_empty_project_is_empty() {
    let db = helpers::setup_db().await;
    let project = helpers::create_project(&db, "Relaunch").await;

    let compute = default_compute(Some(helpers::dt("2024-03-01 12:00:00")));
    let df = compute.compute_daily_series(&db, project.id).await.unwrap();

    assert_eq!(df.height(), 0);
    assert_eq!(df.get_column_names_str(), vec!["date", "in", "out", "left"]);
}

#[tokio::test]
async fn test_startless_task_buckets_on_computation_day() {
    let db = helpers::setup_db().await;

    let user = helpers::create_user(&db, "alice", None).await;
    let project = helpers::create_project(&db, "Relaunch").await;

    helpers::create_rate(
        &db,
        user.id,
        project.id,
        "USD",
        Decimal::new(10, 0),
        helpers::dt("2024-01-01 00:00:00"),
    )
    .await;

    let task = helpers::create_task(&db, project.id, "Unscheduled", None).await;
    helpers::create_time_entry(&db, task.id, user.id, "Prep", Decimal::new(2, 0)).await;

    let compute = default_compute(Some(helpers::dt("2024-03-01 12:00:00")));
    let df = compute.compute_daily_series(&db, project.id).await.unwrap();

    // The cost lands on 2024-03-01, not on a null bucket
    assert_eq!(df.height(), 1);
    let outs = df.column("out").unwrap().str().unwrap();
    assert_eq!(outs.get(0), Some("-20"));
}

#[tokio::test]
async fn test_negative_credits_stay_out_of_the_series() {
    let db = helpers::setup_db().await;
    let project = helpers::create_project(&db, "Relaunch").await;

    helpers::create_credit(
        &db,
        project.id,
        Decimal::new(100, 0),
        "Kickoff",
        helpers::day("2024-01-01"),
    )
    .await;
    helpers::create_credit(
        &db,
        project.id,
        Decimal::new(-40, 0),
        "Correction",
        helpers::day("2024-01-02"),
    )
    .await;

    let compute = default_compute(Some(helpers::dt("2024-03-01 12:00:00")));
    let df = compute.compute_daily_series(&db, project.id).await.unwrap();

    // Only the positive credit is reflected
    assert_eq!(df.height(), 1);
    let lefts = df.column("left").unwrap().str().unwrap();
    assert_eq!(lefts.get(0), Some("100"));
}
