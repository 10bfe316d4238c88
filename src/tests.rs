#[cfg(test)]
mod integration_tests {
    use crate::schemas::ApiResponse;
    use crate::test_utils::test_utils::setup_test_app;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use std::str::FromStr;

    fn decimal(value: &Value) -> Decimal {
        Decimal::from_str(value.as_str().expect("expected a decimal string")).unwrap()
    }

    async fn create_project(server: &TestServer, name: &str) -> i64 {
        let response = server
            .post("/api/v1/projects")
            .json(&json!({ "name": name }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    async fn create_user(server: &TestServer, username: &str) -> i64 {
        let response = server
            .post("/api/v1/users")
            .json(&json!({ "username": username, "name": null }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    async fn create_task(
        server: &TestServer,
        project_id: i64,
        title: &str,
        created_at: Option<&str>,
    ) -> i64 {
        let response = server
            .post(&format!("/api/v1/projects/{}/tasks", project_id))
            .json(&json!({ "title": title, "created_at": created_at }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    async fn create_time_entry(server: &TestServer, task_id: i64, user_id: i64, hours: &str) {
        let response = server
            .post(&format!("/api/v1/tasks/{}/time-entries", task_id))
            .json(&json!({ "user_id": user_id, "title": "Work", "time_spent": hours }))
            .await;
        response.assert_status(StatusCode::CREATED);
    }

    async fn create_hourly_rate(
        server: &TestServer,
        project_id: i64,
        user_id: i64,
        rate: &str,
        effective_from: &str,
    ) {
        let response = server
            .post(&format!("/api/v1/projects/{}/hourly-rates", project_id))
            .json(&json!({
                "user_id": user_id,
                "currency": "USD",
                "rate": rate,
                "effective_from": effective_from,
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
    }

    async fn create_budget_line(server: &TestServer, project_id: i64, amount: &str, date: &str) -> i64 {
        let response = server
            .post(&format!("/api/v1/projects/{}/budget-lines", project_id))
            .json(&json!({ "amount": amount, "comment": "Budget", "date": date }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;
        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_and_list_users() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/users")
            .json(&json!({ "username": "alice", "name": "Alice Doe" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        assert!(body.success);
        assert_eq!(body.data["username"], "alice");

        let response = server.get("/api/v1/users").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<Value>> = response.json();
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0]["name"], "Alice Doe");
    }

    #[tokio::test]
    async fn test_budget_line_slash_date_normalizes_to_iso() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let project_id = create_project(&server, "Relaunch").await;

        let response = server
            .post(&format!("/api/v1/projects/{}/budget-lines", project_id))
            .json(&json!({ "amount": "100", "comment": "Kickoff", "date": "15/03/2024" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.data["date"], "2024-03-15");
    }

    #[tokio::test]
    async fn test_budget_line_missing_amount_fails_validation() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let project_id = create_project(&server, "Relaunch").await;

        let response = server
            .post(&format!("/api/v1/projects/{}/budget-lines", project_id))
            .json(&json!({ "comment": "No amount" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["errors"]["amount"][0], "Field required");

        // Nothing was persisted
        let response = server
            .get(&format!("/api/v1/projects/{}/budget-lines", project_id))
            .await;
        let body: ApiResponse<Vec<Value>> = response.json();
        assert!(body.data.is_empty());
    }

    #[tokio::test]
    async fn test_budget_line_rejects_unparsable_date() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let project_id = create_project(&server, "Relaunch").await;

        let response = server
            .post(&format!("/api/v1/projects/{}/budget-lines", project_id))
            .json(&json!({ "amount": "100", "date": "next tuesday" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["errors"]["date"][0].as_str().unwrap().contains("DD/MM/YYYY"));
    }

    #[tokio::test]
    async fn test_budget_lines_listed_newest_day_first() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let project_id = create_project(&server, "Relaunch").await;

        create_budget_line(&server, project_id, "100", "2024-01-01").await;
        create_budget_line(&server, project_id, "200", "2024-02-01").await;
        create_budget_line(&server, project_id, "300", "2024-01-15").await;

        let response = server
            .get(&format!("/api/v1/projects/{}/budget-lines", project_id))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<Value>> = response.json();

        let dates: Vec<&str> = body.data.iter().map(|l| l["date"].as_str().unwrap()).collect();
        assert_eq!(dates, vec!["2024-02-01", "2024-01-15", "2024-01-01"]);
    }

    #[tokio::test]
    async fn test_budget_total_sums_all_amounts() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let project_id = create_project(&server, "Relaunch").await;

        // Empty project totals zero
        let response = server
            .get(&format!("/api/v1/projects/{}/budget-lines/total", project_id))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(decimal(&body.data["total"]), Decimal::ZERO);

        // Negative corrections count towards the total
        create_budget_line(&server, project_id, "100", "2024-01-01").await;
        create_budget_line(&server, project_id, "-25.5", "2024-01-02").await;

        let response = server
            .get(&format!("/api/v1/projects/{}/budget-lines/total", project_id))
            .await;
        let body: ApiResponse<Value> = response.json();
        assert_eq!(decimal(&body.data["total"]), Decimal::from_str("74.5").unwrap());
    }

    #[tokio::test]
    async fn test_delete_budget_line() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let project_id = create_project(&server, "Relaunch").await;
        let line_id = create_budget_line(&server, project_id, "100", "2024-01-01").await;

        let response = server.delete(&format!("/api/v1/budget-lines/{}", line_id)).await;
        response.assert_status(StatusCode::OK);

        let response = server
            .get(&format!("/api/v1/projects/{}/budget-lines", project_id))
            .await;
        let body: ApiResponse<Vec<Value>> = response.json();
        assert!(body.data.is_empty());

        // Deleting again reports not found rather than a hard failure
        let response = server.delete(&format!("/api/v1/budget-lines/{}", line_id)).await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_breakdown_costs_follow_rate_history() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let project_id = create_project(&server, "Relaunch").await;
        let user_id = create_user(&server, "alice").await;

        create_hourly_rate(&server, project_id, user_id, "10", "2024-01-01T00:00:00").await;
        create_hourly_rate(&server, project_id, user_id, "20", "2024-02-01T00:00:00").await;

        let january_task =
            create_task(&server, project_id, "January work", Some("2024-01-15T09:00:00")).await;
        let february_task =
            create_task(&server, project_id, "February work", Some("2024-02-15T09:00:00")).await;
        create_time_entry(&server, january_task, user_id, "5").await;
        create_time_entry(&server, february_task, user_id, "5").await;

        let response = server
            .get(&format!("/api/v1/projects/{}/budget/breakdown", project_id))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<Value>> = response.json();

        // Sorted newest start first: February entry at 20/hr, January at 10/hr
        assert_eq!(body.data.len(), 2);
        assert_eq!(body.data[0]["task_title"], "February work");
        assert_eq!(decimal(&body.data[0]["cost"]), Decimal::new(100, 0));
        assert_eq!(body.data[1]["task_title"], "January work");
        assert_eq!(decimal(&body.data[1]["cost"]), Decimal::new(50, 0));
    }

    #[tokio::test]
    async fn test_breakdown_filters_by_user_and_ignores_unknown_keys() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let project_id = create_project(&server, "Relaunch").await;
        let alice = create_user(&server, "alice").await;
        let bob = create_user(&server, "bob").await;

        let task = create_task(&server, project_id, "Design", Some("2024-01-02T09:00:00")).await;
        create_time_entry(&server, task, alice, "5").await;
        create_time_entry(&server, task, bob, "2").await;

        // An unrecognized filter key is silently ignored
        let response = server
            .get(&format!(
                "/api/v1/projects/{}/budget/breakdown?user_id={}&task_color=blue",
                project_id, bob
            ))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<Value>> = response.json();

        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0]["username"], "bob");
    }

    #[tokio::test]
    async fn test_breakdown_pages_cap_at_thirty() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let project_id = create_project(&server, "Relaunch").await;
        let user_id = create_user(&server, "alice").await;
        let task = create_task(&server, project_id, "Design", Some("2024-01-02T09:00:00")).await;
        create_time_entry(&server, task, user_id, "1").await;
        create_time_entry(&server, task, user_id, "2").await;

        let response = server
            .get(&format!("/api/v1/projects/{}/budget/breakdown?page=1", project_id))
            .await;
        let body: ApiResponse<Vec<Value>> = response.json();
        assert_eq!(body.data.len(), 2);

        // Past the last page the list is empty, not an error
        let response = server
            .get(&format!("/api/v1/projects/{}/budget/breakdown?page=2", project_id))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<Value>> = response.json();
        assert!(body.data.is_empty());
    }

    #[tokio::test]
    async fn test_daily_series_reconciles_credit_against_work() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let project_id = create_project(&server, "Relaunch").await;
        let user_id = create_user(&server, "alice").await;

        create_budget_line(&server, project_id, "100", "2024-01-01").await;
        create_hourly_rate(&server, project_id, user_id, "20", "2024-01-01T00:00:00").await;
        let task = create_task(&server, project_id, "Design", Some("2024-01-02T09:00:00")).await;
        create_time_entry(&server, task, user_id, "5").await;

        let response = server
            .get(&format!("/api/v1/projects/{}/budget/daily-series", project_id))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        let points = body.data["points"].as_array().unwrap();

        assert_eq!(points.len(), 2);

        assert_eq!(points[0]["date"], "2024-01-01");
        assert_eq!(decimal(&points[0]["in"]), Decimal::new(100, 0));
        assert_eq!(decimal(&points[0]["out"]), Decimal::ZERO);
        assert_eq!(decimal(&points[0]["left"]), Decimal::new(100, 0));

        assert_eq!(points[1]["date"], "2024-01-02");
        assert_eq!(decimal(&points[1]["in"]), Decimal::ZERO);
        assert_eq!(decimal(&points[1]["out"]), Decimal::new(-100, 0));
        assert_eq!(decimal(&points[1]["left"]), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_daily_series_of_idle_project_is_empty() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let project_id = create_project(&server, "Relaunch").await;

        let response = server
            .get(&format!("/api/v1/projects/{}/budget/daily-series", project_id))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert!(body.data["points"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_budget_read_paths_require_existing_project() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/projects/999/budget/daily-series").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let response = server.get("/api/v1/projects/999/budget/breakdown").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}
