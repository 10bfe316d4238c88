use crate::handlers::{
    budget::{get_budget_breakdown, get_daily_budget_series},
    budget_lines::{create_budget_line, delete_budget_line, get_budget_lines, get_budget_total},
    currency_rates::{create_currency_rate, get_currency_rates},
    health::health_check,
    hourly_rates::{create_hourly_rate, get_project_hourly_rates},
    projects::{create_project, get_projects},
    tasks::{create_task, get_project_tasks},
    time_entries::{create_time_entry, get_task_time_entries},
    users::{create_user, get_users},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // User routes
        .route("/api/v1/users", post(create_user))
        .route("/api/v1/users", get(get_users))
        // Project routes
        .route("/api/v1/projects", post(create_project))
        .route("/api/v1/projects", get(get_projects))
        // Task routes
        .route("/api/v1/projects/:project_id/tasks", post(create_task))
        .route("/api/v1/projects/:project_id/tasks", get(get_project_tasks))
        // Time entry routes
        .route("/api/v1/tasks/:task_id/time-entries", post(create_time_entry))
        .route("/api/v1/tasks/:task_id/time-entries", get(get_task_time_entries))
        // Hourly rate routes
        .route("/api/v1/projects/:project_id/hourly-rates", post(create_hourly_rate))
        .route("/api/v1/projects/:project_id/hourly-rates", get(get_project_hourly_rates))
        // Currency rate routes
        .route("/api/v1/currency-rates", post(create_currency_rate))
        .route("/api/v1/currency-rates", get(get_currency_rates))
        // Budget line routes
        .route("/api/v1/projects/:project_id/budget-lines", post(create_budget_line))
        .route("/api/v1/projects/:project_id/budget-lines", get(get_budget_lines))
        .route(
            "/api/v1/projects/:project_id/budget-lines/total",
            get(get_budget_total),
        )
        .route("/api/v1/budget-lines/:budget_line_id", delete(delete_budget_line))
        // Budget read paths
        .route(
            "/api/v1/projects/:project_id/budget/breakdown",
            get(get_budget_breakdown),
        )
        .route(
            "/api/v1/projects/:project_id/budget/daily-series",
            get(get_daily_budget_series),
        )
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
