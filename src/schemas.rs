use std::collections::HashMap;

use common::{BreakdownEntry, BudgetDailySeries, BudgetSeriesPoint};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// ISO 4217 code of the currency costs are reported in
    pub base_currency: String,
}

/// Fixed page size of the breakdown read path
pub const BREAKDOWN_PAGE_SIZE: usize = 30;

/// Query parameters for the breakdown endpoint.
/// Unrecognized query keys are ignored, not rejected.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BreakdownQuery {
    /// Restrict to entries of a single user
    pub user_id: Option<i32>,
    /// 1-based page number; page size is fixed at 30
    pub page: Option<u64>,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Validation failure response: one entry per offending field with the
/// messages explaining what is wrong. Nothing is persisted when this is
/// returned.
#[derive(Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    /// Field name → validation messages
    pub errors: HashMap<String, Vec<String>>,
    /// Success status (always false)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::create_user,
        crate::handlers::users::get_users,
        crate::handlers::projects::create_project,
        crate::handlers::projects::get_projects,
        crate::handlers::tasks::create_task,
        crate::handlers::tasks::get_project_tasks,
        crate::handlers::time_entries::create_time_entry,
        crate::handlers::time_entries::get_task_time_entries,
        crate::handlers::hourly_rates::create_hourly_rate,
        crate::handlers::hourly_rates::get_project_hourly_rates,
        crate::handlers::currency_rates::create_currency_rate,
        crate::handlers::currency_rates::get_currency_rates,
        crate::handlers::budget_lines::create_budget_line,
        crate::handlers::budget_lines::get_budget_lines,
        crate::handlers::budget_lines::get_budget_total,
        crate::handlers::budget_lines::delete_budget_line,
        crate::handlers::budget::get_budget_breakdown,
        crate::handlers::budget::get_daily_budget_series,
    ),
    components(
        schemas(
            ApiResponse<BudgetDailySeries>,
            ApiResponse<Vec<BreakdownEntry>>,
            ErrorResponse,
            ValidationErrorResponse,
            HealthResponse,
            BreakdownQuery,
            BudgetDailySeries,
            BudgetSeriesPoint,
            BreakdownEntry,
            crate::handlers::users::CreateUserRequest,
            crate::handlers::users::UserResponse,
            crate::handlers::projects::CreateProjectRequest,
            crate::handlers::projects::ProjectResponse,
            crate::handlers::tasks::CreateTaskRequest,
            crate::handlers::tasks::TaskResponse,
            crate::handlers::time_entries::CreateTimeEntryRequest,
            crate::handlers::time_entries::TimeEntryResponse,
            crate::handlers::hourly_rates::CreateHourlyRateRequest,
            crate::handlers::hourly_rates::HourlyRateResponse,
            crate::handlers::currency_rates::CreateCurrencyRateRequest,
            crate::handlers::currency_rates::CurrencyRateResponse,
            crate::handlers::budget_lines::CreateBudgetLineRequest,
            crate::handlers::budget_lines::BudgetLineResponse,
            crate::handlers::budget_lines::BudgetTotalResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User management endpoints"),
        (name = "projects", description = "Project management endpoints"),
        (name = "tasks", description = "Task management endpoints"),
        (name = "time-entries", description = "Time tracking endpoints"),
        (name = "hourly-rates", description = "Hourly rate management endpoints"),
        (name = "currency-rates", description = "Currency conversion endpoints"),
        (name = "budget-lines", description = "Budget credit endpoints"),
        (name = "budget", description = "Budget reporting endpoints"),
    ),
    info(
        title = "BudgetRust API",
        description = "Project budget tracking API - reconciles tracked work time against budget credits",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
