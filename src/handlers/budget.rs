use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use common::{BreakdownEntry, BudgetDailySeries};
use compute::breakdown::{AnnotatedEntry, BreakdownFilter};
use compute::currency::CurrencyTable;
use compute::BudgetCalculator;
use model::entities::project;
use sea_orm::EntityTrait;
use tracing::{debug, error, instrument};

use crate::helpers::converters::convert_dataframe_to_series;
use crate::schemas::{ApiResponse, AppState, BreakdownQuery, ErrorResponse, BREAKDOWN_PAGE_SIZE};

fn to_breakdown_entry(annotated: AnnotatedEntry) -> BreakdownEntry {
    let AnnotatedEntry { entry, cost } = annotated;
    BreakdownEntry {
        id: entry.id,
        task_id: entry.task_id,
        project_id: entry.project_id,
        user_id: entry.user_id,
        username: entry.username,
        name: entry.name,
        task_title: entry.task_title,
        entry_title: entry.entry_title,
        time_spent: entry.time_spent,
        start: entry.start,
        cost,
    }
}

async fn load_calculator(state: &AppState) -> Result<BudgetCalculator, (StatusCode, Json<ErrorResponse>)> {
    // One query for the conversion table; "now" is pinned here so the
    // whole computation shares a single clock reading
    match CurrencyTable::load(&state.db, &state.base_currency).await {
        Ok(converter) => Ok(BudgetCalculator::new_with_now(
            Utc::now().naive_utc(),
            Box::new(converter),
        )),
        Err(compute_error) => {
            error!("Failed to load currency table: {}", compute_error);
            let error_response = ErrorResponse {
                error: "Failed to load currency conversion table".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            };
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}

async fn ensure_project_exists(
    state: &AppState,
    project_id: i32,
) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    match project::Entity::find_by_id(project_id).one(&state.db).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => {
            let error_response = ErrorResponse {
                error: format!("Project with id {} does not exist", project_id),
                code: "INVALID_PROJECT_ID".to_string(),
                success: false,
            };
            Err((StatusCode::NOT_FOUND, Json(error_response)))
        }
        Err(db_error) => {
            error!("Database error while validating project_id {}: {}", project_id, db_error);
            let error_response = ErrorResponse {
                error: "Internal server error while validating project".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            };
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}

/// Get the cost breakdown of a project's tracked work
///
/// Time entries joined with their task and user, enriched with the cost
/// computed from the user's rate history. Sorted newest start first,
/// fixed page size of 30.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/budget/breakdown",
    tag = "budget",
    params(
        ("project_id" = i32, Path, description = "Project ID"),
        ("user_id" = Option<i32>, Query, description = "Restrict to one user"),
        ("page" = Option<u64>, Query, description = "1-based page, 30 entries per page"),
    ),
    responses(
        (status = 200, description = "Breakdown retrieved successfully", body = ApiResponse<Vec<BreakdownEntry>>),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_budget_breakdown(
    Path(project_id): Path<i32>,
    Query(query): Query<BreakdownQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BreakdownEntry>>>, (StatusCode, Json<ErrorResponse>)> {
    ensure_project_exists(&state, project_id).await?;

    let compute = load_calculator(&state).await?;
    let filter = BreakdownFilter {
        user_id: query.user_id,
    };

    let mut entries = match compute.compute_breakdown(&state.db, project_id, filter).await {
        Ok(entries) => entries,
        Err(compute_error) => {
            error!("Breakdown computation failed for project_id {}: {}", project_id, compute_error);
            let error_response = ErrorResponse {
                error: "Failed to compute budget breakdown".to_string(),
                code: "COMPUTE_ERROR".to_string(),
                success: false,
            };
            return Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)));
        }
    };

    // Newest start first; entries without a start sort as "now"
    let now = compute.now();
    entries.sort_by_key(|a| std::cmp::Reverse((a.entry.start.unwrap_or(now), a.entry.id)));

    let page = query.page.unwrap_or(1).max(1);
    let offset = (page as usize - 1) * BREAKDOWN_PAGE_SIZE;
    let page_entries: Vec<BreakdownEntry> = entries
        .into_iter()
        .skip(offset)
        .take(BREAKDOWN_PAGE_SIZE)
        .map(to_breakdown_entry)
        .collect();

    debug!(
        "Breakdown for project_id {}: page {} with {} entries",
        project_id,
        page,
        page_entries.len()
    );

    let response = ApiResponse {
        data: page_entries,
        message: "Budget breakdown retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Get the daily budget series of a project
///
/// The day-by-day reconciliation of budget credits against work costs,
/// with a running balance, for charting.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/budget/daily-series",
    tag = "budget",
    params(
        ("project_id" = i32, Path, description = "Project ID"),
    ),
    responses(
        (status = 200, description = "Daily series retrieved successfully", body = ApiResponse<BudgetDailySeries>),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_daily_budget_series(
    Path(project_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<BudgetDailySeries>>, (StatusCode, Json<ErrorResponse>)> {
    ensure_project_exists(&state, project_id).await?;

    let compute = load_calculator(&state).await?;

    let df = match compute.compute_daily_series(&state.db, project_id).await {
        Ok(df) => df,
        Err(compute_error) => {
            error!("Daily series computation failed for project_id {}: {}", project_id, compute_error);
            let error_response = ErrorResponse {
                error: "Failed to compute daily budget series".to_string(),
                code: "COMPUTE_ERROR".to_string(),
                success: false,
            };
            return Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)));
        }
    };

    let series = match convert_dataframe_to_series(df) {
        Ok(series) => series,
        Err(conversion_error) => {
            error!("Daily series conversion failed for project_id {}: {}", project_id, conversion_error);
            let error_response = ErrorResponse {
                error: "Failed to convert daily budget series".to_string(),
                code: "CONVERSION_ERROR".to_string(),
                success: false,
            };
            return Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)));
        }
    };

    debug!(
        "Daily series for project_id {}: {} points",
        project_id,
        series.len()
    );

    let response = ApiResponse {
        data: series,
        message: "Daily budget series retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}
