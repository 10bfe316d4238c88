use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::{task, time_entry, user};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for booking time on a task
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateTimeEntryRequest {
    /// The user who did the work
    pub user_id: i32,
    pub title: String,
    /// Hours spent; entries with zero or negative hours are stored but
    /// never reach the budget read paths
    pub time_spent: Decimal,
}

/// Time entry response model
#[derive(Debug, Serialize, ToSchema)]
pub struct TimeEntryResponse {
    pub id: i32,
    pub task_id: i32,
    pub user_id: i32,
    pub title: String,
    pub time_spent: Decimal,
}

impl From<time_entry::Model> for TimeEntryResponse {
    fn from(model: time_entry::Model) -> Self {
        Self {
            id: model.id,
            task_id: model.task_id,
            user_id: model.user_id,
            title: model.title,
            time_spent: model.time_spent,
        }
    }
}

/// Book time on a task
#[utoipa::path(
    post,
    path = "/api/v1/tasks/{task_id}/time-entries",
    tag = "time-entries",
    request_body = CreateTimeEntryRequest,
    responses(
        (status = 201, description = "Time entry created successfully", body = ApiResponse<TimeEntryResponse>),
        (status = 404, description = "Task or user not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_time_entry(
    Path(task_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateTimeEntryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TimeEntryResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!(
        "Creating time entry for task_id: {}, user_id: {}, time_spent: {}",
        task_id, request.user_id, request.time_spent
    );

    // Validate that the task exists
    match task::Entity::find_by_id(task_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Attempted to book time on non-existent task_id: {}", task_id);
            let error_response = ErrorResponse {
                error: format!("Task with id {} does not exist", task_id),
                code: "INVALID_TASK_ID".to_string(),
                success: false,
            };
            return Err((StatusCode::NOT_FOUND, Json(error_response)));
        }
        Err(db_error) => {
            error!("Database error while validating task_id {}: {}", task_id, db_error);
            let error_response = ErrorResponse {
                error: "Internal server error while validating task".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            };
            return Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)));
        }
    }

    // Validate that the user exists
    match user::Entity::find_by_id(request.user_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Attempted to book time for non-existent user_id: {}", request.user_id);
            let error_response = ErrorResponse {
                error: format!("User with id {} does not exist", request.user_id),
                code: "INVALID_USER_ID".to_string(),
                success: false,
            };
            return Err((StatusCode::NOT_FOUND, Json(error_response)));
        }
        Err(db_error) => {
            error!("Database error while validating user_id {}: {}", request.user_id, db_error);
            let error_response = ErrorResponse {
                error: "Internal server error while validating user".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            };
            return Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)));
        }
    }

    let new_entry = time_entry::ActiveModel {
        task_id: Set(task_id),
        user_id: Set(request.user_id),
        title: Set(request.title.clone()),
        time_spent: Set(request.time_spent),
        ..Default::default()
    };

    match new_entry.insert(&state.db).await {
        Ok(entry_model) => {
            info!("Time entry created successfully with ID: {}", entry_model.id);
            let response = ApiResponse {
                data: TimeEntryResponse::from(entry_model),
                message: "Time entry created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create time entry: {}", db_error);
            let error_response = ErrorResponse {
                error: "Failed to create time entry".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            };
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}

/// Get all time entries of a task
#[utoipa::path(
    get,
    path = "/api/v1/tasks/{task_id}/time-entries",
    tag = "time-entries",
    responses(
        (status = 200, description = "Time entries retrieved successfully", body = ApiResponse<Vec<TimeEntryResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_task_time_entries(
    Path(task_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TimeEntryResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    match time_entry::Entity::find()
        .filter(time_entry::Column::TaskId.eq(task_id))
        .all(&state.db)
        .await
    {
        Ok(entries) => {
            debug!("Retrieved {} time entries for task_id: {}", entries.len(), task_id);
            let response = ApiResponse {
                data: entries.into_iter().map(TimeEntryResponse::from).collect(),
                message: "Time entries retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve time entries for task_id {}: {}", task_id, db_error);
            let error_response = ErrorResponse {
                error: "Failed to retrieve time entries".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            };
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}
