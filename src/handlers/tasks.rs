use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDateTime;
use model::entities::{project, task};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for creating a new task
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateTaskRequest {
    pub title: String,
    /// When work on the task started. Omit for tasks that have not
    /// started yet; budget computations then treat them as starting now.
    pub created_at: Option<NaiveDateTime>,
}

/// Task response model
#[derive(Debug, Serialize, ToSchema)]
pub struct TaskResponse {
    pub id: i32,
    pub project_id: i32,
    pub title: String,
    pub created_at: Option<NaiveDateTime>,
}

impl From<task::Model> for TaskResponse {
    fn from(model: task::Model) -> Self {
        Self {
            id: model.id,
            project_id: model.project_id,
            title: model.title,
            created_at: model.created_at,
        }
    }
}

/// Create a new task in a project
#[utoipa::path(
    post,
    path = "/api/v1/projects/{project_id}/tasks",
    tag = "tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created successfully", body = ApiResponse<TaskResponse>),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_task(
    Path(project_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TaskResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!("Creating task '{}' for project_id: {}", request.title, project_id);

    // Validate that the project exists
    match project::Entity::find_by_id(project_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Attempted to create task for non-existent project_id: {}", project_id);
            let error_response = ErrorResponse {
                error: format!("Project with id {} does not exist", project_id),
                code: "INVALID_PROJECT_ID".to_string(),
                success: false,
            };
            return Err((StatusCode::NOT_FOUND, Json(error_response)));
        }
        Err(db_error) => {
            error!("Database error while validating project_id {}: {}", project_id, db_error);
            let error_response = ErrorResponse {
                error: "Internal server error while validating project".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            };
            return Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)));
        }
    }

    let new_task = task::ActiveModel {
        project_id: Set(project_id),
        title: Set(request.title.clone()),
        created_at: Set(request.created_at),
        ..Default::default()
    };

    match new_task.insert(&state.db).await {
        Ok(task_model) => {
            info!("Task created successfully with ID: {}", task_model.id);
            let response = ApiResponse {
                data: TaskResponse::from(task_model),
                message: "Task created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create task: {}", db_error);
            let error_response = ErrorResponse {
                error: "Failed to create task".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            };
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}

/// Get all tasks of a project
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/tasks",
    tag = "tasks",
    responses(
        (status = 200, description = "Tasks retrieved successfully", body = ApiResponse<Vec<TaskResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_project_tasks(
    Path(project_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TaskResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    match task::Entity::find()
        .filter(task::Column::ProjectId.eq(project_id))
        .all(&state.db)
        .await
    {
        Ok(tasks) => {
            debug!("Retrieved {} tasks for project_id: {}", tasks.len(), project_id);
            let response = ApiResponse {
                data: tasks.into_iter().map(TaskResponse::from).collect(),
                message: "Tasks retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve tasks for project_id {}: {}", project_id, db_error);
            let error_response = ErrorResponse {
                error: "Failed to retrieve tasks".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            };
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}
