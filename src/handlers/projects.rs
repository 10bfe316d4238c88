use axum::{extract::State, http::StatusCode, response::Json};
use model::entities::project;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};
use utoipa::ToSchema;

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for creating a new project
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateProjectRequest {
    pub name: String,
}

/// Project response model
#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    pub id: i32,
    pub name: String,
}

impl From<project::Model> for ProjectResponse {
    fn from(model: project::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// Create a new project
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    tag = "projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created successfully", body = ApiResponse<ProjectResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_project(
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProjectResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!("Creating project: {}", request.name);

    let new_project = project::ActiveModel {
        name: Set(request.name.clone()),
        ..Default::default()
    };

    match new_project.insert(&state.db).await {
        Ok(project_model) => {
            info!("Project created successfully with ID: {}", project_model.id);
            let response = ApiResponse {
                data: ProjectResponse::from(project_model),
                message: "Project created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create project '{}': {}", request.name, db_error);
            let error_response = ErrorResponse {
                error: "Failed to create project".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            };
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}

/// Get all projects
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    tag = "projects",
    responses(
        (status = 200, description = "Projects retrieved successfully", body = ApiResponse<Vec<ProjectResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_projects(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProjectResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    match project::Entity::find().all(&state.db).await {
        Ok(projects) => {
            debug!("Retrieved {} projects", projects.len());
            let response = ApiResponse {
                data: projects.into_iter().map(ProjectResponse::from).collect(),
                message: "Projects retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve projects: {}", db_error);
            let error_response = ErrorResponse {
                error: "Failed to retrieve projects".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            };
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}
