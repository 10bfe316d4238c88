use axum::{extract::State, http::StatusCode, response::Json};
use model::entities::user;
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};
use utoipa::ToSchema;

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for creating a new user
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    /// Username (must be unique)
    pub username: String,
    /// Optional display name
    pub name: Option<String>,
}

/// User response model
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub name: Option<String>,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            name: model.name,
        }
    }
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = ApiResponse<UserResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!("Creating user with username: {}", request.username);

    let new_user = user::ActiveModel {
        username: Set(request.username.clone()),
        name: Set(request.name.clone()),
        ..Default::default()
    };

    match new_user.insert(&state.db).await {
        Ok(user_model) => {
            info!("User created successfully with ID: {}, username: {}",
                  user_model.id, user_model.username);
            let response = ApiResponse {
                data: UserResponse::from(user_model),
                message: "User created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create user '{}': {}", request.username, db_error);

            // Handle unique constraint violations distinctly
            let error_response = match db_error {
                DbErr::Exec(ref exec_err)
                    if exec_err.to_string().to_lowercase().contains("unique")
                        || exec_err.to_string().to_lowercase().contains("constraint") =>
                {
                    ErrorResponse {
                        error: format!("Username '{}' already exists", request.username),
                        code: "USERNAME_ALREADY_EXISTS".to_string(),
                        success: false,
                    }
                }
                _ => ErrorResponse {
                    error: "Failed to create user".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                },
            };
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}

/// Get all users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = ApiResponse<Vec<UserResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    match user::Entity::find().all(&state.db).await {
        Ok(users) => {
            debug!("Retrieved {} users", users.len());
            let response = ApiResponse {
                data: users.into_iter().map(UserResponse::from).collect(),
                message: "Users retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve users: {}", db_error);
            let error_response = ErrorResponse {
                error: "Failed to retrieve users".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            };
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}
