use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDateTime;
use compute::currency::is_known_currency;
use model::entities::{hourly_rate, project, user};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for creating a new hourly rate record
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateHourlyRateRequest {
    pub user_id: i32,
    /// ISO 4217 currency code the rate is quoted in
    pub currency: String,
    pub rate: Decimal,
    /// The record applies to work starting at or after this moment,
    /// until a later record supersedes it
    pub effective_from: NaiveDateTime,
}

/// Hourly rate response model
#[derive(Debug, Serialize, ToSchema)]
pub struct HourlyRateResponse {
    pub id: i32,
    pub user_id: i32,
    pub project_id: i32,
    pub currency: String,
    pub rate: Decimal,
    pub effective_from: NaiveDateTime,
}

impl From<hourly_rate::Model> for HourlyRateResponse {
    fn from(model: hourly_rate::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            project_id: model.project_id,
            currency: model.currency,
            rate: model.rate,
            effective_from: model.effective_from,
        }
    }
}

/// Create a new hourly rate record on a project
#[utoipa::path(
    post,
    path = "/api/v1/projects/{project_id}/hourly-rates",
    tag = "hourly-rates",
    request_body = CreateHourlyRateRequest,
    responses(
        (status = 201, description = "Hourly rate created successfully", body = ApiResponse<HourlyRateResponse>),
        (status = 400, description = "Unknown currency code", body = ErrorResponse),
        (status = 404, description = "Project or user not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_hourly_rate(
    Path(project_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateHourlyRateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<HourlyRateResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!(
        "Creating hourly rate for project_id: {}, user_id: {}, rate: {} {}",
        project_id, request.user_id, request.rate, request.currency
    );

    if !is_known_currency(&request.currency) {
        warn!("Rejected unknown currency code: {}", request.currency);
        let error_response = ErrorResponse {
            error: format!("'{}' is not a known ISO 4217 currency code", request.currency),
            code: "UNKNOWN_CURRENCY".to_string(),
            success: false,
        };
        return Err((StatusCode::BAD_REQUEST, Json(error_response)));
    }

    // Validate that the project exists
    match project::Entity::find_by_id(project_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Attempted to create rate for non-existent project_id: {}", project_id);
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

    // Validate that the user exists
    match user::Entity::find_by_id(request.user_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Attempted to create rate for non-existent user_id: {}", request.user_id);
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

    let new_rate = hourly_rate::ActiveModel {
        user_id: Set(request.user_id),
        project_id: Set(project_id),
        currency: Set(request.currency.clone()),
        rate: Set(request.rate),
        effective_from: Set(request.effective_from),
        ..Default::default()
    };

    match new_rate.insert(&state.db).await {
        Ok(rate_model) => {
            info!("Hourly rate created successfully with ID: {}", rate_model.id);
            let response = ApiResponse {
                data: HourlyRateResponse::from(rate_model),
                message: "Hourly rate created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create hourly rate: {}", db_error);
            let error_response = ErrorResponse {
                error: "Failed to create hourly rate".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            };
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}

/// Get the full rate history of a project
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/hourly-rates",
    tag = "hourly-rates",
    responses(
        (status = 200, description = "Hourly rates retrieved successfully", body = ApiResponse<Vec<HourlyRateResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_project_hourly_rates(
    Path(project_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<HourlyRateResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    match hourly_rate::Entity::find()
        .filter(hourly_rate::Column::ProjectId.eq(project_id))
        .order_by_asc(hourly_rate::Column::EffectiveFrom)
        .all(&state.db)
        .await
    {
        Ok(rates) => {
            debug!("Retrieved {} hourly rates for project_id: {}", rates.len(), project_id);
            let response = ApiResponse {
                data: rates.into_iter().map(HourlyRateResponse::from).collect(),
                message: "Hourly rates retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve hourly rates for project_id {}: {}", project_id, db_error);
            let error_response = ErrorResponse {
                error: "Failed to retrieve hourly rates".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            };
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}
