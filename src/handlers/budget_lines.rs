use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{NaiveDate, Utc};
use model::entities::{budget_line, project};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::schemas::{ApiResponse, AppState, ErrorResponse, ValidationErrorResponse};

/// Request body for adding a budget line to a project.
///
/// `amount` is required; `date` accepts `DD/MM/YYYY` or `YYYY-MM-DD` and
/// defaults to the current day when omitted.
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateBudgetLineRequest {
    /// Signed amount; positive values credit the budget
    #[validate(required(message = "Field required"))]
    pub amount: Option<Decimal>,
    pub comment: Option<String>,
    /// Day the amount applies to, `DD/MM/YYYY` or `YYYY-MM-DD`
    pub date: Option<String>,
}

/// Budget line response model
#[derive(Debug, Serialize, ToSchema)]
pub struct BudgetLineResponse {
    pub id: i32,
    pub project_id: i32,
    pub amount: Decimal,
    pub comment: String,
    pub date: NaiveDate,
}

impl From<budget_line::Model> for BudgetLineResponse {
    fn from(model: budget_line::Model) -> Self {
        Self {
            id: model.id,
            project_id: model.project_id,
            amount: model.amount,
            comment: model.comment,
            date: model.date,
        }
    }
}

/// Response for the budget total endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct BudgetTotalResponse {
    pub project_id: i32,
    /// Sum of all budget line amounts; 0 when the project has none
    pub total: Decimal,
}

#[derive(FromQueryResult)]
struct BudgetTotalRow {
    total: Option<Decimal>,
}

/// Normalizes the textual date of a budget line. `DD/MM/YYYY` is accepted
/// for form input and converted to the internal ISO form; a missing or
/// empty value means "today".
fn parse_line_date(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate, ()> {
    match raw {
        None => Ok(today),
        Some(s) if s.trim().is_empty() => Ok(today),
        Some(s) => NaiveDate::parse_from_str(s, "%d/%m/%Y")
            .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
            .map_err(|_| ()),
    }
}

fn validation_failure(errors: ValidationErrors) -> Response {
    let mut fields: HashMap<String, Vec<String>> = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string())
            })
            .collect();
        fields.insert(field.to_string(), messages);
    }

    let body = ValidationErrorResponse {
        errors: fields,
        success: false,
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn single_field_failure(field: &str, message: &str) -> Response {
    let mut fields = HashMap::new();
    fields.insert(field.to_string(), vec![message.to_string()]);

    let body = ValidationErrorResponse {
        errors: fields,
        success: false,
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn error_failure(status: StatusCode, error: String, code: &str) -> Response {
    let body = ErrorResponse {
        error,
        code: code.to_string(),
        success: false,
    };
    (status, Json(body)).into_response()
}

/// Add a budget line to a project
#[utoipa::path(
    post,
    path = "/api/v1/projects/{project_id}/budget-lines",
    tag = "budget-lines",
    request_body = CreateBudgetLineRequest,
    responses(
        (status = 201, description = "Budget line created successfully", body = ApiResponse<BudgetLineResponse>),
        (status = 400, description = "Validation failed; nothing persisted", body = ValidationErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_budget_line(
    Path(project_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateBudgetLineRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BudgetLineResponse>>), Response> {
    debug!("Creating budget line for project_id: {}", project_id);

    if let Err(validation_errors) = request.validate() {
        warn!("Budget line creation failed validation: {:?}", validation_errors);
        return Err(validation_failure(validation_errors));
    }

    let Some(amount) = request.amount else {
        // validate() already rejects a missing amount
        return Err(single_field_failure("amount", "Field required"));
    };

    let today = Utc::now().date_naive();
    let date = match parse_line_date(request.date.as_deref(), today) {
        Ok(date) => date,
        Err(()) => {
            warn!("Unparsable budget line date: {:?}", request.date);
            return Err(single_field_failure(
                "date",
                "Expected DD/MM/YYYY or YYYY-MM-DD",
            ));
        }
    };

    // Validate that the project exists
    match project::Entity::find_by_id(project_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Attempted to create budget line for non-existent project_id: {}", project_id);
            return Err(error_failure(
                StatusCode::NOT_FOUND,
                format!("Project with id {} does not exist", project_id),
                "INVALID_PROJECT_ID",
            ));
        }
        Err(db_error) => {
            error!("Database error while validating project_id {}: {}", project_id, db_error);
            return Err(error_failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error while validating project".to_string(),
                "DATABASE_ERROR",
            ));
        }
    }

    let new_line = budget_line::ActiveModel {
        project_id: Set(project_id),
        amount: Set(amount),
        comment: Set(request.comment.clone().unwrap_or_default()),
        date: Set(date),
        ..Default::default()
    };

    match new_line.insert(&state.db).await {
        Ok(line_model) => {
            info!("Budget line created successfully with ID: {}", line_model.id);
            let response = ApiResponse {
                data: BudgetLineResponse::from(line_model),
                message: "Budget line created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create budget line: {}", db_error);
            Err(error_failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create budget line".to_string(),
                "DATABASE_ERROR",
            ))
        }
    }
}

/// Get all budget lines of a project, newest day first
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/budget-lines",
    tag = "budget-lines",
    responses(
        (status = 200, description = "Budget lines retrieved successfully", body = ApiResponse<Vec<BudgetLineResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_budget_lines(
    Path(project_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BudgetLineResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    match budget_line::Entity::find()
        .filter(budget_line::Column::ProjectId.eq(project_id))
        .order_by_desc(budget_line::Column::Date)
        .all(&state.db)
        .await
    {
        Ok(lines) => {
            debug!("Retrieved {} budget lines for project_id: {}", lines.len(), project_id);
            let response = ApiResponse {
                data: lines.into_iter().map(BudgetLineResponse::from).collect(),
                message: "Budget lines retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve budget lines for project_id {}: {}", project_id, db_error);
            let error_response = ErrorResponse {
                error: "Failed to retrieve budget lines".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            };
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}

/// Get the current budget total of a project
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/budget-lines/total",
    tag = "budget-lines",
    responses(
        (status = 200, description = "Budget total retrieved successfully", body = ApiResponse<BudgetTotalResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_budget_total(
    Path(project_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<BudgetTotalResponse>>, (StatusCode, Json<ErrorResponse>)> {
    // Sum in the database; a project without lines yields NULL, reported as 0
    match budget_line::Entity::find()
        .select_only()
        .column_as(budget_line::Column::Amount.sum(), "total")
        .filter(budget_line::Column::ProjectId.eq(project_id))
        .into_model::<BudgetTotalRow>()
        .one(&state.db)
        .await
    {
        Ok(row) => {
            let total = row.and_then(|r| r.total).unwrap_or(Decimal::ZERO);
            debug!("Budget total for project_id {}: {}", project_id, total);
            let response = ApiResponse {
                data: BudgetTotalResponse { project_id, total },
                message: "Budget total retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to compute budget total for project_id {}: {}", project_id, db_error);
            let error_response = ErrorResponse {
                error: "Failed to compute budget total".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            };
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}

/// Remove a budget line
#[utoipa::path(
    delete,
    path = "/api/v1/budget-lines/{budget_line_id}",
    tag = "budget-lines",
    responses(
        (status = 200, description = "Budget line deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Budget line not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_budget_line(
    Path(budget_line_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    debug!("Deleting budget line with ID: {}", budget_line_id);

    let existing_line = match budget_line::Entity::find_by_id(budget_line_id).one(&state.db).await {
        Ok(Some(line)) => line,
        Ok(None) => {
            warn!("Budget line with ID {} not found", budget_line_id);
            let error_response = ErrorResponse {
                error: format!("Budget line with id {} not found", budget_line_id),
                code: "NOT_FOUND".to_string(),
                success: false,
            };
            return Err((StatusCode::NOT_FOUND, Json(error_response)));
        }
        Err(db_error) => {
            error!("Failed to retrieve budget line with ID {}: {}", budget_line_id, db_error);
            let error_response = ErrorResponse {
                error: "Failed to retrieve budget line".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            };
            return Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)));
        }
    };

    match existing_line.delete(&state.db).await {
        Ok(_) => {
            info!("Budget line with ID {} deleted successfully", budget_line_id);
            let response = ApiResponse {
                data: format!("Budget line with id {} deleted successfully", budget_line_id),
                message: "Budget line deleted successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to delete budget line with ID {}: {}", budget_line_id, db_error);
            let error_response = ErrorResponse {
                error: "Failed to delete budget line".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            };
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}
