use axum::{extract::State, http::StatusCode, response::Json};
use compute::currency::is_known_currency;
use model::entities::currency_rate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for creating a currency conversion rate
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateCurrencyRateRequest {
    /// ISO 4217 currency code
    pub currency: String,
    /// Multiplier to the base currency
    pub rate: Decimal,
}

/// Currency rate response model
#[derive(Debug, Serialize, ToSchema)]
pub struct CurrencyRateResponse {
    pub id: i32,
    pub currency: String,
    pub rate: Decimal,
}

impl From<currency_rate::Model> for CurrencyRateResponse {
    fn from(model: currency_rate::Model) -> Self {
        Self {
            id: model.id,
            currency: model.currency,
            rate: model.rate,
        }
    }
}

/// Create a currency conversion rate
#[utoipa::path(
    post,
    path = "/api/v1/currency-rates",
    tag = "currency-rates",
    request_body = CreateCurrencyRateRequest,
    responses(
        (status = 201, description = "Currency rate created successfully", body = ApiResponse<CurrencyRateResponse>),
        (status = 400, description = "Unknown currency code", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_currency_rate(
    State(state): State<AppState>,
    Json(request): Json<CreateCurrencyRateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CurrencyRateResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!("Creating currency rate: {} = {}", request.currency, request.rate);

    if !is_known_currency(&request.currency) {
        warn!("Rejected unknown currency code: {}", request.currency);
        let error_response = ErrorResponse {
            error: format!("'{}' is not a known ISO 4217 currency code", request.currency),
            code: "UNKNOWN_CURRENCY".to_string(),
            success: false,
        };
        return Err((StatusCode::BAD_REQUEST, Json(error_response)));
    }

    let new_rate = currency_rate::ActiveModel {
        currency: Set(request.currency.clone()),
        rate: Set(request.rate),
        ..Default::default()
    };

    match new_rate.insert(&state.db).await {
        Ok(rate_model) => {
            info!("Currency rate created successfully with ID: {}", rate_model.id);
            let response = ApiResponse {
                data: CurrencyRateResponse::from(rate_model),
                message: "Currency rate created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create currency rate '{}': {}", request.currency, db_error);
            let error_response = ErrorResponse {
                error: "Failed to create currency rate".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            };
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}

/// Get all currency conversion rates
#[utoipa::path(
    get,
    path = "/api/v1/currency-rates",
    tag = "currency-rates",
    responses(
        (status = 200, description = "Currency rates retrieved successfully", body = ApiResponse<Vec<CurrencyRateResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_currency_rates(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CurrencyRateResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    match currency_rate::Entity::find().all(&state.db).await {
        Ok(rates) => {
            debug!("Retrieved {} currency rates", rates.len());
            let response = ApiResponse {
                data: rates.into_iter().map(CurrencyRateResponse::from).collect(),
                message: "Currency rates retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve currency rates: {}", db_error);
            let error_response = ErrorResponse {
                error: "Failed to retrieve currency rates".to_string(),
                code: "DATABASE_ERROR".to_string(),
                success: false,
            };
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}
