//! Common transport-layer types shared between the backend and any client.
//! These structs mirror the backend handlers' response payloads so clients
//! can deserialize API responses without duplicating shapes.

mod breakdown;
mod series;

pub use breakdown::BreakdownEntry;
pub use series::{BudgetDailySeries, BudgetSeriesPoint};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
/// Note: The backend has its own definition in budgetrust/src/schemas.rs with
/// the same field names. We mirror it here for clients to reuse.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}
