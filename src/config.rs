use anyhow::Result;
use sea_orm::Database;

use crate::schemas::AppState;

/// Initialize application state against an explicit database URL
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    // Connect to database
    tracing::info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    Ok(AppState {
        db,
        base_currency: base_currency(),
    })
}

/// The currency all costs are reported in. Hourly rates quoted in other
/// currencies are converted via the currency_rates table.
pub fn base_currency() -> String {
    std::env::var("BASE_CURRENCY").unwrap_or_else(|_| "USD".to_string())
}
