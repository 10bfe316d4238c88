use std::collections::HashMap;

use model::entities::currency_rate;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::debug;

use crate::error::Result;

/// Converts an hourly rate quoted in some currency into the base currency.
///
/// Injected into the budget calculator so cost computation never reaches
/// for ambient state; tests swap in [`IdentityConverter`].
pub trait PriceConverter {
    fn price_in_base(&self, currency: &str, rate: Decimal) -> Decimal;
}

/// Treats every currency as the base currency. Used as the default
/// converter and in tests where conversion is not under scrutiny.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityConverter;

impl PriceConverter for IdentityConverter {
    fn price_in_base(&self, _currency: &str, rate: Decimal) -> Decimal {
        rate
    }
}

/// Conversion table backed by the `currency_rates` table: one multiplier
/// per foreign currency. The base currency and currencies without a row
/// convert 1:1 (a missing rate is not an error).
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    base: String,
    multipliers: HashMap<String, Decimal>,
}

impl CurrencyTable {
    pub fn new(base: impl Into<String>, multipliers: HashMap<String, Decimal>) -> Self {
        Self {
            base: base.into(),
            multipliers,
        }
    }

    /// Loads the whole conversion table in a single query.
    pub async fn load(db: &DatabaseConnection, base: &str) -> Result<Self> {
        let rows = currency_rate::Entity::find().all(db).await?;
        debug!("Loaded {} currency rates (base currency {})", rows.len(), base);

        let multipliers = rows.into_iter().map(|row| (row.currency, row.rate)).collect();
        Ok(Self::new(base, multipliers))
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

impl PriceConverter for CurrencyTable {
    fn price_in_base(&self, currency: &str, rate: Decimal) -> Decimal {
        if currency == self.base {
            return rate;
        }

        match self.multipliers.get(currency) {
            Some(multiplier) => rate * *multiplier,
            None => rate,
        }
    }
}

/// Whether the code is a known ISO 4217 currency.
pub fn is_known_currency(code: &str) -> bool {
    rusty_money::iso::find(code).is_some()
}
