use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// Conversion rate from a currency to the application's base currency.
/// Hourly rates quoted in a foreign currency are multiplied by this rate
/// before costs are computed. Currencies without a row convert 1:1.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "currency_rates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ISO 4217 currency code.
    #[sea_orm(unique)]
    pub currency: String,
    /// Multiplier to the base currency.
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub rate: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
