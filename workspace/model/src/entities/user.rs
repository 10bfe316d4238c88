use sea_orm::entity::prelude::*;

/// A person whose work time is tracked and billed.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    /// Display name shown in breakdown rows; falls back to the username.
    pub name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::time_entry::Entity")]
    TimeEntry,
    #[sea_orm(has_many = "super::hourly_rate::Entity")]
    HourlyRate,
}

impl ActiveModelBehavior for ActiveModel {}
