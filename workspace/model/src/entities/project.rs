use sea_orm::entity::prelude::*;

/// A project that owns tasks, hourly rates and budget lines.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::task::Entity")]
    Task,
    #[sea_orm(has_many = "super::budget_line::Entity")]
    BudgetLine,
    #[sea_orm(has_many = "super::hourly_rate::Entity")]
    HourlyRate,
}

impl ActiveModelBehavior for ActiveModel {}
