use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::{task, user};

/// A recorded quantity of hours a user spent on a task.
/// Rows with `time_spent <= 0` are ignored by the budget read paths.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "time_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The task the time was booked on.
    pub task_id: i32,
    /// The user who did the work.
    pub user_id: i32,
    pub title: String,
    /// Hours spent, decimal.
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub time_spent: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "task::Entity",
        from = "Column::TaskId",
        to = "task::Column::Id",
        on_delete = "Cascade"
    )]
    Task,
    #[sea_orm(
        belongs_to = "user::Entity",
        from = "Column::UserId",
        to = "user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Task.def()
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
