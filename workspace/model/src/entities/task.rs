use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;

use super::project;

/// A unit of work inside a project. Time entries hang off tasks; the task's
/// creation timestamp is the start date used for rate resolution.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The project this task belongs to.
    pub project_id: i32,
    pub title: String,
    /// When work on the task started. NULL means the task has no recorded
    /// start yet and is treated as starting "now" at query time.
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "project::Entity",
        from = "Column::ProjectId",
        to = "project::Column::Id",
        on_delete = "Cascade"
    )]
    Project,
    #[sea_orm(has_many = "super::time_entry::Entity")]
    TimeEntry,
}

impl Related<project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
