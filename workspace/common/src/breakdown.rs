use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A time entry enriched with its computed cost, as returned by the
/// breakdown read path. Joins in the task and user columns a report needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BreakdownEntry {
    pub id: i32,
    pub task_id: i32,
    pub project_id: i32,
    pub user_id: i32,
    pub username: String,
    /// The user's display name, when set.
    pub name: Option<String>,
    pub task_title: String,
    pub entry_title: String,
    /// Hours spent.
    pub time_spent: Decimal,
    /// Task start. None means the task has no recorded start; cost was
    /// resolved as of the computation time.
    pub start: Option<NaiveDateTime>,
    /// resolved hourly price in base currency × time spent.
    pub cost: Decimal,
}
