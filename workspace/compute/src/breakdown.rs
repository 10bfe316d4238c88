use chrono::NaiveDateTime;
use model::entities::{hourly_rate, task, time_entry, user};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};
use tracing::{debug, instrument, trace};

use crate::currency::PriceConverter;
use crate::error::Result;
use crate::rate::resolve_hourly_price;

/// Allow-listed breakdown filters. Request parameters that are not named
/// here never reach the query; absent fields leave it unrestricted.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreakdownFilter {
    pub user_id: Option<i32>,
}

/// A raw time entry row joined with the task and user columns a breakdown
/// report needs. One query produces these; cost annotation is a separate
/// pure pass over the result.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct TimeEntryRow {
    pub id: i32,
    pub task_id: i32,
    pub project_id: i32,
    pub user_id: i32,
    pub username: String,
    pub name: Option<String>,
    pub task_title: String,
    pub entry_title: String,
    pub time_spent: Decimal,
    /// Task start; None means no recorded start yet.
    pub start: Option<NaiveDateTime>,
}

/// A time entry row with its computed cost attached.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedEntry {
    pub entry: TimeEntryRow,
    pub cost: Decimal,
}

/// Gets all positive time entries for the project, joined with their task
/// and user.
#[instrument(skip(db), fields(project_id = project_id, filter = ?filter))]
pub async fn get_time_entries_for_project(
    db: &DatabaseConnection,
    project_id: i32,
    filter: BreakdownFilter,
) -> Result<Vec<TimeEntryRow>> {
    trace!("Getting time entries for project_id={}", project_id);

    let mut query = time_entry::Entity::find()
        .join(JoinType::InnerJoin, time_entry::Relation::Task.def())
        .join(JoinType::InnerJoin, time_entry::Relation::User.def())
        .filter(task::Column::ProjectId.eq(project_id))
        .filter(time_entry::Column::TimeSpent.gt(Decimal::ZERO));

    if let Some(user_id) = filter.user_id {
        query = query.filter(time_entry::Column::UserId.eq(user_id));
    }

    let rows = query
        .select_only()
        .column_as(time_entry::Column::Id, "id")
        .column_as(time_entry::Column::TaskId, "task_id")
        .column_as(task::Column::ProjectId, "project_id")
        .column_as(time_entry::Column::UserId, "user_id")
        .column_as(user::Column::Username, "username")
        .column_as(user::Column::Name, "name")
        .column_as(task::Column::Title, "task_title")
        .column_as(time_entry::Column::Title, "entry_title")
        .column_as(time_entry::Column::TimeSpent, "time_spent")
        .column_as(task::Column::CreatedAt, "start")
        .into_model::<TimeEntryRow>()
        .all(db)
        .await?;

    debug!("Found {} time entries for project_id={}", rows.len(), project_id);

    Ok(rows)
}

/// Gets the project's full rate history in one query, ordered by
/// `effective_from` ascending. Consulted once per breakdown computation,
/// never per row.
#[instrument(skip(db), fields(project_id = project_id))]
pub async fn get_rates_for_project(
    db: &DatabaseConnection,
    project_id: i32,
) -> Result<Vec<hourly_rate::Model>> {
    let rates = hourly_rate::Entity::find()
        .filter(hourly_rate::Column::ProjectId.eq(project_id))
        .order_by_asc(hourly_rate::Column::EffectiveFrom)
        .all(db)
        .await?;

    debug!("Found {} rate records for project_id={}", rates.len(), project_id);

    Ok(rates)
}

/// Attaches a cost to every row: resolved hourly price × time spent.
///
/// Pure transform; entries with no recorded start resolve their rate as of
/// `now`. Input rows are consumed, never mutated in place, and the rate
/// slice is only read.
pub fn annotate_costs(
    rows: Vec<TimeEntryRow>,
    rates: &[hourly_rate::Model],
    converter: &dyn PriceConverter,
    now: NaiveDateTime,
) -> Vec<AnnotatedEntry> {
    rows.into_iter()
        .map(|row| {
            let at = row.start.unwrap_or(now);
            let hourly_price = resolve_hourly_price(row.user_id, at, rates, converter);
            let cost = hourly_price * row.time_spent;

            AnnotatedEntry { entry: row, cost }
        })
        .collect()
}
