use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use common::BudgetSeriesPoint;
use model::entities::budget_line;
use polars::prelude::*;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, instrument};

use crate::breakdown::AnnotatedEntry;
use crate::error::Result;

/// Gets the project's positive budget lines ordered by date ascending.
/// Negative corrections exist in the table but never feed the series.
#[instrument(skip(db), fields(project_id = project_id))]
pub async fn get_credits_for_project(
    db: &DatabaseConnection,
    project_id: i32,
) -> Result<Vec<budget_line::Model>> {
    let credits = budget_line::Entity::find()
        .filter(budget_line::Column::ProjectId.eq(project_id))
        .filter(budget_line::Column::Amount.gt(Decimal::ZERO))
        .order_by_asc(budget_line::Column::Date)
        .all(db)
        .await?;

    debug!("Found {} budget credits for project_id={}", credits.len(), project_id);

    Ok(credits)
}

/// Buckets credits and costs into calendar days and walks the full span
/// day by day, accumulating the running balance.
///
/// The span runs from the earliest observed activity (or `today` when
/// there is none) through tomorrow inclusive. Only days with activity are
/// emitted; quiet days carry the balance forward silently. Costs of
/// entries without a recorded start bucket on `today`.
pub fn build_daily_series(
    credits: &[budget_line::Model],
    entries: &[AnnotatedEntry],
    today: NaiveDate,
) -> Vec<BudgetSeriesPoint> {
    let mut in_by_day: HashMap<NaiveDate, Decimal> = HashMap::new();
    for credit in credits.iter().filter(|c| c.amount > Decimal::ZERO) {
        *in_by_day.entry(credit.date).or_default() += credit.amount;
    }

    let mut out_by_day: HashMap<NaiveDate, Decimal> = HashMap::new();
    for annotated in entries {
        let day = annotated.entry.start.map(|s| s.date()).unwrap_or(today);
        *out_by_day.entry(day).or_default() += annotated.cost;
    }

    let mut start = today;
    for day in in_by_day.keys().chain(out_by_day.keys()) {
        if *day < start {
            start = *day;
        }
    }
    let end = today + Duration::days(1);

    let mut points = Vec::new();
    let mut left = Decimal::ZERO;
    let mut date = start;

    while date <= end {
        let day_in = in_by_day.get(&date).copied().unwrap_or(Decimal::ZERO);
        let day_out = out_by_day.get(&date).copied().unwrap_or(Decimal::ZERO);

        if day_in > Decimal::ZERO || day_out > Decimal::ZERO {
            left += day_in;
            left -= day_out;

            // Report the day's cost as a negated magnitude; keep plain
            // zero for credit-only days instead of a signed -0
            let reported_out = if day_out.is_zero() {
                Decimal::ZERO
            } else {
                -day_out
            };

            points.push(BudgetSeriesPoint::new(date, day_in, reported_out, left));
        }

        date = date.succ_opt().unwrap();
    }

    points
}

/// Converts the emitted points into the DataFrame shape the handler layer
/// consumes: a `date` column plus `in`, `out` and `left` money columns
/// carried as strings to keep decimal precision.
pub fn series_to_dataframe(points: &[BudgetSeriesPoint]) -> Result<DataFrame> {
    let mut dates = Vec::with_capacity(points.len());
    let mut ins = Vec::with_capacity(points.len());
    let mut outs = Vec::with_capacity(points.len());
    let mut lefts = Vec::with_capacity(points.len());

    for point in points {
        dates.push(point.date);
        ins.push(point.money_in.to_string());
        outs.push(point.money_out.to_string());
        lefts.push(point.left.to_string());
    }

    let df = DataFrame::new(vec![
        Series::new("date".into(), dates).into(),
        Series::new("in".into(), ins).into(),
        Series::new("out".into(), outs).into(),
        Series::new("left".into(), lefts).into(),
    ])?;

    Ok(df)
}
