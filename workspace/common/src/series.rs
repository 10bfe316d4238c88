use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One day of budget activity: money added, money spent and the running
/// balance after that day. Days without activity are not emitted.
///
/// The JSON keys are `date`, `in`, `out` and `left`; `out` carries the
/// day's cost as a negated magnitude so charting clients can stack it
/// below the axis directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BudgetSeriesPoint {
    /// Calendar day.
    pub date: NaiveDate,
    /// Sum of budget credits booked on this day (non-negative).
    #[serde(rename = "in")]
    pub money_in: Decimal,
    /// Sum of work costs booked on this day, negated (non-positive).
    #[serde(rename = "out")]
    pub money_out: Decimal,
    /// Running balance after this day.
    pub left: Decimal,
}

impl BudgetSeriesPoint {
    pub fn new(date: NaiveDate, money_in: Decimal, money_out: Decimal, left: Decimal) -> Self {
        Self {
            date,
            money_in,
            money_out,
            left,
        }
    }
}

/// The day-by-day reconciliation of a project's credits against its work
/// costs, ordered by date ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BudgetDailySeries {
    pub points: Vec<BudgetSeriesPoint>,
}

impl BudgetDailySeries {
    pub fn new(points: Vec<BudgetSeriesPoint>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// First and last emitted day, or None for an empty series.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }

    /// The balance left after the last active day.
    pub fn final_balance(&self) -> Option<Decimal> {
        self.points.last().map(|p| p.left)
    }
}
