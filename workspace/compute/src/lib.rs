pub mod breakdown;
pub mod currency;
pub mod error;
pub mod rate;
pub mod series;

#[cfg(test)]
mod testing;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use polars::prelude::DataFrame;
use sea_orm::DatabaseConnection;
use tracing::{debug, instrument};

use breakdown::{AnnotatedEntry, BreakdownFilter};
use currency::{IdentityConverter, PriceConverter};
use error::Result;

/// Computes a project's budget consumption: the flat cost breakdown and
/// the daily reconciled series.
///
/// The computation time and the price converter are injected at
/// construction so a computation is fully determined by its inputs; the
/// only wall-clock read happens in [`default_compute`].
pub struct BudgetCalculator {
    /// The moment "now" means throughout the computation: rate resolution
    /// for entries without a start, the day such entries bucket on, and
    /// the end of the series span.
    now: NaiveDateTime,
    converter: Box<dyn PriceConverter + Send + Sync>,
}

impl BudgetCalculator {
    pub fn new_with_now(now: NaiveDateTime, converter: Box<dyn PriceConverter + Send + Sync>) -> Self {
        Self { now, converter }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    /// Computes the cost-annotated time entry list for a project.
    ///
    /// One query fetches the joined entry rows, one more the project's
    /// rate history; annotation is a pure pass over the two. A project
    /// without entries skips the rate lookup entirely.
    #[instrument(skip(self, db), fields(project_id = project_id))]
    pub async fn compute_breakdown(
        &self,
        db: &DatabaseConnection,
        project_id: i32,
        filter: BreakdownFilter,
    ) -> Result<Vec<AnnotatedEntry>> {
        let rows = breakdown::get_time_entries_for_project(db, project_id, filter).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let rates = breakdown::get_rates_for_project(db, project_id).await?;
        let annotated = breakdown::annotate_costs(rows, &rates, self.converter.as_ref(), self.now);

        debug!("Annotated {} time entries for project_id={}", annotated.len(), project_id);

        Ok(annotated)
    }

    /// Computes the daily reconciled budget series for a project.
    ///
    /// Composes the unfiltered breakdown with the project's credits and
    /// returns a DataFrame with `date`, `in`, `out` and `left` columns.
    #[instrument(skip(self, db), fields(project_id = project_id))]
    pub async fn compute_daily_series(
        &self,
        db: &DatabaseConnection,
        project_id: i32,
    ) -> Result<DataFrame> {
        let entries = self
            .compute_breakdown(db, project_id, BreakdownFilter::default())
            .await?;
        let credits = series::get_credits_for_project(db, project_id).await?;

        let points = series::build_daily_series(&credits, &entries, self.today());
        series::series_to_dataframe(&points)
    }
}

/// Returns a default pre-configured compute instance that will be used most
/// of the time.
///
/// This function uses the provided timestamp as "now" or the current time
/// if none is provided. Prices pass through unconverted; the server wires
/// a [`currency::CurrencyTable`] in its place.
pub fn default_compute(now: Option<NaiveDateTime>) -> BudgetCalculator {
    // Create the now timestamp
    let now = now.unwrap_or_else(|| Utc::now().naive_utc());

    BudgetCalculator::new_with_now(now, Box::new(IdentityConverter))
}
