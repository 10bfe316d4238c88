use chrono::{Duration, NaiveDate};
use common::{BudgetDailySeries, BudgetSeriesPoint};
use polars::prelude::DataFrame;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Helper function to convert the compute DataFrame to a BudgetDailySeries
///
/// Expected DataFrame columns:
/// - "date": Date values
/// - "in", "out", "left": String values (parsed to Decimal)
pub fn convert_dataframe_to_series(df: DataFrame) -> Result<BudgetDailySeries, String> {
    let date_col = df
        .column("date")
        .map_err(|e| format!("Missing date column: {}", e))?;
    let in_col = df
        .column("in")
        .map_err(|e| format!("Missing in column: {}", e))?;
    let out_col = df
        .column("out")
        .map_err(|e| format!("Missing out column: {}", e))?;
    let left_col = df
        .column("left")
        .map_err(|e| format!("Missing left column: {}", e))?;

    let mut points = Vec::with_capacity(df.height());

    for i in 0..df.height() {
        // Polars Date values count days since the Unix epoch
        let days = date_col
            .get(i)
            .map_err(|e| format!("Error getting date at row {}: {}", i, e))?
            .try_extract::<i32>()
            .map_err(|e| format!("Error extracting date at row {}: {}", i, e))?;
        let date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap() + Duration::days(days as i64);

        let money_in = decimal_at(in_col, i, "in")?;
        let money_out = decimal_at(out_col, i, "out")?;
        let left = decimal_at(left_col, i, "left")?;

        points.push(BudgetSeriesPoint::new(date, money_in, money_out, left));
    }

    Ok(BudgetDailySeries::new(points))
}

fn decimal_at(column: &polars::prelude::Column, i: usize, name: &str) -> Result<Decimal, String> {
    let value = match column
        .get(i)
        .map_err(|e| format!("Error getting {} at row {}: {}", name, i, e))?
    {
        polars::prelude::AnyValue::String(s) => s.to_string(),
        polars::prelude::AnyValue::StringOwned(s) => s.to_string(),
        other => format!("{}", other),
    };

    Decimal::from_str(&value)
        .map_err(|e| format!("Error parsing {} '{}' at row {}: {}", name, value, i, e))
}
