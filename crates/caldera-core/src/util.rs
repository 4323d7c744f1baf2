use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::AppError;

/// Inclusive window covering one calendar month.
///
/// Runs from midnight on the 1st to one second before midnight on the 1st of
/// the following month. Example: `(2024, 2)` → `2024-02-01T00:00:00` ..
/// `2024-02-29T23:59:59`.
pub fn month_window(year: i32, month: u32) -> Result<(NaiveDateTime, NaiveDateTime), AppError> {
    let start = first_of_month(year, month)
        .ok_or_else(|| AppError::InvalidInput(format!("Invalid month: {year}-{month}")))?;

    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let next = first_of_month(next_year, next_month)
        .ok_or_else(|| AppError::InvalidInput(format!("Invalid month: {year}-{month}")))?;

    Ok((start, next - Duration::seconds(1)))
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Renders a temperature the way it was sent, always with a decimal point
/// (`21` → `"21.0"`, `21.5` → `"21.5"`).
pub fn format_temperature(value: f64) -> String {
    format!("{value:?}")
}
