use chrono::{Datelike, Days, Months, NaiveDate};

/// Generates a vector of `NaiveDate`s, inclusive of the start and end dates.
/// If `start` is after `end`, the resulting vector will be empty.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use kerja_core::utils::date_utils::get_dates_in_range;
/// let start_date = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
/// let end_date = NaiveDate::from_ymd_opt(2025, 8, 17).unwrap();
///
/// let dates = get_dates_in_range(start_date, end_date);
///
/// assert_eq!(dates.len(), 3);
/// assert_eq!(dates[0], NaiveDate::from_ymd_opt(2025, 8, 15).unwrap());
/// assert_eq!(dates[2], NaiveDate::from_ymd_opt(2025, 8, 17).unwrap());
/// ```
pub fn get_dates_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// First and last day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date);
    (first, last)
}

/// The `days`-long window ending on `end`. Anything below one day counts as one.
pub fn days_ending_at(end: NaiveDate, days: u32) -> (NaiveDate, NaiveDate) {
    let span = u64::from(days.max(1) - 1);
    let start = end.checked_sub_days(Days::new(span)).unwrap_or(NaiveDate::MIN);
    (start, end)
}

/// `date` moved by `offset` days, saturating at the calendar limits.
pub fn shift_days(date: NaiveDate, offset: i64) -> NaiveDate {
    let days = Days::new(offset.unsigned_abs());
    let shifted = if offset >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    };
    shifted.unwrap_or(date)
}
