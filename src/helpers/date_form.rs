//! Conversions between the comma separated date field of the edit form and
//! the stored [`ReservationDate`] sequence.
//!
//! Parsing follows calendar-constructor rules rather than validating: month
//! and day overflow roll forward, two digit years land in the 1900s and
//! anything unreadable becomes [`ReservationDate::Invalid`].

use time::{Date, Duration, Month};
use crate::models::reservation::ReservationDate;

/// Parses `YYYY-MM-DD,YYYY-MM-DD,...` into one date per comma separated token.
///
/// An empty string is still one token and yields a single invalid date.
/// Years outside `-9999..=9999` are invalid.
pub fn transform_reservation_dates(date_string: &str) -> Vec<ReservationDate> {
    date_string
        .split(',')
        .map(parse_date_token)
        .collect()
}

/// Formats dates back into the form field; invalid dates become empty tokens.
pub fn format_reservation_dates(dates: &[ReservationDate]) -> String {
    dates
        .iter()
        .map(|date| date.to_iso_string().unwrap_or_default())
        .collect::<Vec<String>>()
        .join(",")
}

fn parse_date_token(token: &str) -> ReservationDate {
    let mut parts = token.split('-');
    let year = to_number(parts.next());
    // input months are 1-based
    let month = to_number(parts.next()) - 1.0;
    let day = to_number(parts.next());

    make_date(year, month, day)
}

/// Numeric conversion of one date component: blank text is zero, a missing
/// or non-numeric component is NaN.
fn to_number(part: Option<&str>) -> f64 {
    match part.map(str::trim) {
        None => f64::NAN,
        Some("") => 0.0,
        Some(text) => text.parse::<f64>().unwrap_or(f64::NAN),
    }
}

fn make_date(year: f64, month: f64, day: f64) -> ReservationDate {
    if !(year.is_finite() && month.is_finite() && day.is_finite()) {
        return ReservationDate::Invalid;
    }

    let mut year = year.trunc();
    if (0.0..=99.0).contains(&year) {
        year += 1900.0;
    }
    let month = month.trunc();
    let day = day.trunc();

    let year = year + (month / 12.0).floor();
    let month_index = month.rem_euclid(12.0) as u8;

    if year.abs() > 1_000_000.0 || day.abs() > 1_000_000_000.0 {
        return ReservationDate::Invalid;
    }

    let Ok(month) = Month::try_from(month_index + 1) else {
        return ReservationDate::Invalid;
    };

    Date::from_calendar_date(year as i32, month, 1)
        .ok()
        .and_then(|first_of_month| first_of_month.checked_add(Duration::days(day as i64 - 1)))
        .map(ReservationDate::Day)
        .unwrap_or(ReservationDate::Invalid)
}
