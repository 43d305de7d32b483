use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use time::Date;
use time::macros::format_description;
use tracing::warn;

/// A single reservation date.
///
/// Malformed form input is not rejected; it becomes `Invalid` and is sent to
/// the backend as `null`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReservationDate {
    Day(Date),
    Invalid,
}

impl ReservationDate {
    pub fn day(&self) -> Option<Date> {
        match self {
            ReservationDate::Day(date) => Some(*date),
            ReservationDate::Invalid => None,
        }
    }

    /// `YYYY-MM-DD`, or `None` for an invalid date.
    pub fn to_iso_string(&self) -> Option<String> {
        let format = format_description!("[year]-[month]-[day]");
        self.day().and_then(|date| date.format(&format).ok())
    }

    /// Reads the leading `YYYY-MM-DD` of an ISO date or datetime string.
    pub fn parse_iso(value: &str) -> Result<Self, time::error::Parse> {
        let format = format_description!("[year]-[month]-[day]");
        let day_part = value.split('T').next().unwrap_or(value);
        Date::parse(day_part.trim(), &format).map(ReservationDate::Day)
    }
}

impl From<Date> for ReservationDate {
    fn from(date: Date) -> Self {
        ReservationDate::Day(date)
    }
}

impl fmt::Display for ReservationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_iso_string() {
            Some(iso) => f.write_str(&iso),
            None => f.write_str("Invalid Date"),
        }
    }
}

impl Serialize for ReservationDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_iso_string() {
            Some(iso) => serializer.serialize_str(&iso),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for ReservationDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(value) => match ReservationDate::parse_iso(&value) {
                Ok(date) => Ok(date),
                Err(e) => {
                    warn!("Unreadable reservation date '{}' due to: {}", value, e);
                    Ok(ReservationDate::Invalid)
                }
            },
            None => Ok(ReservationDate::Invalid),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Assigned by the backend, absent until the record is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub reservation_dates: Vec<ReservationDate>,
    /// Remaining descriptive fields, carried through untouched.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}
