use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    })
}

/// One of the four required interview-booking fields, collected in a fixed
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingField {
    Name,
    Email,
    Date,
    Time,
}

impl BookingField {
    pub const COLLECTION_ORDER: [BookingField; 4] = [
        BookingField::Name,
        BookingField::Email,
        BookingField::Date,
        BookingField::Time,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingField::Name => "name",
            BookingField::Email => "email",
            BookingField::Date => "date",
            BookingField::Time => "time",
        }
    }

    /// Clarifying question asked while this field is still missing.
    pub fn prompt(&self) -> &'static str {
        match self {
            BookingField::Name => "Could you share your full name for the interview booking?",
            BookingField::Email => "What email address should we use for the confirmation?",
            BookingField::Date => "Which date works for you? Please use the YYYY-MM-DD format.",
            BookingField::Time => "What time suits you? Please use the 24h HH:MM format.",
        }
    }

    pub fn validate(&self, value: &str) -> Result<(), String> {
        match self {
            BookingField::Name => {
                if value.trim().is_empty() {
                    Err("Name cannot be empty".to_string())
                } else {
                    Ok(())
                }
            }
            BookingField::Email => {
                if email_pattern().is_match(value) {
                    Ok(())
                } else {
                    Err(format!("'{}' does not look like an email address", value))
                }
            }
            BookingField::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(|_| ())
                .map_err(|_| format!("'{}' is not a valid YYYY-MM-DD date", value)),
            BookingField::Time => NaiveTime::parse_from_str(value, "%H:%M")
                .map(|_| ())
                .map_err(|_| format!("'{}' is not a valid HH:MM time", value)),
        }
    }
}

impl std::fmt::Display for BookingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
