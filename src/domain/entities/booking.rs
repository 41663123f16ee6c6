use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::BookingField;

/// A confirmed interview booking. Immutable once all four fields have been
/// collected and validated; persisted to the relational store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    id: Uuid,
    session_id: String,
    name: String,
    email: String,
    date: String,
    time: String,
    created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        session_id: String,
        name: String,
        email: String,
        date: String,
        time: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            name,
            email,
            date,
            time,
            created_at: Utc::now(),
        }
    }

    pub fn from_stored(
        id: Uuid,
        session_id: String,
        name: String,
        email: String,
        date: String,
        time: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            session_id,
            name,
            email,
            date,
            time,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Structured booking fields carried by a conversation request. Any subset
/// may be present; an all-empty value means the turn carried none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

impl BookingFields {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.date.is_none() && self.time.is_none()
    }
}

/// Where a session's booking currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingState {
    Collecting(Vec<BookingField>),
    Complete,
}

/// The in-progress booking accumulated across turns. Lives in the session
/// cache until it completes, at which point it becomes a [`Booking`] and the
/// draft is discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    name: Option<String>,
    email: Option<String>,
    date: Option<String>,
    time: Option<String>,
}

impl BookingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, field: BookingField) -> &mut Option<String> {
        match field {
            BookingField::Name => &mut self.name,
            BookingField::Email => &mut self.email,
            BookingField::Date => &mut self.date,
            BookingField::Time => &mut self.time,
        }
    }

    fn value(&self, field: BookingField) -> Option<&str> {
        match field {
            BookingField::Name => self.name.as_deref(),
            BookingField::Email => self.email.as_deref(),
            BookingField::Date => self.date.as_deref(),
            BookingField::Time => self.time.as_deref(),
        }
    }

    /// Merge submitted fields into the draft. Valid values are accepted
    /// (overwriting any earlier value for the same field); invalid values are
    /// returned with the rejection reason and the previous value is kept.
    pub fn apply(&mut self, fields: &BookingFields) -> Vec<(BookingField, String)> {
        let submitted = [
            (BookingField::Name, fields.name.as_deref()),
            (BookingField::Email, fields.email.as_deref()),
            (BookingField::Date, fields.date.as_deref()),
            (BookingField::Time, fields.time.as_deref()),
        ];

        let mut rejections = Vec::new();

        for (field, raw) in submitted {
            let Some(raw) = raw else { continue };
            let trimmed = raw.trim();

            match field.validate(trimmed) {
                Ok(()) => *self.slot(field) = Some(trimmed.to_string()),
                Err(reason) => rejections.push((field, reason)),
            }
        }

        rejections
    }

    pub fn missing_fields(&self) -> Vec<BookingField> {
        BookingField::COLLECTION_ORDER
            .into_iter()
            .filter(|field| self.value(*field).is_none())
            .collect()
    }

    pub fn state(&self) -> BookingState {
        let missing = self.missing_fields();
        if missing.is_empty() {
            BookingState::Complete
        } else {
            BookingState::Collecting(missing)
        }
    }

    /// Promote a complete draft to a confirmed booking.
    pub fn into_booking(self, session_id: &str) -> Result<Booking, String> {
        match (self.name, self.email, self.date, self.time) {
            (Some(name), Some(email), Some(date), Some(time)) => Ok(Booking::new(
                session_id.to_string(),
                name,
                email,
                date,
                time,
            )),
            _ => Err("Booking is not complete yet".to_string()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(
        name: Option<&str>,
        email: Option<&str>,
        date: Option<&str>,
        time: Option<&str>,
    ) -> BookingFields {
        BookingFields {
            name: name.map(String::from),
            email: email.map(String::from),
            date: date.map(String::from),
            time: time.map(String::from),
        }
    }

    #[test]
    fn test_one_field_per_turn_reaches_complete() {
        let mut draft = BookingDraft::new();

        draft.apply(&fields(Some("Sujan"), None, None, None));
        assert_eq!(
            draft.state(),
            BookingState::Collecting(vec![
                BookingField::Email,
                BookingField::Date,
                BookingField::Time
            ])
        );

        draft.apply(&fields(None, Some("sujan@mail.com"), None, None));
        assert_eq!(
            draft.state(),
            BookingState::Collecting(vec![BookingField::Date, BookingField::Time])
        );

        draft.apply(&fields(None, None, Some("2025-01-10"), None));
        assert_eq!(
            draft.state(),
            BookingState::Collecting(vec![BookingField::Time])
        );

        draft.apply(&fields(None, None, None, Some("14:00")));
        assert_eq!(draft.state(), BookingState::Complete);
    }

    #[test]
    fn test_all_fields_in_one_turn() {
        let mut draft = BookingDraft::new();
        let rejections = draft.apply(&fields(
            Some("Sujan"),
            Some("sujan@mail.com"),
            Some("2025-01-10"),
            Some("14:00"),
        ));

        assert!(rejections.is_empty());
        assert_eq!(draft.state(), BookingState::Complete);

        let booking = draft.into_booking("session-1").unwrap();
        assert_eq!(booking.name(), "Sujan");
        assert_eq!(booking.session_id(), "session-1");
    }

    #[test]
    fn test_invalid_value_is_rejected_and_previous_kept() {
        let mut draft = BookingDraft::new();
        draft.apply(&fields(None, Some("sujan@mail.com"), None, None));

        let rejections = draft.apply(&fields(None, Some("not-an-email"), None, None));
        assert_eq!(rejections.len(), 1);
        assert_eq!(rejections[0].0, BookingField::Email);
        assert_eq!(draft.email(), Some("sujan@mail.com"));
    }

    #[test]
    fn test_missing_fields_follow_collection_order() {
        let mut draft = BookingDraft::new();
        draft.apply(&fields(None, None, None, Some("09:30")));

        assert_eq!(
            draft.missing_fields(),
            vec![BookingField::Name, BookingField::Email, BookingField::Date]
        );
    }

    #[test]
    fn test_incomplete_draft_cannot_become_booking() {
        let mut draft = BookingDraft::new();
        draft.apply(&fields(Some("Sujan"), None, None, None));
        assert!(draft.into_booking("session-1").is_err());
    }
}
