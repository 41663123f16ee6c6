use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Booking;
use crate::infrastructure::database::schema::bookings;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BookingModel {
    pub id: Uuid,
    pub session_id: String,
    pub name: String,
    pub email: String,
    pub date: String,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, Deserialize)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewBookingModel {
    pub id: Uuid,
    pub session_id: String,
    pub name: String,
    pub email: String,
    pub date: String,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Booking> for NewBookingModel {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id(),
            session_id: booking.session_id().to_string(),
            name: booking.name().to_string(),
            email: booking.email().to_string(),
            date: booking.date().to_string(),
            time: booking.time().to_string(),
            created_at: booking.created_at(),
        }
    }
}

impl From<BookingModel> for Booking {
    fn from(model: BookingModel) -> Self {
        Booking::from_stored(
            model.id,
            model.session_id,
            model.name,
            model.email,
            model.date,
            model.time,
            model.created_at,
        )
    }
}
