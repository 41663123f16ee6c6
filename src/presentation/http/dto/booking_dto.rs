use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::create_booking::CreateBookingResponse;
use crate::domain::entities::Booking;

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequestDto {
    pub session_id: String,
    pub name: String,
    pub email: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Serialize)]
pub struct CreateBookingResponseDto {
    pub booking_id: Uuid,
}

impl From<CreateBookingResponse> for CreateBookingResponseDto {
    fn from(response: CreateBookingResponse) -> Self {
        Self {
            booking_id: response.booking_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BookingListQueryDto {
    pub session_id: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct BookingResponseDto {
    pub id: Uuid,
    pub session_id: String,
    pub name: String,
    pub email: String,
    pub date: String,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponseDto {
    fn from(booking: Booking) -> Self {
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

#[derive(Debug, Serialize)]
pub struct BookingListResponseDto {
    pub bookings: Vec<BookingResponseDto>,
}
