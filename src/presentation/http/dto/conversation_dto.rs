use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::converse::{BookingOutcome, ConverseResponse};
use crate::domain::entities::{BookingFields, SourceRef};

#[derive(Debug, Deserialize)]
pub struct ConversationRequestDto {
    pub session_id: String,
    pub message: Option<String>,
    pub booking: Option<BookingFieldsDto>,
    pub top_k: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BookingFieldsDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

impl From<BookingFieldsDto> for BookingFields {
    fn from(dto: BookingFieldsDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            date: dto.date,
            time: dto.time,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SourceDto {
    pub excerpt: String,
    pub filename: String,
}

impl From<SourceRef> for SourceDto {
    fn from(source: SourceRef) -> Self {
        Self {
            excerpt: source.excerpt,
            filename: source.filename,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookingStatusDto {
    pub confirmed: bool,
    pub booking_id: Option<Uuid>,
    pub missing_fields: Vec<String>,
}

impl From<BookingOutcome> for BookingStatusDto {
    fn from(outcome: BookingOutcome) -> Self {
        Self {
            confirmed: outcome.confirmed,
            booking_id: outcome.booking_id,
            missing_fields: outcome
                .missing_fields
                .iter()
                .map(|field| field.as_str().to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConversationResponseDto {
    pub answer: String,
    pub sources: Vec<SourceDto>,
    pub intent: String,
    pub booking: Option<BookingStatusDto>,
}

impl From<ConverseResponse> for ConversationResponseDto {
    fn from(response: ConverseResponse) -> Self {
        Self {
            answer: response.answer,
            sources: response.sources.into_iter().map(SourceDto::from).collect(),
            intent: response.intent.as_str().to_string(),
            booking: response.booking.map(BookingStatusDto::from),
        }
    }
}
