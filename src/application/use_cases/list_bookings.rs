use std::sync::Arc;

use crate::domain::entities::Booking;
use crate::domain::repositories::BookingRepository;

#[derive(Debug)]
pub enum ListBookingsError {
    ValidationError(String),
    RepositoryError(String),
}

impl std::fmt::Display for ListBookingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListBookingsError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ListBookingsError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ListBookingsError {}

#[derive(Debug, Clone)]
pub struct ListBookingsRequest {
    pub session_id: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct ListBookingsResponse {
    pub bookings: Vec<Booking>,
}

pub struct ListBookingsUseCase {
    booking_repository: Arc<dyn BookingRepository>,
}

impl ListBookingsUseCase {
    pub fn new(booking_repository: Arc<dyn BookingRepository>) -> Self {
        Self { booking_repository }
    }

    pub async fn execute(
        &self,
        request: ListBookingsRequest,
    ) -> Result<ListBookingsResponse, ListBookingsError> {
        if let Some(session_id) = request.session_id.as_deref() {
            let bookings = self
                .booking_repository
                .find_by_session(session_id)
                .await
                .map_err(|e| ListBookingsError::RepositoryError(e.to_string()))?;
            return Ok(ListBookingsResponse { bookings });
        }

        let skip = request.skip.unwrap_or(0);
        let limit = request.limit.unwrap_or(20);

        if skip < 0 || limit <= 0 || limit > 100 {
            return Err(ListBookingsError::ValidationError(
                "skip must be >= 0 and limit between 1 and 100".to_string(),
            ));
        }

        let bookings = self
            .booking_repository
            .find_all(skip, limit)
            .await
            .map_err(|e| ListBookingsError::RepositoryError(e.to_string()))?;

        Ok(ListBookingsResponse { bookings })
    }
}
