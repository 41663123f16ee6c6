use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Booking;

#[derive(Debug)]
pub enum BookingRepositoryError {
    NotFound(Uuid),
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for BookingRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingRepositoryError::NotFound(id) => write!(f, "Booking not found: {}", id),
            BookingRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            BookingRepositoryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for BookingRepositoryError {}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn save(&self, booking: &Booking) -> Result<(), BookingRepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, BookingRepositoryError>;
    async fn find_by_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<Booking>, BookingRepositoryError>;
    async fn find_all(&self, skip: i64, limit: i64)
    -> Result<Vec<Booking>, BookingRepositoryError>;
}
