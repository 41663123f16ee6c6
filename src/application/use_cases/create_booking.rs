use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Booking;
use crate::domain::repositories::BookingRepository;
use crate::domain::value_objects::BookingField;

#[derive(Debug)]
pub enum CreateBookingError {
    ValidationError(String),
    RepositoryError(String),
}

impl std::fmt::Display for CreateBookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateBookingError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            CreateBookingError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for CreateBookingError {}

#[derive(Debug, Clone)]
pub struct CreateBookingRequest {
    pub session_id: String,
    pub name: String,
    pub email: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone)]
pub struct CreateBookingResponse {
    pub booking_id: Uuid,
}

/// Direct booking creation for callers that already hold all four fields
/// (no slot-filling involved).
pub struct CreateBookingUseCase {
    booking_repository: Arc<dyn BookingRepository>,
}

impl CreateBookingUseCase {
    pub fn new(booking_repository: Arc<dyn BookingRepository>) -> Self {
        Self { booking_repository }
    }

    pub async fn execute(
        &self,
        request: CreateBookingRequest,
    ) -> Result<CreateBookingResponse, CreateBookingError> {
        if request.session_id.trim().is_empty() {
            return Err(CreateBookingError::ValidationError(
                "session_id cannot be empty".to_string(),
            ));
        }

        let fields = [
            (BookingField::Name, request.name.trim()),
            (BookingField::Email, request.email.trim()),
            (BookingField::Date, request.date.trim()),
            (BookingField::Time, request.time.trim()),
        ];

        for (field, value) in fields {
            field
                .validate(value)
                .map_err(CreateBookingError::ValidationError)?;
        }

        let booking = Booking::new(
            request.session_id.trim().to_string(),
            request.name.trim().to_string(),
            request.email.trim().to_string(),
            request.date.trim().to_string(),
            request.time.trim().to_string(),
        );

        self.booking_repository
            .save(&booking)
            .await
            .map_err(|e| CreateBookingError::RepositoryError(e.to_string()))?;

        Ok(CreateBookingResponse {
            booking_id: booking.id(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::domain::repositories::booking_repository::BookingRepositoryError;

    #[derive(Default)]
    struct FakeBookingRepository {
        saved: Mutex<Vec<Booking>>,
    }

    #[async_trait]
    impl BookingRepository for FakeBookingRepository {
        async fn save(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
            self.saved.lock().unwrap().push(booking.clone());
            Ok(())
        }

        async fn find_by_id(
            &self,
            _id: Uuid,
        ) -> Result<Option<Booking>, BookingRepositoryError> {
            Ok(None)
        }

        async fn find_by_session(
            &self,
            _session_id: &str,
        ) -> Result<Vec<Booking>, BookingRepositoryError> {
            Ok(Vec::new())
        }

        async fn find_all(
            &self,
            _skip: i64,
            _limit: i64,
        ) -> Result<Vec<Booking>, BookingRepositoryError> {
            Ok(self.saved.lock().unwrap().clone())
        }
    }

    fn request() -> CreateBookingRequest {
        CreateBookingRequest {
            session_id: "s1".to_string(),
            name: "Sujan".to_string(),
            email: "sujan@mail.com".to_string(),
            date: "2025-01-10".to_string(),
            time: "14:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_valid_booking_is_persisted() {
        let repository = Arc::new(FakeBookingRepository::default());
        let use_case = CreateBookingUseCase::new(repository.clone());

        let response = use_case.execute(request()).await.unwrap();

        let saved = repository.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id(), response.booking_id);
        assert_eq!(saved[0].name(), "Sujan");
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected() {
        let use_case = CreateBookingUseCase::new(Arc::new(FakeBookingRepository::default()));

        let mut bad = request();
        bad.email = "nope".to_string();

        assert!(matches!(
            use_case.execute(bad).await,
            Err(CreateBookingError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_date_is_rejected() {
        let use_case = CreateBookingUseCase::new(Arc::new(FakeBookingRepository::default()));

        let mut bad = request();
        bad.date = "2025-02-30".to_string();

        assert!(matches!(
            use_case.execute(bad).await,
            Err(CreateBookingError::ValidationError(_))
        ));
    }
}
