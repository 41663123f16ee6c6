use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Booking;
use crate::domain::repositories::{BookingRepository, booking_repository::BookingRepositoryError};
use crate::infrastructure::database::models::{BookingModel, NewBookingModel};
use crate::infrastructure::database::schema::bookings::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresBookingRepository {
    pool: DbPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn save(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| BookingRepositoryError::DatabaseError(e.to_string()))?;

        let new_booking = NewBookingModel::from(booking);

        diesel::insert_into(bookings)
            .values(&new_booking)
            .execute(&mut conn)
            .map_err(|e| BookingRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        booking_id: Uuid,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| BookingRepositoryError::DatabaseError(e.to_string()))?;

        let result = bookings
            .find(booking_id)
            .first::<BookingModel>(&mut conn)
            .optional()
            .map_err(|e| BookingRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(Booking::from))
    }

    async fn find_by_session(
        &self,
        session: &str,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| BookingRepositoryError::DatabaseError(e.to_string()))?;

        let models = bookings
            .filter(session_id.eq(session))
            .order(created_at.asc())
            .load::<BookingModel>(&mut conn)
            .map_err(|e| BookingRepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(Booking::from).collect())
    }

    async fn find_all(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| BookingRepositoryError::DatabaseError(e.to_string()))?;

        let models = bookings
            .order(created_at.desc())
            .offset(skip)
            .limit(limit)
            .load::<BookingModel>(&mut conn)
            .map_err(|e| BookingRepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(Booking::from).collect())
    }
}
