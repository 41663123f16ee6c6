use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::BookingHandler;

pub fn booking_routes(booking_handler: Arc<BookingHandler>) -> Router {
    Router::new()
        .route(
            "/bookings",
            post(BookingHandler::create_booking).get(BookingHandler::list_bookings),
        )
        .with_state(booking_handler)
}
