use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::{
    CreateBookingUseCase, ListBookingsUseCase,
    create_booking::{CreateBookingError, CreateBookingRequest},
    list_bookings::ListBookingsRequest,
};
use crate::presentation::http::dto::{
    ApiResponse, BookingListQueryDto, BookingListResponseDto, BookingResponseDto,
    CreateBookingRequestDto, CreateBookingResponseDto,
};

pub struct BookingHandler {
    create_booking_use_case: Arc<CreateBookingUseCase>,
    list_bookings_use_case: Arc<ListBookingsUseCase>,
}

impl BookingHandler {
    pub fn new(
        create_booking_use_case: Arc<CreateBookingUseCase>,
        list_bookings_use_case: Arc<ListBookingsUseCase>,
    ) -> Self {
        Self {
            create_booking_use_case,
            list_bookings_use_case,
        }
    }

    pub async fn create_booking(
        State(handler): State<Arc<BookingHandler>>,
        Json(body): Json<CreateBookingRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = CreateBookingRequest {
            session_id: body.session_id,
            name: body.name,
            email: body.email,
            date: body.date,
            time: body.time,
        };

        match handler.create_booking_use_case.execute(request).await {
            Ok(response) => {
                let dto = CreateBookingResponseDto::from(response);
                Ok((StatusCode::CREATED, Json(ApiResponse::success(dto))))
            }
            Err(e) => {
                let (status, code) = match &e {
                    CreateBookingError::ValidationError(_) => {
                        (StatusCode::BAD_REQUEST, "INVALID_BOOKING")
                    }
                    CreateBookingError::RepositoryError(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "BOOKING_FAILED")
                    }
                };

                Ok((
                    status,
                    Json(ApiResponse::<CreateBookingResponseDto>::error(
                        code.to_string(),
                        e.to_string(),
                        None,
                    )),
                ))
            }
        }
    }

    pub async fn list_bookings(
        State(handler): State<Arc<BookingHandler>>,
        Query(query): Query<BookingListQueryDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = ListBookingsRequest {
            session_id: query.session_id,
            skip: query.skip,
            limit: query.limit,
        };

        match handler.list_bookings_use_case.execute(request).await {
            Ok(response) => {
                let dto = BookingListResponseDto {
                    bookings: response
                        .bookings
                        .into_iter()
                        .map(BookingResponseDto::from)
                        .collect(),
                };

                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<BookingListResponseDto>::error(
                    "LIST_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }
}
