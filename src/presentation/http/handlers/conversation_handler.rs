use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::use_cases::{
    ConverseUseCase,
    converse::{ConverseError, ConverseRequest},
};
use crate::domain::entities::BookingFields;
use crate::presentation::http::dto::{
    ApiResponse, ConversationRequestDto, ConversationResponseDto,
};

pub struct ConversationHandler {
    converse_use_case: Arc<ConverseUseCase>,
}

impl ConversationHandler {
    pub fn new(converse_use_case: Arc<ConverseUseCase>) -> Self {
        Self { converse_use_case }
    }

    pub async fn conversate(
        State(handler): State<Arc<ConversationHandler>>,
        Json(body): Json<ConversationRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = ConverseRequest {
            session_id: body.session_id,
            message: body.message,
            booking: body.booking.map(BookingFields::from).unwrap_or_default(),
            top_k: body.top_k,
        };

        match handler.converse_use_case.execute(request).await {
            Ok(response) => {
                let dto = ConversationResponseDto::from(response);
                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(e) => {
                let (status, code) = match &e {
                    ConverseError::ValidationError(_) => {
                        (StatusCode::BAD_REQUEST, "INVALID_REQUEST")
                    }
                    ConverseError::DimensionMismatch(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "EMBEDDING_DIMENSION_MISMATCH",
                    ),
                    ConverseError::EmbeddingError(_) => {
                        (StatusCode::SERVICE_UNAVAILABLE, "EMBEDDING_UNAVAILABLE")
                    }
                    ConverseError::CompletionUnavailable(_) => {
                        (StatusCode::SERVICE_UNAVAILABLE, "COMPLETION_UNAVAILABLE")
                    }
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, "CONVERSATION_FAILED"),
                };

                Ok((
                    status,
                    Json(ApiResponse::<ConversationResponseDto>::error(
                        code.to_string(),
                        e.to_string(),
                        None,
                    )),
                ))
            }
        }
    }
}
