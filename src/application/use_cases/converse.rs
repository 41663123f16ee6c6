use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::{CompletionProvider, EmbeddingProvider};
use crate::application::services::retriever::{RetrievalError, RetrievedChunk};
use crate::application::services::{Intent, IntentRouter, PromptAssembler, Retriever, SessionMemory};
use crate::domain::entities::{BookingDraft, BookingFields, BookingState, SourceRef, Turn};
use crate::domain::repositories::BookingRepository;
use crate::domain::value_objects::BookingField;

const RETRIEVAL_DOWN_CAVEAT: &str =
    "Note: document retrieval is currently unavailable, so this answer is based on the conversation history alone.";

const NO_CONTEXT_CAVEAT: &str =
    "Note: no relevant content was found in the indexed documents for this question.";

#[derive(Debug)]
pub enum ConverseError {
    ValidationError(String),
    SessionError(String),
    EmbeddingError(String),
    DimensionMismatch(String),
    CompletionUnavailable(String),
    RepositoryError(String),
}

impl std::fmt::Display for ConverseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConverseError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ConverseError::SessionError(msg) => write!(f, "Session error: {}", msg),
            ConverseError::EmbeddingError(msg) => write!(f, "Embedding error: {}", msg),
            ConverseError::DimensionMismatch(msg) => write!(f, "{}", msg),
            ConverseError::CompletionUnavailable(msg) => {
                write!(f, "Completion service unavailable: {}", msg)
            }
            ConverseError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ConverseError {}

#[derive(Debug, Clone)]
pub struct ConverseRequest {
    pub session_id: String,
    pub message: Option<String>,
    pub booking: BookingFields,
    pub top_k: Option<usize>,
}

/// Where the session's booking stands after this turn.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingOutcome {
    pub confirmed: bool,
    pub booking_id: Option<Uuid>,
    pub missing_fields: Vec<BookingField>,
}

#[derive(Debug, Clone)]
pub struct ConverseResponse {
    pub answer: String,
    pub sources: Vec<SourceRef>,
    pub intent: Intent,
    pub booking: Option<BookingOutcome>,
}

#[derive(Debug, Clone)]
pub struct ConverseConfig {
    pub history_window: usize,
    pub default_top_k: usize,
}

impl Default for ConverseConfig {
    fn default() -> Self {
        Self {
            history_window: 10,
            default_top_k: 5,
        }
    }
}

/// Top-level coordinator for one conversational turn: routes the turn,
/// retrieves and generates (or advances the booking), and appends exactly
/// one Turn to the session log once the outcome is definitive.
pub struct ConverseUseCase {
    session_memory: Arc<SessionMemory>,
    booking_repository: Arc<dyn BookingRepository>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    retriever: Arc<Retriever>,
    prompt_assembler: PromptAssembler,
    completion_provider: Arc<dyn CompletionProvider>,
    config: ConverseConfig,
}

impl ConverseUseCase {
    pub fn new(
        session_memory: Arc<SessionMemory>,
        booking_repository: Arc<dyn BookingRepository>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        retriever: Arc<Retriever>,
        prompt_assembler: PromptAssembler,
        completion_provider: Arc<dyn CompletionProvider>,
        config: ConverseConfig,
    ) -> Self {
        Self {
            session_memory,
            booking_repository,
            embedding_provider,
            retriever,
            prompt_assembler,
            completion_provider,
            config,
        }
    }

    pub async fn execute(
        &self,
        request: ConverseRequest,
    ) -> Result<ConverseResponse, ConverseError> {
        if request.session_id.trim().is_empty() {
            return Err(ConverseError::ValidationError(
                "session_id cannot be empty".to_string(),
            ));
        }

        let has_message = request
            .message
            .as_deref()
            .map(|m| !m.trim().is_empty())
            .unwrap_or(false);

        if !has_message && request.booking.is_empty() {
            return Err(ConverseError::ValidationError(
                "Request must carry a message or booking fields".to_string(),
            ));
        }

        let recent_turns = self
            .session_memory
            .recent_turns(&request.session_id, self.config.history_window)
            .await
            .map_err(|e| ConverseError::SessionError(e.to_string()))?;

        let draft = self
            .session_memory
            .load_draft(&request.session_id)
            .await
            .map_err(|e| ConverseError::SessionError(e.to_string()))?;

        let intent = IntentRouter::classify(&request.booking, draft.as_ref());

        let (answer, sources, booking) = match intent {
            Intent::BookingSubmission => {
                let (answer, outcome) = self.advance_booking(&request, draft).await?;
                (answer, Vec::new(), Some(outcome))
            }
            Intent::KnowledgeQuery => {
                let (answer, sources) = self.answer_from_documents(&request, &recent_turns).await?;
                (answer, sources, None)
            }
        };

        // One append per call, and only after a definitive outcome.
        let turn = Turn::new(
            Self::user_text(&request),
            answer.clone(),
            sources.clone(),
        );
        self.session_memory
            .append_turn(&request.session_id, &turn)
            .await
            .map_err(|e| ConverseError::SessionError(e.to_string()))?;

        Ok(ConverseResponse {
            answer,
            sources,
            intent,
            booking,
        })
    }

    async fn advance_booking(
        &self,
        request: &ConverseRequest,
        draft: Option<BookingDraft>,
    ) -> Result<(String, BookingOutcome), ConverseError> {
        let mut draft = draft.unwrap_or_default();
        let rejections = draft.apply(&request.booking);

        match draft.state() {
            BookingState::Complete => {
                let booking = draft
                    .into_booking(&request.session_id)
                    .map_err(ConverseError::ValidationError)?;

                self.booking_repository
                    .save(&booking)
                    .await
                    .map_err(|e| ConverseError::RepositoryError(e.to_string()))?;

                self.session_memory
                    .clear_draft(&request.session_id)
                    .await
                    .map_err(|e| ConverseError::SessionError(e.to_string()))?;

                tracing::info!(
                    "Booking {} confirmed for session {}",
                    booking.id(),
                    request.session_id
                );

                let answer = format!(
                    "Your interview is booked, {}. We will see you on {} at {}; a confirmation goes to {}.",
                    booking.name(),
                    booking.date(),
                    booking.time(),
                    booking.email()
                );

                Ok((
                    answer,
                    BookingOutcome {
                        confirmed: true,
                        booking_id: Some(booking.id()),
                        missing_fields: Vec::new(),
                    },
                ))
            }
            BookingState::Collecting(missing) => {
                self.session_memory
                    .store_draft(&request.session_id, &draft)
                    .await
                    .map_err(|e| ConverseError::SessionError(e.to_string()))?;

                let answer = if let Some((field, reason)) = rejections.first() {
                    format!("{}. {}", reason, field.prompt())
                } else {
                    missing[0].prompt().to_string()
                };

                Ok((
                    answer,
                    BookingOutcome {
                        confirmed: false,
                        booking_id: None,
                        missing_fields: missing,
                    },
                ))
            }
        }
    }

    async fn answer_from_documents(
        &self,
        request: &ConverseRequest,
        recent_turns: &[Turn],
    ) -> Result<(String, Vec<SourceRef>), ConverseError> {
        let message = request
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| {
                ConverseError::ValidationError(
                    "A knowledge query requires a message".to_string(),
                )
            })?;

        let query_embedding = self
            .embedding_provider
            .embed(message)
            .await
            .map_err(|e| ConverseError::EmbeddingError(e.to_string()))?;

        let top_k = request.top_k.unwrap_or(self.config.default_top_k);

        let (chunks, retrieval_down): (Vec<RetrievedChunk>, bool) =
            match self.retriever.retrieve(query_embedding, top_k).await {
                Ok(chunks) => (chunks, false),
                Err(RetrievalError::ValidationError(msg)) => {
                    return Err(ConverseError::ValidationError(msg));
                }
                Err(e @ RetrievalError::DimensionMismatch { .. }) => {
                    return Err(ConverseError::DimensionMismatch(e.to_string()));
                }
                Err(RetrievalError::Unavailable(reason)) => {
                    tracing::error!("Retrieval unavailable, answering without context: {}", reason);
                    (Vec::new(), true)
                }
            };

        let prompt = self.prompt_assembler.build(message, &chunks, recent_turns);

        let completion = self
            .completion_provider
            .complete(&prompt.messages)
            .await
            .map_err(|e| ConverseError::CompletionUnavailable(e.to_string()))?;

        let answer = if retrieval_down {
            format!("{}\n\n{}", RETRIEVAL_DOWN_CAVEAT, completion)
        } else if prompt.included.is_empty() {
            format!("{}\n\n{}", NO_CONTEXT_CAVEAT, completion)
        } else {
            completion
        };

        let sources = prompt
            .included
            .iter()
            .map(|chunk| SourceRef::from_chunk(&chunk.text, &chunk.filename))
            .collect();

        Ok((answer, sources))
    }

    fn user_text(request: &ConverseRequest) -> String {
        if let Some(message) = request.message.as_deref() {
            let trimmed = message.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }

        let mut parts = Vec::new();
        let fields = &request.booking;
        if let Some(name) = &fields.name {
            parts.push(format!("name: {}", name));
        }
        if let Some(email) = &fields.email {
            parts.push(format!("email: {}", email));
        }
        if let Some(date) = &fields.date {
            parts.push(format!("date: {}", date));
        }
        if let Some(time) = &fields.time {
            parts.push(format!("time: {}", time));
        }

        format!("[booking details] {}", parts.join(", "))
    }
}
