pub mod booking_handler;
pub mod conversation_handler;
pub mod document_handler;

pub use booking_handler::BookingHandler;
pub use conversation_handler::ConversationHandler;
pub use document_handler::DocumentHandler;
