pub mod booking_dto;
pub mod conversation_dto;
pub mod document_dto;
pub mod response_dto;

pub use booking_dto::*;
pub use conversation_dto::*;
pub use document_dto::*;
pub use response_dto::*;
