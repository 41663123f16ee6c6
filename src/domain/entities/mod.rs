pub mod booking;
pub mod document;
pub mod turn;

pub use booking::{Booking, BookingDraft, BookingFields, BookingState};
pub use document::Document;
pub use turn::{SourceRef, Turn};
