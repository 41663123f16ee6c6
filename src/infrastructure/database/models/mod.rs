pub mod booking_model;
pub mod document_model;

pub use booking_model::{BookingModel, NewBookingModel};
pub use document_model::{DocumentModel, NewDocumentModel};
