pub mod converse;
pub mod create_booking;
pub mod ingest_document;
pub mod list_bookings;
pub mod list_documents;

pub use converse::ConverseUseCase;
pub use create_booking::CreateBookingUseCase;
pub use ingest_document::IngestDocumentUseCase;
pub use list_bookings::ListBookingsUseCase;
pub use list_documents::ListDocumentsUseCase;
