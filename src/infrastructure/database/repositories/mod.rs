pub mod postgres_booking_repository;
pub mod postgres_document_repository;

pub use postgres_booking_repository::PostgresBookingRepository;
pub use postgres_document_repository::PostgresDocumentRepository;
