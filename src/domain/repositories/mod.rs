pub mod booking_repository;
pub mod document_repository;

pub use booking_repository::BookingRepository;
pub use document_repository::DocumentRepository;
