pub mod booking_field;
pub mod chunk_strategy;
pub mod content_hash;

pub use booking_field::BookingField;
pub use chunk_strategy::ChunkStrategy;
pub use content_hash::ContentHash;
