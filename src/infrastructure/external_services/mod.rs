pub mod chat_completion;
pub mod document_extractors;
pub mod inference_embedding;
pub mod qdrant_store;

pub use chat_completion::GroqCompletionProvider;
pub use document_extractors::CompositeDocumentExtractor;
pub use inference_embedding::InferenceEmbeddingProvider;
pub use qdrant_store::QdrantVectorStore;
