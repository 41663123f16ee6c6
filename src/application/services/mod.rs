pub mod chunker;
pub mod intent_router;
pub mod prompt_assembler;
pub mod retriever;
pub mod session_memory;

pub use chunker::Chunker;
pub use intent_router::{Intent, IntentRouter};
pub use prompt_assembler::PromptAssembler;
pub use retriever::Retriever;
pub use session_memory::SessionMemory;
