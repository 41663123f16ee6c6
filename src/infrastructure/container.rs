use std::{env, path::PathBuf, sync::Arc};

use crate::{
    application::{
        ports::{
            CompletionProvider, DocumentExtractor, EmbeddingProvider, FileStorage, SessionCache,
            VectorStore,
        },
        services::{Chunker, PromptAssembler, Retriever, SessionMemory},
        use_cases::{
            ConverseUseCase, CreateBookingUseCase, IngestDocumentUseCase, ListBookingsUseCase,
            ListDocumentsUseCase, converse::ConverseConfig,
        },
    },
    domain::repositories::{BookingRepository, DocumentRepository},
    infrastructure::{
        cache::RedisSessionCache,
        database::{
            create_connection_pool, get_database_connection,
            repositories::{PostgresBookingRepository, PostgresDocumentRepository},
            run_migrations,
        },
        external_services::{
            CompositeDocumentExtractor, GroqCompletionProvider, InferenceEmbeddingProvider,
            QdrantVectorStore,
        },
        file_system::LocalFileStorage,
    },
    presentation::http::handlers::{BookingHandler, ConversationHandler, DocumentHandler},
};

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

pub struct AppContainer {
    // Repositories
    pub document_repository: Arc<dyn DocumentRepository>,
    pub booking_repository: Arc<dyn BookingRepository>,

    // External services
    pub embedding_provider: Arc<dyn EmbeddingProvider>,
    pub completion_provider: Arc<dyn CompletionProvider>,
    pub vector_store: Arc<dyn VectorStore>,
    pub session_cache: Arc<dyn SessionCache>,
    pub file_storage: Arc<dyn FileStorage>,
    pub document_extractor: Arc<dyn DocumentExtractor>,

    // Application services
    pub session_memory: Arc<SessionMemory>,
    pub retriever: Arc<Retriever>,

    // Use cases
    pub ingest_document_use_case: Arc<IngestDocumentUseCase>,
    pub converse_use_case: Arc<ConverseUseCase>,
    pub create_booking_use_case: Arc<CreateBookingUseCase>,
    pub list_documents_use_case: Arc<ListDocumentsUseCase>,
    pub list_bookings_use_case: Arc<ListBookingsUseCase>,

    // HTTP handlers
    pub document_handler: Arc<DocumentHandler>,
    pub conversation_handler: Arc<ConversationHandler>,
    pub booking_handler: Arc<BookingHandler>,
}

impl AppContainer {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        // Relational store
        let db_pool = create_connection_pool()?;
        let mut conn = get_database_connection()
            .map_err(|e| format!("Failed to create database connection: {}", e))?;
        run_migrations(&mut conn)
            .map_err(|e| format!("Failed to run database migrations: {}", e))?;

        let document_repository: Arc<dyn DocumentRepository> =
            Arc::new(PostgresDocumentRepository::new(db_pool.clone()));
        let booking_repository: Arc<dyn BookingRepository> =
            Arc::new(PostgresBookingRepository::new(db_pool));

        // External collaborators
        let embedding_provider: Arc<dyn EmbeddingProvider> =
            Arc::new(InferenceEmbeddingProvider::from_env()?);
        let completion_provider: Arc<dyn CompletionProvider> =
            Arc::new(GroqCompletionProvider::from_env()?);

        let vector_store: Arc<dyn VectorStore> = Arc::new(QdrantVectorStore::from_env()?);
        vector_store
            .ensure_collection()
            .await
            .map_err(|e| format!("Failed to prepare vector collection: {}", e))?;

        let session_cache: Arc<dyn SessionCache> = Arc::new(
            RedisSessionCache::from_env()
                .await
                .map_err(|e| format!("Failed to connect to session cache: {}", e))?,
        );

        let upload_dir =
            PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string()));
        let file_storage: Arc<dyn FileStorage> = Arc::new(LocalFileStorage::new(upload_dir));

        let document_extractor: Arc<dyn DocumentExtractor> =
            Arc::new(CompositeDocumentExtractor::new());

        // Pipeline services
        let chunker = Chunker::new(env_usize("CHUNK_MAX_WORDS", 250));

        let score_threshold = env::var("SCORE_THRESHOLD")
            .ok()
            .and_then(|v| v.parse::<f32>().ok());
        let retriever = Arc::new(Retriever::new(vector_store.clone(), score_threshold));

        let prompt_assembler = PromptAssembler::new(env_usize("MAX_CONTEXT_CHARS", 6000));

        let session_memory = Arc::new(SessionMemory::new(session_cache.clone()));

        let converse_config = ConverseConfig {
            history_window: env_usize("HISTORY_WINDOW", 10),
            default_top_k: env_usize("DEFAULT_TOP_K", 5),
        };

        // Use cases
        let ingest_document_use_case = Arc::new(IngestDocumentUseCase::new(
            document_repository.clone(),
            file_storage.clone(),
            document_extractor.clone(),
            embedding_provider.clone(),
            vector_store.clone(),
            chunker,
        ));

        let converse_use_case = Arc::new(ConverseUseCase::new(
            session_memory.clone(),
            booking_repository.clone(),
            embedding_provider.clone(),
            retriever.clone(),
            prompt_assembler,
            completion_provider.clone(),
            converse_config,
        ));

        let create_booking_use_case =
            Arc::new(CreateBookingUseCase::new(booking_repository.clone()));
        let list_documents_use_case =
            Arc::new(ListDocumentsUseCase::new(document_repository.clone()));
        let list_bookings_use_case =
            Arc::new(ListBookingsUseCase::new(booking_repository.clone()));

        // HTTP handlers
        let document_handler = Arc::new(DocumentHandler::new(
            ingest_document_use_case.clone(),
            list_documents_use_case.clone(),
        ));
        let conversation_handler =
            Arc::new(ConversationHandler::new(converse_use_case.clone()));
        let booking_handler = Arc::new(BookingHandler::new(
            create_booking_use_case.clone(),
            list_bookings_use_case.clone(),
        ));

        Ok(Self {
            document_repository,
            booking_repository,
            embedding_provider,
            completion_provider,
            vector_store,
            session_cache,
            file_storage,
            document_extractor,
            session_memory,
            retriever,
            ingest_document_use_case,
            converse_use_case,
            create_booking_use_case,
            list_documents_use_case,
            list_bookings_use_case,
            document_handler,
            conversation_handler,
            booking_handler,
        })
    }
}
