pub mod extractor_service;
pub mod generation_service;
pub mod quiz_service;

pub use extractor_service::SourceExtractor;
pub use generation_service::{BackendError, GenerationBackend, GenerationService, OpenAiBackend};
pub use quiz_service::QuizService;
