use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::MongoQuizRepository,
    services::{GenerationService, OpenAiBackend, QuizService, SourceExtractor},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db, &config));
        quiz_repository.ensure_indexes().await?;

        let extractor = SourceExtractor::new()?;
        let generation = GenerationService::new(Arc::new(OpenAiBackend::new(&config)));
        let quiz_service = Arc::new(QuizService::new(quiz_repository, extractor, generation));

        Ok(Self {
            quiz_service,
            config: Arc::new(config),
        })
    }
}
