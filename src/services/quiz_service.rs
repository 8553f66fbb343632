use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::Quiz,
        dto::{request::QuizSource, GenerateQuizRequest, QuizResponse},
    },
    repositories::QuizRepository,
    services::{extractor_service::SourceExtractor, generation_service::GenerationService},
};

/// Runs the pipeline: validate the source, check the locator cache,
/// extract, generate, persist one quiz document, and map it to the
/// response shape.
pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    extractor: SourceExtractor,
    generation: GenerationService,
}

impl QuizService {
    pub fn new(
        repository: Arc<dyn QuizRepository>,
        extractor: SourceExtractor,
        generation: GenerationService,
    ) -> Self {
        Self {
            repository,
            extractor,
            generation,
        }
    }

    pub async fn generate(&self, request: GenerateQuizRequest) -> AppResult<QuizResponse> {
        let locator = request.locator();
        let source = request.into_source()?;

        // Cache lookup applies to url sources only; a hit skips extraction
        // and generation entirely.
        if let QuizSource::Url(url) = &source {
            log::info!("Received generation request for URL: {}", url);
            if let Some(existing) = self.repository.find_by_url(url).await? {
                log::info!("Quiz found in cache. Returning existing quiz.");
                return Ok(QuizResponse::from(existing));
            }
        }

        let extracted = self.extractor.extract(&source).await?;
        log::info!(
            "Extraction complete: title={:?}, {} chars",
            extracted.title,
            extracted.content.len()
        );

        let generated = self.generation.generate_quiz(&extracted.content).await?;

        let quiz = Quiz::from_parts(&locator, &extracted.title, &extracted.content, generated);
        let quiz = self.repository.insert(quiz).await?;
        log::info!("Persisted quiz {} with {} questions", quiz.id, quiz.questions.len());

        Ok(QuizResponse::from(quiz))
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<QuizResponse> {
        let quiz = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))?;

        Ok(QuizResponse::from(quiz))
    }

    pub async fn list_quizzes(&self) -> AppResult<Vec<QuizResponse>> {
        let quizzes = self.repository.list_quizzes().await?;
        Ok(quizzes.into_iter().map(QuizResponse::from).collect())
    }
}
