use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quizgen_server::{
    errors::AppResult,
    models::domain::{GeneratedQuestion, GeneratedQuiz, Quiz},
    repositories::QuizRepository,
};

/// In-memory implementation of the repository contract, used to pin down
/// the behaviour the Mongo implementation must provide.
struct InMemoryQuizRepository {
    quizzes: Arc<RwLock<Vec<Quiz>>>,
}

impl InMemoryQuizRepository {
    fn new() -> Self {
        Self {
            quizzes: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.iter().find(|q| q.id == id).cloned())
    }

    async fn find_by_url(&self, url: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.iter().find(|q| q.url == url).cloned())
    }

    async fn list_quizzes(&self) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.clone())
    }

    async fn insert(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        quizzes.push(quiz.clone());
        Ok(quiz)
    }
}

fn make_quiz(url: &str) -> Quiz {
    let generated = GeneratedQuiz {
        summary: format!("Summary for {}", url),
        quiz: vec![GeneratedQuestion {
            question: "Q?".to_string(),
            options: vec!["A".to_string(), "B".to_string()],
            answer: "A".to_string(),
            difficulty: "Easy".to_string(),
            explanation: "Because.".to_string(),
        }],
        ..Default::default()
    };
    Quiz::from_parts(url, "Title", "Extracted text.", generated)
}

#[tokio::test]
async fn insert_then_find_by_id_round_trips() {
    let repo = InMemoryQuizRepository::new();
    let quiz = repo.insert(make_quiz("https://example.com/a")).await.unwrap();

    let found = repo.find_by_id(&quiz.id).await.unwrap();
    assert_eq!(found, Some(quiz));
}

#[tokio::test]
async fn find_by_id_misses_for_unknown_id() {
    let repo = InMemoryQuizRepository::new();
    repo.insert(make_quiz("https://example.com/a")).await.unwrap();

    let found = repo.find_by_id("no-such-id").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn find_by_url_matches_exact_locator_only() {
    let repo = InMemoryQuizRepository::new();
    repo.insert(make_quiz("https://example.com/a")).await.unwrap();

    let hit = repo.find_by_url("https://example.com/a").await.unwrap();
    assert!(hit.is_some());

    // A prefix or differently-cased locator is a different cache key.
    let miss = repo.find_by_url("https://example.com/a/").await.unwrap();
    assert!(miss.is_none());
    let miss = repo.find_by_url("https://EXAMPLE.com/a").await.unwrap();
    assert!(miss.is_none());
}

#[tokio::test]
async fn list_preserves_persistence_order() {
    let repo = InMemoryQuizRepository::new();
    let first = repo.insert(make_quiz("https://example.com/1")).await.unwrap();
    let second = repo.insert(make_quiz("https://example.com/2")).await.unwrap();
    let third = repo.insert(make_quiz("https://example.com/3")).await.unwrap();

    let listed = repo.list_quizzes().await.unwrap();
    let ids: Vec<_> = listed.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec![&first.id, &second.id, &third.id]);
}

#[tokio::test]
async fn duplicate_locators_are_allowed_and_first_wins_on_lookup() {
    // Caching is best-effort: nothing stops two records sharing a locator
    // (see DESIGN.md on the cache race), and lookup returns the first in
    // persistence order.
    let repo = InMemoryQuizRepository::new();
    let first = repo.insert(make_quiz("https://example.com/dup")).await.unwrap();
    let _second = repo.insert(make_quiz("https://example.com/dup")).await.unwrap();

    let found = repo.find_by_url("https://example.com/dup").await.unwrap();
    assert_eq!(found.map(|q| q.id), Some(first.id));
    assert_eq!(repo.list_quizzes().await.unwrap().len(), 2);
}
