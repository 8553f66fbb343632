use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{config::Config, db::Database, errors::AppResult, models::domain::Quiz};

#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    /// Cache lookup by exact locator string. Returns the first match in
    /// persistence order.
    async fn find_by_url(&self, url: &str) -> AppResult<Option<Quiz>>;
    async fn list_quizzes(&self) -> AppResult<Vec<Quiz>>;
    async fn insert(&self, quiz: Quiz) -> AppResult<Quiz>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database, config: &Config) -> Self {
        let collection = db.get_collection(&config.quizzes_collection);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(id_index).await?;

        // Non-unique by choice: caching is best-effort and two concurrent
        // generations of the same locator may both insert (DESIGN.md).
        let url_index = IndexModel::builder()
            .keys(doc! { "url": 1 })
            .options(
                IndexOptions::builder()
                    .name("url_lookup".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(url_index).await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn find_by_url(&self, url: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "url": url }).await?;
        Ok(quiz)
    }

    async fn list_quizzes(&self) -> AppResult<Vec<Quiz>> {
        use futures::TryStreamExt;

        let cursor = self.collection.find(doc! {}).await?;
        let items: Vec<Quiz> = cursor.try_collect().await?;

        Ok(items)
    }

    async fn insert(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }
}
