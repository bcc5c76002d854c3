use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::Attempt};

#[async_trait]
pub trait AttemptRepository: Send + Sync {
    async fn create(&self, attempt: Attempt) -> AppResult<Attempt>;
    async fn find_by_id_and_user(
        &self,
        id: &ObjectId,
        user_id: &ObjectId,
    ) -> AppResult<Option<Attempt>>;
    /// All attempts by the user, newest first.
    async fn find_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<Attempt>>;
    /// All attempts on the quiz, newest first.
    async fn find_by_quiz(&self, quiz_id: &ObjectId) -> AppResult<Vec<Attempt>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoAttemptRepository {
    collection: Collection<Attempt>,
}

impl MongoAttemptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("attempts");
        Self { collection }
    }
}

#[async_trait]
impl AttemptRepository for MongoAttemptRepository {
    async fn create(&self, attempt: Attempt) -> AppResult<Attempt> {
        let result = self.collection.insert_one(&attempt).await?;

        let mut created = attempt;
        created.id = result.inserted_id.as_object_id();
        Ok(created)
    }

    async fn find_by_id_and_user(
        &self,
        id: &ObjectId,
        user_id: &ObjectId,
    ) -> AppResult<Option<Attempt>> {
        let attempt = self
            .collection
            .find_one(doc! { "_id": *id, "user_id": *user_id })
            .await?;
        Ok(attempt)
    }

    async fn find_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<Attempt>> {
        let attempts = self
            .collection
            .find(doc! { "user_id": *user_id })
            .sort(doc! { "completed_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn find_by_quiz(&self, quiz_id: &ObjectId) -> AppResult<Vec<Attempt>> {
        let attempts = self
            .collection
            .find(doc! { "quiz_id": *quiz_id })
            .sort(doc! { "completed_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let user_index = IndexModel::builder().keys(doc! { "user_id": 1 }).build();
        self.collection.create_index(user_index).await?;
        log::info!("Created index on attempts.user_id");

        let quiz_index = IndexModel::builder().keys(doc! { "quiz_id": 1 }).build();
        self.collection.create_index(quiz_index).await?;
        log::info!("Created index on attempts.quiz_id");

        Ok(())
    }
}
