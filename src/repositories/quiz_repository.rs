use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Collection,
};

use crate::{db::Database, errors::AppResult, models::domain::Quiz};

#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Quiz>>;
    /// Quizzes created by the given user, newest first.
    async fn find_by_creator(&self, user_id: &ObjectId) -> AppResult<Vec<Quiz>>;
    /// Applies `$set` fields to a quiz only when `owner` created it.
    /// Returns `None` when no quiz matched (missing or not owned).
    async fn update_owned(
        &self,
        id: &ObjectId,
        owner: &ObjectId,
        set_doc: Document,
    ) -> AppResult<Option<Quiz>>;
    /// Deletes only when `owner` created the quiz; returns whether a
    /// document was removed.
    async fn delete_owned(&self, id: &ObjectId, owner: &ObjectId) -> AppResult<bool>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quizzes");
        Self { collection }
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        let result = self.collection.insert_one(&quiz).await?;

        let mut created = quiz;
        created.id = result.inserted_id.as_object_id();
        Ok(created)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "_id": *id }).await?;
        Ok(quiz)
    }

    async fn find_by_creator(&self, user_id: &ObjectId) -> AppResult<Vec<Quiz>> {
        let quizzes = self
            .collection
            .find(doc! { "created_by": *user_id })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(quizzes)
    }

    async fn update_owned(
        &self,
        id: &ObjectId,
        owner: &ObjectId,
        set_doc: Document,
    ) -> AppResult<Option<Quiz>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection
            .find_one_and_update(
                doc! { "_id": *id, "created_by": *owner },
                doc! { "$set": set_doc },
            )
            .with_options(options)
            .await?;

        Ok(updated)
    }

    async fn delete_owned(&self, id: &ObjectId, owner: &ObjectId) -> AppResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": *id, "created_by": *owner })
            .await?;

        Ok(result.deleted_count > 0)
    }
}
