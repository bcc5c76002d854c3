use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::User,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>>;
    /// Matches on email or username; the identifier is lowercased before
    /// comparison since documents store both fields lowercased.
    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<User>>;
    async fn exists_with_email_or_username(&self, email: &str, username: &str) -> AppResult<bool>;
    /// Overwrites the account's single refresh-state slot. `Some` replaces
    /// any prior value (invalidating the token it represented), `None`
    /// clears it. This overwrite IS the single-session-per-account policy.
    async fn set_refresh_token(&self, id: &ObjectId, digest: Option<String>) -> AppResult<()>;
    /// The only path that touches the credential field; profile updates
    /// cannot reach it.
    async fn set_password_hash(&self, id: &ObjectId, password_hash: &str) -> AppResult<()>;
    async fn update_profile(
        &self,
        id: &ObjectId,
        full_name: Option<String>,
        email: Option<String>,
    ) -> AppResult<User>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("users");
        Self { collection }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let result = self.collection.insert_one(&user).await?;

        let mut created = user;
        created.id = result.inserted_id.as_object_id();
        Ok(created)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "_id": *id }).await?;
        Ok(user)
    }

    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<User>> {
        let identifier = identifier.to_lowercase();
        let user = self
            .collection
            .find_one(doc! {
                "$or": [
                    { "email": &identifier },
                    { "username": &identifier }
                ]
            })
            .await?;
        Ok(user)
    }

    async fn exists_with_email_or_username(&self, email: &str, username: &str) -> AppResult<bool> {
        let existing = self
            .collection
            .find_one(doc! {
                "$or": [
                    { "email": email.to_lowercase() },
                    { "username": username.to_lowercase() }
                ]
            })
            .await?;
        Ok(existing.is_some())
    }

    async fn set_refresh_token(&self, id: &ObjectId, digest: Option<String>) -> AppResult<()> {
        let update = match digest {
            Some(value) => doc! { "$set": { "refresh_token_hash": value } },
            None => doc! { "$unset": { "refresh_token_hash": "" } },
        };

        // Clearing an already-absent field still matches the document, so
        // logout stays idempotent.
        self.collection.update_one(doc! { "_id": *id }, update).await?;
        Ok(())
    }

    async fn set_password_hash(&self, id: &ObjectId, password_hash: &str) -> AppResult<()> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": *id },
                doc! { "$set": { "password_hash": password_hash } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(())
    }

    async fn update_profile(
        &self,
        id: &ObjectId,
        full_name: Option<String>,
        email: Option<String>,
    ) -> AppResult<User> {
        let mut set_doc = Document::new();
        if let Some(full_name) = full_name {
            set_doc.insert("full_name", full_name);
        }
        if let Some(email) = email {
            set_doc.insert("email", email.to_lowercase());
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": set_doc })
            .with_options(options)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(updated)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let username_options = IndexOptions::builder().unique(true).build();
        let username_model = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(username_options)
            .build();
        self.collection.create_index(username_model).await?;
        log::info!("Created unique index on users.username");

        let email_options = IndexOptions::builder().unique(true).build();
        let email_model = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(email_options)
            .build();
        self.collection.create_index(email_model).await?;
        log::info!("Created unique index on users.email");

        Ok(())
    }
}
