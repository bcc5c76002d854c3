use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;

/// Fixed bcrypt cost for credential hashing.
pub const HASH_COST: u32 = 10;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    /// Digest of the single currently-valid refresh token. At most one
    /// refresh token per account is honored: a new login or refresh
    /// overwrites this field, a logout clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Email and username are stored lowercased so uniqueness and lookups
    /// are case-insensitive.
    pub fn new(full_name: &str, email: &str, username: &str, password_hash: &str) -> Self {
        User {
            id: None,
            full_name: full_name.to_string(),
            email: email.to_lowercase(),
            username: username.to_lowercase(),
            password_hash: password_hash.to_string(),
            refresh_token_hash: None,
            created_at: Some(Utc::now()),
        }
    }

    pub fn verify_password(&self, password: &str) -> AppResult<bool> {
        Ok(bcrypt::verify(password, &self.password_hash)?)
    }

    pub fn id_hex(&self) -> Option<String> {
        self.id.as_ref().map(|oid| oid.to_hex())
    }
}

pub fn hash_password(password: &str) -> AppResult<String> {
    Ok(bcrypt::hash(password, HASH_COST)?)
}

/// Refresh tokens are stored as a SHA-256 digest, never the signed token
/// itself. Rotation/reuse detection compares digests for exact equality.
pub fn hash_refresh_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_normalizes_email_and_username() {
        let user = User::new("Jane Doe", "Jane@X.Com", "JaneD", "hash");

        assert_eq!(user.email, "jane@x.com");
        assert_eq!(user.username, "janed");
        assert_eq!(user.full_name, "Jane Doe");
        assert!(user.created_at.is_some());
        assert!(user.refresh_token_hash.is_none());
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("secret123").unwrap();
        assert_ne!(hash, "secret123");

        let user = User::new("Jane Doe", "jane@x.com", "janed", &hash);
        assert!(user.verify_password("secret123").unwrap());
        assert!(!user.verify_password("wrongpass").unwrap());
    }

    #[test]
    fn test_hash_refresh_token_consistency() {
        let token = "my-refresh-token";
        let digest1 = hash_refresh_token(token);
        let digest2 = hash_refresh_token(token);

        assert_eq!(digest1, digest2);
        assert_eq!(digest1.len(), 64); // SHA-256 produces 64 hex chars
    }

    #[test]
    fn test_hash_refresh_token_different_inputs() {
        assert_ne!(hash_refresh_token("token1"), hash_refresh_token("token2"));
    }

    #[test]
    fn test_user_serialization_skips_absent_fields() {
        let user = User::new("Jane Doe", "jane@x.com", "janed", "hash");
        let json = serde_json::to_string(&user).unwrap();

        assert!(!json.contains("_id"));
        assert!(!json.contains("refresh_token_hash"));
    }
}
