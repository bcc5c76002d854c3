use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String, // Subject (account id)
    pub username: String,
    pub email: String,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl AccessClaims {
    pub fn new(user: &User, expiry_minutes: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::minutes(expiry_minutes);

        // Use MongoDB ObjectId hex string as subject when available, fallback to username
        let subject = user.id_hex().unwrap_or_else(|| user.username.clone());

        Self {
            sub: subject,
            username: user.username.clone(),
            email: user.email.clone(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

/// Refresh claims carry the account id plus a unique token id. The `jti`
/// guarantees two tokens minted in the same second still differ, so
/// rotation always supersedes the previous token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String, // account id
    pub jti: String, // unique token id
    pub exp: usize,  // Expiration time
    pub iat: usize,  // Issued at time
}

impl RefreshClaims {
    pub fn new(account_id: &str, expiry_days: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::days(expiry_days);

        Self {
            sub: account_id.to_string(),
            jti: uuid::Uuid::new_v4().to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_access_claims_creation() {
        let mut user = User::new("Jane Doe", "jane@x.com", "janed", "hash");
        let claims = AccessClaims::new(&user, 15);

        // Without an ObjectId the subject falls back to username
        assert_eq!(claims.sub, "janed");
        assert_eq!(claims.username, "janed");
        assert_eq!(claims.email, "jane@x.com");
        assert!(claims.exp > claims.iat);

        let oid = ObjectId::new();
        user.id = Some(oid);
        let claims = AccessClaims::new(&user, 15);
        assert_eq!(claims.sub, oid.to_hex());
    }

    #[test]
    fn test_refresh_claims_creation() {
        let refresh_claims = RefreshClaims::new("656a2c1f9d3e4b0012345678", 7);

        assert_eq!(refresh_claims.sub, "656a2c1f9d3e4b0012345678");
        assert!(refresh_claims.exp > refresh_claims.iat);
    }

    #[test]
    fn test_refresh_claims_are_unique_per_issue() {
        let first = RefreshClaims::new("656a2c1f9d3e4b0012345678", 7);
        let second = RefreshClaims::new("656a2c1f9d3e4b0012345678", 7);

        assert_ne!(first.jti, second.jti);
    }
}
