use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::oid::ObjectId;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::claims::{AccessClaims, RefreshClaims},
    errors::{AppError, AppResult},
    models::domain::User,
};

/// Stateless token signer/verifier. Access and refresh tokens are signed
/// with distinct secrets, so neither kind verifies as the other.
#[derive(Clone)]
pub struct JwtService {
    access_encoding_key: EncodingKey,
    access_decoding_key: DecodingKey,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    validation: Validation,
    access_expiry_minutes: i64,
    refresh_expiry_days: i64,
}

impl JwtService {
    pub fn new(
        access_secret: &SecretString,
        refresh_secret: &SecretString,
        access_expiry_minutes: i64,
        refresh_expiry_days: i64,
    ) -> Self {
        let access_bytes = access_secret.expose_secret().as_bytes();
        let refresh_bytes = refresh_secret.expose_secret().as_bytes();

        Self {
            access_encoding_key: EncodingKey::from_secret(access_bytes),
            access_decoding_key: DecodingKey::from_secret(access_bytes),
            refresh_encoding_key: EncodingKey::from_secret(refresh_bytes),
            refresh_decoding_key: DecodingKey::from_secret(refresh_bytes),
            validation: Validation::default(),
            access_expiry_minutes,
            refresh_expiry_days,
        }
    }

    pub fn create_access_token(&self, user: &User) -> AppResult<String> {
        let claims = AccessClaims::new(user, self.access_expiry_minutes);

        encode(&Header::default(), &claims, &self.access_encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to create access token: {}", e)))
    }

    pub fn create_refresh_token(&self, account_id: &ObjectId) -> AppResult<String> {
        let claims = RefreshClaims::new(&account_id.to_hex(), self.refresh_expiry_days);

        encode(&Header::default(), &claims, &self.refresh_encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to create refresh token: {}", e)))
    }

    pub fn validate_access_token(&self, token: &str) -> AppResult<AccessClaims> {
        decode::<AccessClaims>(token, &self.access_decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid access token: {}", e)))
    }

    /// The underlying failure reason (expired vs malformed vs bad signature)
    /// is surfaced in the message so clients can distinguish a stale session
    /// from a broken one.
    pub fn validate_refresh_token(&self, token: &str) -> AppResult<RefreshClaims> {
        let token_data = decode::<RefreshClaims>(token, &self.refresh_decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Refresh token has expired".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::Unauthorized("Invalid refresh token format".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::Unauthorized("Refresh token signature is invalid".to_string())
                }
                _ => AppError::Unauthorized(format!("Refresh token validation failed: {}", e)),
            })?;

        Ok(token_data.claims)
    }

    pub fn refresh_expiry_days(&self) -> i64 {
        self.refresh_expiry_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn jwt_service() -> JwtService {
        let config = Config::test_config();
        JwtService::new(
            &config.access_token_secret,
            &config.refresh_token_secret,
            config.access_token_expiry_minutes,
            config.refresh_token_expiry_days,
        )
    }

    fn test_user() -> User {
        let mut user = User::new("Jane Doe", "jane@x.com", "janed", "hash");
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_access_token_create_and_validate() {
        let service = jwt_service();
        let user = test_user();

        let token = service.create_access_token(&user).unwrap();
        assert!(!token.is_empty());

        let claims = service.validate_access_token(&token).unwrap();
        assert_eq!(claims.sub, user.id_hex().unwrap());
        assert_eq!(claims.username, "janed");
        assert_eq!(claims.email, "jane@x.com");
    }

    #[test]
    fn test_access_token_invalid() {
        let service = jwt_service();

        let result = service.validate_access_token("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_refresh_token_create_and_validate() {
        let service = jwt_service();
        let account_id = ObjectId::new();

        let token = service.create_refresh_token(&account_id).unwrap();
        assert!(!token.is_empty());

        let claims = service.validate_refresh_token(&token).unwrap();
        assert_eq!(claims.sub, account_id.to_hex());
    }

    #[test]
    fn test_refresh_token_invalid() {
        let service = jwt_service();

        let result = service.validate_refresh_token("invalid.token.here");
        match result {
            Err(AppError::Unauthorized(msg)) => {
                assert!(msg.contains("refresh token") || msg.contains("Refresh token"));
            }
            _ => panic!("Expected Unauthorized error"),
        }
    }

    #[test]
    fn test_tokens_are_not_interchangeable() {
        let service = jwt_service();
        let user = test_user();

        // An access token must not verify as a refresh token and vice versa:
        // the secrets differ, so the signature check fails.
        let access = service.create_access_token(&user).unwrap();
        assert!(service.validate_refresh_token(&access).is_err());

        let refresh = service.create_refresh_token(&user.id.unwrap()).unwrap();
        assert!(service.validate_access_token(&refresh).is_err());
    }
}
