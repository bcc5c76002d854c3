use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::{
    auth::{CurrentUser, JwtService},
    errors::{AppError, AppResult},
    models::{
        domain::user::{hash_password, hash_refresh_token, User},
        dto::{
            request::{ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateAccountRequest},
            response::{LoginData, TokenPairData, UserDto},
        },
    },
    repositories::UserRepository,
};

/// Account manager: registration, credential verification, token
/// issuance/rotation, and profile mutation.
///
/// Refresh-token contract: an account holds at most one valid refresh
/// token. Every login or refresh overwrites the stored digest, which
/// invalidates whatever token was outstanding before; logout clears it.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    jwt_service: JwtService,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, jwt_service: JwtService) -> Self {
        Self {
            repository,
            jwt_service,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<UserDto> {
        let fields = [
            &request.full_name,
            &request.email,
            &request.username,
            &request.password,
        ];
        if fields.iter().any(|field| field.trim().is_empty()) {
            return Err(AppError::BadRequest("All fields are required".to_string()));
        }

        request.validate()?;

        if self
            .repository
            .exists_with_email_or_username(&request.email, &request.username)
            .await?
        {
            return Err(AppError::Conflict(
                "User with this email or username already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(
            &request.full_name,
            &request.email,
            &request.username,
            &password_hash,
        );

        let created = self.repository.create(user).await?;
        Ok(UserDto::from(created))
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginData> {
        let identifier = request
            .email
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .or_else(|| {
                request
                    .username
                    .as_deref()
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
            })
            .ok_or_else(|| AppError::BadRequest("Email or username is required".to_string()))?;

        let user = self
            .repository
            .find_by_identifier(identifier)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !user.verify_password(&request.password)? {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let (access_token, refresh_token) = self.issue_tokens(&user).await?;

        Ok(LoginData {
            user: UserDto::from(user),
            access_token,
            refresh_token,
        })
    }

    /// Clearing an already-absent refresh token is success, not an error.
    pub async fn logout(&self, user_id: &ObjectId) -> AppResult<()> {
        self.repository.set_refresh_token(user_id, None).await
    }

    pub async fn refresh(&self, incoming_token: &str) -> AppResult<TokenPairData> {
        let claims = self.jwt_service.validate_refresh_token(incoming_token)?;

        let user_id = ObjectId::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid refresh token".to_string()))?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid refresh token".to_string()))?;

        // Rotation/reuse detection: a cryptographically valid token that has
        // been superseded by a newer login or refresh no longer matches the
        // stored digest and is rejected.
        let incoming_digest = hash_refresh_token(incoming_token);
        if user.refresh_token_hash.as_deref() != Some(incoming_digest.as_str()) {
            return Err(AppError::Unauthorized(
                "Refresh token is expired or used".to_string(),
            ));
        }

        let (access_token, refresh_token) = self.issue_tokens(&user).await?;

        Ok(TokenPairData {
            access_token,
            refresh_token,
        })
    }

    pub async fn change_password(
        &self,
        user_id: &ObjectId,
        request: ChangePasswordRequest,
    ) -> AppResult<()> {
        if request.new_password.trim().is_empty() {
            return Err(AppError::BadRequest("New password is required".to_string()));
        }

        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !user.verify_password(&request.old_password)? {
            return Err(AppError::BadRequest("Old password is incorrect".to_string()));
        }

        let password_hash = hash_password(&request.new_password)?;
        self.repository
            .set_password_hash(user_id, &password_hash)
            .await
    }

    pub async fn update_account(
        &self,
        user_id: &ObjectId,
        request: UpdateAccountRequest,
    ) -> AppResult<UserDto> {
        let full_name = request
            .full_name
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ToString::to_string);
        let email = request
            .email
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ToString::to_string);

        if full_name.is_none() && email.is_none() {
            return Err(AppError::BadRequest("All fields are required".to_string()));
        }

        let updated = self
            .repository
            .update_profile(user_id, full_name, email)
            .await?;

        Ok(UserDto::from(updated))
    }

    /// Gate step: resolve the verified token subject to a live account.
    /// Fails Unauthorized when the account no longer exists.
    pub async fn resolve_gate_identity(&self, subject: &str) -> AppResult<CurrentUser> {
        let user_id = ObjectId::parse_str(subject)
            .map_err(|_| AppError::Unauthorized("Invalid access token".to_string()))?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Account no longer exists".to_string()))?;

        Ok(CurrentUser {
            id: user_id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
        })
    }

    /// Issues a fresh access/refresh pair and persists the refresh digest,
    /// overwriting any previously stored value.
    async fn issue_tokens(&self, user: &User) -> AppResult<(String, String)> {
        let user_id = user
            .id
            .ok_or_else(|| AppError::InternalError("User record has no id".to_string()))?;

        let access_token = self.jwt_service.create_access_token(user)?;
        let refresh_token = self.jwt_service.create_refresh_token(&user_id)?;

        self.repository
            .set_refresh_token(&user_id, Some(hash_refresh_token(&refresh_token)))
            .await?;

        Ok((access_token, refresh_token))
    }
}
