use std::sync::Arc;

use actix_web::{cookie::Cookie, get, patch, post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{
        middleware::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE},
        AuthenticatedUser,
    },
    errors::AppError,
    models::dto::{
        request::{
            ChangePasswordRequest, LoginRequest, RefreshTokenRequest, RegisterRequest,
            UpdateAccountRequest,
        },
        response::{ApiResponse, UserDto},
    },
};

fn token_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .secure(true)
        .finish()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build(name, "")
        .path("/")
        .http_only(true)
        .secure(true)
        .finish();
    cookie.make_removal();
    cookie
}

#[post("/register")]
async fn register(
    state: web::Data<Arc<AppState>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.register(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::new(user, "User registered successfully")))
}

#[post("/login")]
async fn login(
    state: web::Data<Arc<AppState>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let data = state.user_service.login(request.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .cookie(token_cookie(ACCESS_TOKEN_COOKIE, data.access_token.clone()))
        .cookie(token_cookie(REFRESH_TOKEN_COOKIE, data.refresh_token.clone()))
        .json(ApiResponse::new(data, "User logged in successfully")))
}

#[post("/logout")]
async fn logout(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.user_service.logout(&auth.0.id).await?;

    Ok(HttpResponse::Ok()
        .cookie(removal_cookie(ACCESS_TOKEN_COOKIE))
        .cookie(removal_cookie(REFRESH_TOKEN_COOKIE))
        .json(ApiResponse::new(serde_json::json!({}), "User logged out")))
}

/// The incoming refresh token is read from the `refreshToken` cookie or,
/// failing that, the request body.
#[post("/refresh-token")]
async fn refresh_token(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, AppError> {
    let incoming = req
        .cookie(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .or_else(|| body.and_then(|b| b.into_inner().refresh_token))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Unauthorized request".to_string()))?;

    let pair = state.user_service.refresh(&incoming).await?;

    Ok(HttpResponse::Ok()
        .cookie(token_cookie(ACCESS_TOKEN_COOKIE, pair.access_token.clone()))
        .cookie(token_cookie(REFRESH_TOKEN_COOKIE, pair.refresh_token.clone()))
        .json(ApiResponse::new(pair, "Access token refreshed")))
}

/// Returns the gate-attached identity; no extra lookup.
#[get("/current-user")]
async fn current_user(auth: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(ApiResponse::new(
        UserDto::from(auth.0),
        "Current user data fetched",
    )))
}

#[patch("/update-account")]
async fn update_account(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
    request: web::Json<UpdateAccountRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state
        .user_service
        .update_account(&auth.0.id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(
        user,
        "Account details updated successfully",
    )))
}

#[post("/change-password")]
async fn change_password(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
    request: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    state
        .user_service
        .change_password(&auth.0.id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(
        serde_json::json!({}),
        "Password changed successfully",
    )))
}

#[get("/quiz-history")]
async fn quiz_history(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let attempts = state.attempt_service.quiz_history(&auth.0).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(
        attempts,
        "Quiz history fetched successfully",
    )))
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/ready")]
async fn health_check_ready(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let db_health = state.db.health_check().await;

    let status = if db_health.is_ok() {
        "ready"
    } else {
        "not_ready"
    };

    let response = serde_json::json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "mongodb": if db_health.is_ok() { "ok" } else { "error" }
        }
    });

    if db_health.is_ok() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
