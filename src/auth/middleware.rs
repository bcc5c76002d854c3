use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;
use mongodb::bson::oid::ObjectId;

use crate::{app_state::AppState, errors::AppError};

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Identity resolved by the gate and attached to the request context.
/// Carries no credential or refresh-state fields.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: ObjectId,
    pub username: String,
    pub email: String,
    pub full_name: String,
}

/// Authentication gate for protected routes: extracts the access token
/// from the `accessToken` cookie or `Authorization: Bearer` header,
/// verifies it, confirms the account still exists, and attaches the
/// resolved identity to the request. Rejects with 401 otherwise. Never
/// mutates persisted state.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let state = req
                .app_data::<web::Data<Arc<AppState>>>()
                .cloned()
                .ok_or_else(|| {
                    Error::from(AppError::InternalError(
                        "Application state not configured".to_string(),
                    ))
                })?;

            // Cookie takes priority; the Authorization header is the fallback
            let token = req
                .cookie(ACCESS_TOKEN_COOKIE)
                .map(|c| c.value().to_string())
                .or_else(|| {
                    req.headers()
                        .get(AUTHORIZATION)
                        .and_then(|h| h.to_str().ok())
                        .and_then(|h| h.strip_prefix("Bearer "))
                        .map(|t| t.to_string())
                })
                .ok_or_else(|| {
                    Error::from(AppError::Unauthorized("Missing access token".to_string()))
                })?;

            let claims = state
                .jwt_service
                .validate_access_token(&token)
                .map_err(Error::from)?;

            // The account may have been deleted since the token was issued
            let current_user = state
                .user_service
                .resolve_gate_identity(&claims.sub)
                .await
                .map_err(Error::from)?;

            req.extensions_mut().insert(current_user);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

// Extractor for the gate-attached identity in handlers
pub struct AuthenticatedUser(pub CurrentUser);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let current_user = req
            .extensions()
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()));

        ready(current_user.map(AuthenticatedUser))
    }
}
