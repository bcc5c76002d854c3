use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        AttemptRepository, MongoAttemptRepository, MongoQuizRepository, MongoUserRepository,
        UserRepository,
    },
    services::{AttemptService, QuizService, UserService},
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub quiz_service: Arc<QuizService>,
    pub attempt_service: Arc<AttemptService>,
    pub jwt_service: JwtService,
    pub config: Arc<Config>,
    pub db: Database,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let jwt_service = JwtService::new(
            &config.access_token_secret,
            &config.refresh_token_secret,
            config.access_token_expiry_minutes,
            config.refresh_token_expiry_days,
        );

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));

        let attempt_repository = Arc::new(MongoAttemptRepository::new(&db));
        attempt_repository.ensure_indexes().await?;

        let user_service = Arc::new(UserService::new(
            user_repository.clone(),
            jwt_service.clone(),
        ));
        let quiz_service = Arc::new(QuizService::new(
            quiz_repository.clone(),
            attempt_repository.clone(),
            user_repository,
            &config.public_base_url,
        ));
        let attempt_service = Arc::new(AttemptService::new(quiz_repository, attempt_repository));

        Ok(Self {
            user_service,
            quiz_service,
            attempt_service,
            jwt_service,
            config: Arc::new(config),
            db,
        })
    }
}
