use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizhive_server::{
    app_state::AppState,
    auth::AuthMiddleware,
    config::Config,
    handlers::{quiz_handler, user_handler},
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let state = Arc::new(
        AppState::new(config.clone())
            .await
            .expect("failed to initialize application state"),
    );

    let bind_addr = (config.web_server_host.clone(), config.web_server_port);
    log::info!(
        "starting HTTP server on {}:{}",
        bind_addr.0,
        bind_addr.1
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&state.config.cors_origin)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .wrap(cors)
            .service(user_handler::health_check)
            .service(user_handler::health_check_ready)
            .service(
                web::scope("/api/v1/users")
                    .service(user_handler::register)
                    .service(user_handler::login)
                    .service(user_handler::refresh_token)
                    .service(
                        web::scope("")
                            .wrap(AuthMiddleware)
                            .service(user_handler::logout)
                            .service(user_handler::current_user)
                            .service(user_handler::update_account)
                            .service(user_handler::change_password)
                            .service(user_handler::quiz_history),
                    ),
            )
            .service(
                web::scope("/api/v1/quizzes")
                    .wrap(AuthMiddleware)
                    .service(quiz_handler::create_quiz)
                    .service(quiz_handler::my_quizzes)
                    .service(quiz_handler::my_attempts)
                    .service(quiz_handler::attempt_results)
                    .service(quiz_handler::get_quiz)
                    .service(quiz_handler::update_quiz)
                    .service(quiz_handler::delete_quiz)
                    .service(quiz_handler::leaderboard)
                    .service(quiz_handler::attempt_quiz),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
