use std::sync::Arc;

use actix_web::{delete, get, patch, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{CreateQuizRequest, SubmitAttemptRequest, UpdateQuizRequest},
        response::ApiResponse,
    },
};

#[post("/create")]
async fn create_quiz(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
    request: web::Json<CreateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let data = state
        .quiz_service
        .create_quiz(&auth.0, request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::new(data, "Quiz created successfully")))
}

#[get("/my-quizzes")]
async fn my_quizzes(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.my_quizzes(&auth.0).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(quizzes, "Quizzes fetched successfully")))
}

#[get("/user/attempts")]
async fn my_attempts(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let attempts = state.attempt_service.quiz_history(&auth.0).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(attempts, "Attempts fetched successfully")))
}

#[get("/{quiz_id}")]
async fn get_quiz(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
    quiz_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&auth.0, &quiz_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(quiz, "Quiz fetched successfully")))
}

#[patch("/{quiz_id}/update")]
async fn update_quiz(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
    quiz_id: web::Path<String>,
    request: web::Json<UpdateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .update_quiz(&auth.0, &quiz_id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(quiz, "Quiz updated successfully")))
}

#[delete("/{quiz_id}/delete")]
async fn delete_quiz(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
    quiz_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.quiz_service.delete_quiz(&auth.0, &quiz_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(
        serde_json::json!({}),
        "Quiz deleted successfully",
    )))
}

#[get("/{quiz_id}/leaderboard")]
async fn leaderboard(
    state: web::Data<Arc<AppState>>,
    _auth: AuthenticatedUser,
    quiz_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let entries = state.quiz_service.leaderboard(&quiz_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(
        entries,
        "Leaderboard fetched successfully",
    )))
}

#[post("/{quiz_id}/attempt")]
async fn attempt_quiz(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
    quiz_id: web::Path<String>,
    request: web::Json<SubmitAttemptRequest>,
) -> Result<HttpResponse, AppError> {
    let summary = state
        .attempt_service
        .submit_attempt(&auth.0, &quiz_id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(summary, "Quiz attempted successfully")))
}

#[get("/attempt/{attempt_id}/results")]
async fn attempt_results(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
    attempt_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let results = state
        .attempt_service
        .attempt_results(&auth.0, &attempt_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(
        results,
        "Quiz results fetched successfully",
    )))
}
