use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::models::domain::{Attempt, Question, Quiz, User};

/// Uniform success envelope mirroring the error envelope in `errors.rs`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, message: &str) -> Self {
        ApiResponse {
            success: true,
            data,
            message: message.to_string(),
        }
    }
}

/// Account projection: never carries the credential hash or refresh state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id_hex().unwrap_or_default(),
            full_name: user.full_name,
            email: user.email,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

impl From<CurrentUser> for UserDto {
    fn from(user: CurrentUser) -> Self {
        UserDto {
            id: user.id.to_hex(),
            full_name: user.full_name,
            email: user.email,
            username: user.username,
            created_at: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub user: UserDto,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairData {
    pub access_token: String,
    pub refresh_token: String,
}

/// Creator-facing question view, correct answer included.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub id: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer_index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl From<&Question> for QuestionDto {
    fn from(question: &Question) -> Self {
        QuestionDto {
            id: question.id.to_hex(),
            question_text: question.question_text.clone(),
            options: question.options.clone(),
            correct_answer_index: question.correct_answer_index,
            explanation: question.explanation.clone(),
        }
    }
}

/// Taker-facing question view: the correct index and explanation stay
/// server-side until results are requested.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionTakerDto {
    pub id: String,
    pub question_text: String,
    pub options: Vec<String>,
}

impl From<&Question> for QuestionTakerDto {
    fn from(question: &Question) -> Self {
        QuestionTakerDto {
            id: question.id.to_hex(),
            question_text: question.question_text.clone(),
            options: question.options.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDto {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<QuestionDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<i64>,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&Quiz> for QuizDto {
    fn from(quiz: &Quiz) -> Self {
        QuizDto {
            id: quiz.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            questions: quiz.questions.iter().map(QuestionDto::from).collect(),
            time_limit: quiz.time_limit,
            created_by: quiz.created_by.to_hex(),
            created_at: quiz.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizTakerDto {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<QuestionTakerDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<i64>,
}

impl From<&Quiz> for QuizTakerDto {
    fn from(quiz: &Quiz) -> Self {
        QuizTakerDto {
            id: quiz.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            questions: quiz.questions.iter().map(QuestionTakerDto::from).collect(),
            time_limit: quiz.time_limit,
        }
    }
}

/// A quiz rendered for its creator (answers included) or for a taker
/// (answers withheld). Serializes as the inner shape either way.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum QuizView {
    Creator(QuizDto),
    Taker(QuizTakerDto),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedQuizData {
    pub quiz: QuizDto,
    pub shareable_link: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptSummaryData {
    pub attempt_id: String,
    pub score: i64,
    pub total_questions: usize,
    pub correct_answers: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptDto {
    pub id: String,
    pub quiz_id: String,
    pub score: i64,
    pub completed_at: DateTime<Utc>,
}

impl From<&Attempt> for AttemptDto {
    fn from(attempt: &Attempt) -> Self {
        AttemptDto {
            id: attempt.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            quiz_id: attempt.quiz_id.to_hex(),
            score: attempt.score,
            completed_at: attempt.completed_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResultDto {
    pub question_id: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer_index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub user_selected_option: Option<u32>,
    pub is_correct: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResultsData {
    pub quiz_title: String,
    pub score: i64,
    pub total_questions: usize,
    pub results: Vec<QuestionResultDto>,
    pub attempted_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryDto {
    pub username: String,
    pub score: i64,
    pub completed_at: DateTime<Utc>,
}
