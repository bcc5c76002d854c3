use std::collections::HashSet;
use std::sync::Arc;

use mongodb::bson::{to_bson, Document};
use validator::Validate;

use crate::{
    auth::CurrentUser,
    errors::{AppError, AppResult},
    models::{
        domain::{Question, Quiz},
        dto::{
            request::{CreateQuizRequest, QuestionInput, UpdateQuizRequest},
            response::{CreatedQuizData, LeaderboardEntryDto, QuizDto, QuizView},
        },
    },
    repositories::{AttemptRepository, QuizRepository, UserRepository},
    services::parse_object_id,
};

pub struct QuizService {
    quiz_repository: Arc<dyn QuizRepository>,
    attempt_repository: Arc<dyn AttemptRepository>,
    user_repository: Arc<dyn UserRepository>,
    public_base_url: String,
}

impl QuizService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        attempt_repository: Arc<dyn AttemptRepository>,
        user_repository: Arc<dyn UserRepository>,
        public_base_url: &str,
    ) -> Self {
        Self {
            quiz_repository,
            attempt_repository,
            user_repository,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn create_quiz(
        &self,
        user: &CurrentUser,
        request: CreateQuizRequest,
    ) -> AppResult<CreatedQuizData> {
        if request.title.trim().is_empty() || request.questions.is_empty() {
            return Err(AppError::BadRequest(
                "Title and at least one question are required".to_string(),
            ));
        }

        request.validate()?;
        validate_question_bounds(&request.questions)?;

        let questions = request
            .questions
            .into_iter()
            .map(|question| {
                Question::new(
                    &question.question_text,
                    question.options,
                    question.correct_answer_index,
                    question.explanation,
                )
            })
            .collect();

        let quiz = Quiz::new(
            &request.title,
            request.description,
            questions,
            request.time_limit,
            user.id,
        );

        let created = self.quiz_repository.create(quiz).await?;
        let quiz_id = created.id.map(|oid| oid.to_hex()).unwrap_or_default();
        let shareable_link = format!(
            "{}/api/v1/quizzes/{}/attempt",
            self.public_base_url, quiz_id
        );

        Ok(CreatedQuizData {
            quiz: QuizDto::from(&created),
            shareable_link,
        })
    }

    pub async fn my_quizzes(&self, user: &CurrentUser) -> AppResult<Vec<QuizDto>> {
        let quizzes = self.quiz_repository.find_by_creator(&user.id).await?;

        if quizzes.is_empty() {
            return Err(AppError::NotFound("No quizzes found".to_string()));
        }

        Ok(quizzes.iter().map(QuizDto::from).collect())
    }

    /// The creator sees the full quiz; anyone else gets the taker view
    /// with correct answers and explanations withheld.
    pub async fn get_quiz(&self, user: &CurrentUser, quiz_id: &str) -> AppResult<QuizView> {
        let quiz_id = parse_object_id(quiz_id, "quiz")?;

        let quiz = self
            .quiz_repository
            .find_by_id(&quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))?;

        if quiz.created_by == user.id {
            Ok(QuizView::Creator(QuizDto::from(&quiz)))
        } else {
            Ok(QuizView::Taker((&quiz).into()))
        }
    }

    pub async fn update_quiz(
        &self,
        user: &CurrentUser,
        quiz_id: &str,
        request: UpdateQuizRequest,
    ) -> AppResult<QuizDto> {
        let quiz_id = parse_object_id(quiz_id, "quiz")?;

        request.validate()?;

        let mut set_doc = Document::new();
        if let Some(title) = request.title.as_deref().filter(|t| !t.trim().is_empty()) {
            set_doc.insert("title", title);
        }
        if let Some(description) = request.description.as_deref() {
            set_doc.insert("description", description);
        }
        if let Some(time_limit) = request.time_limit {
            set_doc.insert("time_limit", time_limit);
        }
        if let Some(inputs) = request.questions {
            validate_question_bounds(&inputs)?;
            let questions: Vec<Question> = inputs
                .into_iter()
                .map(|question| {
                    Question::new(
                        &question.question_text,
                        question.options,
                        question.correct_answer_index,
                        question.explanation,
                    )
                })
                .collect();
            set_doc.insert("questions", to_bson(&questions)?);
        }

        if set_doc.is_empty() {
            return Err(AppError::BadRequest("No fields to update".to_string()));
        }

        let updated = self
            .quiz_repository
            .update_owned(&quiz_id, &user.id, set_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz not found or unauthorized".to_string()))?;

        Ok(QuizDto::from(&updated))
    }

    pub async fn delete_quiz(&self, user: &CurrentUser, quiz_id: &str) -> AppResult<()> {
        let quiz_id = parse_object_id(quiz_id, "quiz")?;

        let deleted = self
            .quiz_repository
            .delete_owned(&quiz_id, &user.id)
            .await?;

        if !deleted {
            return Err(AppError::NotFound(
                "Quiz not found or unauthorized".to_string(),
            ));
        }

        Ok(())
    }

    /// One entry per user (their most recent attempt), highest score first.
    pub async fn leaderboard(&self, quiz_id: &str) -> AppResult<Vec<LeaderboardEntryDto>> {
        let quiz_id = parse_object_id(quiz_id, "quiz")?;

        let attempts = self.attempt_repository.find_by_quiz(&quiz_id).await?;
        if attempts.is_empty() {
            return Err(AppError::NotFound(
                "No attempts found for this quiz".to_string(),
            ));
        }

        // Attempts arrive newest first, so the first attempt seen per user
        // is their latest. Users deleted since attempting are skipped.
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for attempt in attempts {
            if !seen.insert(attempt.user_id) {
                continue;
            }
            if let Some(user) = self.user_repository.find_by_id(&attempt.user_id).await? {
                entries.push(LeaderboardEntryDto {
                    username: user.username,
                    score: attempt.score,
                    completed_at: attempt.completed_at,
                });
            }
        }

        entries.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(b.completed_at.cmp(&a.completed_at))
        });

        Ok(entries)
    }
}

fn validate_question_bounds(questions: &[QuestionInput]) -> AppResult<()> {
    for question in questions {
        if (question.correct_answer_index as usize) >= question.options.len() {
            return Err(AppError::BadRequest(
                "Correct answer index is out of bounds".to_string(),
            ));
        }
    }
    Ok(())
}
