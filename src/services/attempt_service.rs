use std::sync::Arc;

use crate::{
    auth::CurrentUser,
    errors::{AppError, AppResult},
    models::{
        domain::{Attempt, AttemptAnswer},
        dto::{
            request::SubmitAttemptRequest,
            response::{AttemptDto, AttemptResultsData, AttemptSummaryData, QuestionResultDto},
        },
    },
    repositories::{AttemptRepository, QuizRepository},
    services::parse_object_id,
};

pub struct AttemptService {
    quiz_repository: Arc<dyn QuizRepository>,
    attempt_repository: Arc<dyn AttemptRepository>,
}

impl AttemptService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        attempt_repository: Arc<dyn AttemptRepository>,
    ) -> Self {
        Self {
            quiz_repository,
            attempt_repository,
        }
    }

    /// Grades the submission in a single pass: one point per answer whose
    /// selected option matches the question's correct index.
    pub async fn submit_attempt(
        &self,
        user: &CurrentUser,
        quiz_id: &str,
        request: SubmitAttemptRequest,
    ) -> AppResult<AttemptSummaryData> {
        let quiz_id = parse_object_id(quiz_id, "quiz")?;

        let quiz = self
            .quiz_repository
            .find_by_id(&quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))?;

        let mut score: i64 = 0;
        let mut answers = Vec::with_capacity(request.answers.len());

        for answer in &request.answers {
            let question_id = parse_object_id(&answer.question_id, "question")
                .map_err(|_| AppError::BadRequest("Invalid question ID provided".to_string()))?;

            let question = quiz
                .find_question(&question_id)
                .ok_or_else(|| AppError::BadRequest("Invalid question ID provided".to_string()))?;

            let is_correct = question.correct_answer_index == answer.selected_option_index;
            if is_correct {
                score += 1;
            }

            answers.push(AttemptAnswer {
                question_id,
                selected_option_index: answer.selected_option_index,
                is_correct,
            });
        }

        let attempt = Attempt::new(quiz_id, user.id, score, answers);
        let created = self.attempt_repository.create(attempt).await?;

        Ok(AttemptSummaryData {
            attempt_id: created.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            score,
            total_questions: quiz.questions.len(),
            correct_answers: created.correct_answers(),
        })
    }

    /// The user's attempt history, newest first. An empty history is an
    /// empty list, not an error.
    pub async fn quiz_history(&self, user: &CurrentUser) -> AppResult<Vec<AttemptDto>> {
        let attempts = self.attempt_repository.find_by_user(&user.id).await?;
        Ok(attempts.iter().map(AttemptDto::from).collect())
    }

    /// Per-question breakdown of one of the user's own attempts.
    pub async fn attempt_results(
        &self,
        user: &CurrentUser,
        attempt_id: &str,
    ) -> AppResult<AttemptResultsData> {
        let attempt_id = parse_object_id(attempt_id, "attempt")?;

        let attempt = self
            .attempt_repository
            .find_by_id_and_user(&attempt_id, &user.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Attempt not found".to_string()))?;

        let quiz = self
            .quiz_repository
            .find_by_id(&attempt.quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))?;

        let results = quiz
            .questions
            .iter()
            .map(|question| {
                let answer = attempt.answer_for(&question.id);
                QuestionResultDto {
                    question_id: question.id.to_hex(),
                    question_text: question.question_text.clone(),
                    options: question.options.clone(),
                    correct_answer_index: question.correct_answer_index,
                    explanation: question.explanation.clone(),
                    user_selected_option: answer.map(|a| a.selected_option_index),
                    is_correct: answer.map(|a| a.is_correct).unwrap_or(false),
                }
            })
            .collect();

        Ok(AttemptResultsData {
            quiz_title: quiz.title,
            score: attempt.score,
            total_questions: quiz.questions.len(),
            results,
            attempted_at: attempt.completed_at,
        })
    }
}
