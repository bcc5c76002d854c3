use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Attempt {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub quiz_id: ObjectId,
    pub user_id: ObjectId,
    pub score: i64,
    pub answers: Vec<AttemptAnswer>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AttemptAnswer {
    pub question_id: ObjectId,
    pub selected_option_index: u32,
    pub is_correct: bool,
}

impl Attempt {
    pub fn new(quiz_id: ObjectId, user_id: ObjectId, score: i64, answers: Vec<AttemptAnswer>) -> Self {
        Attempt {
            id: None,
            quiz_id,
            user_id,
            score,
            answers,
            completed_at: Utc::now(),
        }
    }

    pub fn correct_answers(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }

    pub fn answer_for(&self, question_id: &ObjectId) -> Option<&AttemptAnswer> {
        self.answers.iter().find(|a| &a.question_id == question_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_counts_correct_answers() {
        let q1 = ObjectId::new();
        let q2 = ObjectId::new();
        let attempt = Attempt::new(
            ObjectId::new(),
            ObjectId::new(),
            1,
            vec![
                AttemptAnswer {
                    question_id: q1,
                    selected_option_index: 0,
                    is_correct: true,
                },
                AttemptAnswer {
                    question_id: q2,
                    selected_option_index: 2,
                    is_correct: false,
                },
            ],
        );

        assert_eq!(attempt.correct_answers(), 1);
        assert!(attempt.answer_for(&q1).unwrap().is_correct);
        assert!(!attempt.answer_for(&q2).unwrap().is_correct);
        assert!(attempt.answer_for(&ObjectId::new()).is_none());
    }
}
