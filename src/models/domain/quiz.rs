use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Quiz {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<Question>,
    /// Time limit in minutes, optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<i64>,
    pub created_by: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer_index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Quiz {
    pub fn new(
        title: &str,
        description: Option<String>,
        questions: Vec<Question>,
        time_limit: Option<i64>,
        created_by: ObjectId,
    ) -> Self {
        Quiz {
            id: None,
            title: title.to_string(),
            description,
            questions,
            time_limit,
            created_by,
            created_at: Some(Utc::now()),
        }
    }

    pub fn find_question(&self, question_id: &ObjectId) -> Option<&Question> {
        self.questions.iter().find(|q| &q.id == question_id)
    }
}

impl Question {
    pub fn new(
        question_text: &str,
        options: Vec<String>,
        correct_answer_index: u32,
        explanation: Option<String>,
    ) -> Self {
        Question {
            id: ObjectId::new(),
            question_text: question_text.to_string(),
            options,
            correct_answer_index,
            explanation,
        }
    }
}
