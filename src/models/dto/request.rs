use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 50))]
    pub username: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Either `email` or `username` identifies the account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    pub description: Option<String>,

    #[validate(nested, length(min = 1, message = "At least one question is required"))]
    pub questions: Vec<QuestionInput>,

    pub time_limit: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionInput {
    #[validate(length(min = 1))]
    pub question_text: String,

    #[validate(length(min = 2, message = "At least two options are required"))]
    pub options: Vec<String>,

    pub correct_answer_index: u32,

    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub time_limit: Option<i64>,

    #[validate(nested)]
    pub questions: Option<Vec<QuestionInput>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAttemptRequest {
    pub answers: Vec<AnswerInput>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerInput {
    pub question_id: String,
    pub selected_option_index: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_register_request() {
        let request = RegisterRequest {
            full_name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            username: "janed".to_string(),
            password: "secret123".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_invalid_email() {
        let request = RegisterRequest {
            full_name: "Jane Doe".to_string(),
            email: "not-an-email".to_string(),
            username: "janed".to_string(),
            password: "secret123".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_camel_case_wire_format() {
        let json = r#"{
            "fullName": "Jane Doe",
            "email": "jane@x.com",
            "username": "janed",
            "password": "secret123"
        }"#;

        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.full_name, "Jane Doe");
        assert_eq!(request.username, "janed");
    }

    #[test]
    fn test_login_request_accepts_either_identifier() {
        let by_email: LoginRequest =
            serde_json::from_str(r#"{"email": "jane@x.com", "password": "pw"}"#).unwrap();
        assert!(by_email.email.is_some());
        assert!(by_email.username.is_none());

        let by_username: LoginRequest =
            serde_json::from_str(r#"{"username": "janed", "password": "pw"}"#).unwrap();
        assert!(by_username.username.is_some());
    }

    #[test]
    fn test_create_quiz_request_requires_questions() {
        let request = CreateQuizRequest {
            title: "Quiz".to_string(),
            description: None,
            questions: vec![],
            time_limit: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_refresh_token_request_body_field_optional() {
        let empty: RefreshTokenRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.refresh_token.is_none());

        let with_token: RefreshTokenRequest =
            serde_json::from_str(r#"{"refreshToken": "abc"}"#).unwrap();
        assert_eq!(with_token.refresh_token.as_deref(), Some("abc"));
    }
}
