pub mod attempt_service;
pub mod quiz_service;
pub mod user_service;

pub use attempt_service::AttemptService;
pub use quiz_service::QuizService;
pub use user_service::UserService;

use mongodb::bson::oid::ObjectId;

use crate::errors::{AppError, AppResult};

pub(crate) fn parse_object_id(value: &str, what: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(value).map_err(|_| AppError::BadRequest(format!("Invalid {} id", what)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        let oid = ObjectId::new();
        assert_eq!(parse_object_id(&oid.to_hex(), "quiz").unwrap(), oid);

        let err = parse_object_id("not-an-id", "quiz").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
