pub mod quiz_handler;
pub mod user_handler;
