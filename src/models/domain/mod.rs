pub mod attempt;
pub mod quiz;
pub mod user;

pub use attempt::{Attempt, AttemptAnswer};
pub use quiz::{Question, Quiz};
pub use user::User;
