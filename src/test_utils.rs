use crate::models::domain::{user::hash_password, User};
