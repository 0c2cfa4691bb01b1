use axum::Json;
use serde::{Deserialize, Serialize};

pub mod error;
pub mod health;
pub mod login;
pub mod logout;
pub mod protected;
pub mod register;

pub use error::{ApiError, ErrorResponse};

#[derive(Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

pub(crate) fn success_message(message: &str) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: message.to_owned(),
    })
}
