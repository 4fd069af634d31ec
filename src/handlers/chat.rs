// src/handlers/chat.rs
use log::{debug, error, info};
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::models::{ChatRequest, ChatResponse};
use crate::services::chat::augmentation;
use crate::services::knowledge_base::system_prompt;
use crate::state::AppState;

pub const CHAT_FAILURE_MESSAGE: &str = "An error occurred while processing your request.";

pub async fn post_chat(request: ChatRequest, state: AppState) -> Result<Json, Rejection> {
    info!("Handling chat request with {} messages", request.messages.len());

    if request.messages.is_empty() {
        return Err(warp::reject::custom(ApiError::bad_request("messages must not be empty")));
    }

    let extra = augmentation(&state.rates, &request);
    if !extra.is_empty() {
        debug!("Appending {} characters of generated information", extra.len());
    }

    let mut message = state
        .chat
        .complete(&system_prompt(), &request.messages)
        .await
        .map_err(|e| {
            error!("Chat completion failed: {}", e);
            warp::reject::custom(ApiError::external_error(CHAT_FAILURE_MESSAGE))
        })?;
    message.push_str(&extra);

    Ok(warp::reply::json(&ChatResponse { message }))
}
