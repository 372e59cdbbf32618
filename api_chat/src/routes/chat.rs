use actix_web::{Responder, post, web};
use chrono::{SecondsFormat, Utc};
use common::{error::Res, http::Success};

use crate::{
    dtos::chat::{ChatRequest, ChatResponse},
    services,
};

/// Answers a chat message with a canned reply.
///
/// # Input
/// - JSON body `{ "message": string }`. No authentication.
///
/// # Output
/// - Success: `{ "text": string, "timestamp": <ISO-8601 instant> }`
#[post("/bible-chat")]
pub async fn post_bible_chat(req: web::Json<ChatRequest>) -> Res<impl Responder> {
    let text = services::chat::generate_reply(&req.message);

    Success::ok(ChatResponse {
        text,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
