//! MCP JSON-RPC over HTTP POST, one message per request

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::DfHackServer;
use crate::transport::handle_message;

pub async fn handle_mcp(State(server): State<Arc<DfHackServer>>, body: String) -> Response {
    match handle_message(&body, &server).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
