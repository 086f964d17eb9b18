//! MCP transports and the method dispatch they share

pub mod stdio;

use crate::DfHackServer;
use crate::mcp::{
    InitializeParams, InitializeResult, Request, Response, ServerCapabilities, ToolsCapability,
    rpc_codes,
};
use crate::tools::{handle_tool_call, list_tools};
use dfhack_core::error_codes;
use tracing::{debug, error, info};

/// Parse one JSON-RPC message and dispatch it. `None` means nothing is sent back.
pub async fn handle_message(raw: &str, server: &DfHackServer) -> Option<Response> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            error!("Failed to parse request: {}", e);
            return Some(Response::error(
                None,
                rpc_codes::PARSE_ERROR,
                format!("Parse error: {}", e),
            ));
        }
    };

    match serde_json::from_value::<Request>(value) {
        Ok(request) => handle_request(&request, server).await,
        Err(e) => Some(Response::error(
            None,
            rpc_codes::INVALID_REQUEST,
            format!("Invalid request: {}", e),
        )),
    }
}

/// Dispatch a parsed request
pub async fn handle_request(request: &Request, server: &DfHackServer) -> Option<Response> {
    debug!("MCP method {}", request.method);

    if request.is_notification() {
        match request.method.as_str() {
            "notifications/initialized" => info!("MCP client initialized"),
            other => debug!("Ignoring notification {}", other),
        }
        return None;
    }

    let response = match request.method.as_str() {
        "initialize" => handle_initialize(request, server),
        "ping" => Response::success(request.id.clone(), serde_json::json!({})),
        "tools/list" => handle_tools_list(request),
        "tools/call" => handle_tools_call(request, server).await,
        _ => Response::error(
            request.id.clone(),
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        ),
    };
    Some(response)
}

fn handle_initialize(request: &Request, server: &DfHackServer) -> Response {
    let params: InitializeParams = if request.params.is_null() {
        InitializeParams::default()
    } else {
        match serde_json::from_value(request.params.clone()) {
            Ok(p) => p,
            Err(e) => {
                return Response::error(
                    request.id.clone(),
                    error_codes::INVALID_PARAMS,
                    format!("Invalid initialize params: {}", e),
                );
            }
        }
    };

    if let Some(client) = &params.client_info {
        info!("MCP client {} {} connected", client.name, client.version);
    }

    let info = server.info();
    let result = InitializeResult {
        protocol_version: params.negotiated_version().to_string(),
        capabilities: ServerCapabilities {
            tools: ToolsCapability {
                list_changed: false,
            },
        },
        server_info: info.clone(),
        instructions: Some(info.description.clone()),
    };

    match serde_json::to_value(result) {
        Ok(value) => Response::success(request.id.clone(), value),
        Err(e) => Response::error(request.id.clone(), error_codes::INTERNAL_ERROR, e.to_string()),
    }
}

fn handle_tools_list(request: &Request) -> Response {
    let tools = list_tools();
    Response::success(request.id.clone(), serde_json::json!({ "tools": tools }))
}

async fn handle_tools_call(request: &Request, server: &DfHackServer) -> Response {
    #[derive(serde::Deserialize)]
    struct ToolCallParams {
        name: String,
        #[serde(default)]
        arguments: serde_json::Value,
    }

    let params: ToolCallParams = match serde_json::from_value(request.params.clone()) {
        Ok(p) => p,
        Err(e) => {
            return Response::error(
                request.id.clone(),
                error_codes::INVALID_PARAMS,
                format!("Invalid tool call params: {}", e),
            );
        }
    };

    handle_tool_call(
        &params.name,
        params.arguments,
        request.id.clone(),
        server.client().as_ref(),
    )
    .await
}
