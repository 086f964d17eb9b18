//! MCP tool handlers, one per route

use dfhack_core::DfHackError;
use serde::Serialize;
use tracing::warn;

use crate::client::DfHackClient;
use crate::endpoints::{self, Endpoint};
use crate::mcp::{RequestId, Response};

/// Tool definition for MCP tools/list
#[derive(Debug, Clone, Serialize)]
pub struct ToolDef {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

impl From<Endpoint> for ToolDef {
    fn from(endpoint: Endpoint) -> Self {
        Self {
            name: endpoint.operation_id().into(),
            description: endpoint.description().into(),
            input_schema: endpoint.input_schema(),
        }
    }
}

/// Get list of available tools
pub fn list_tools() -> Vec<ToolDef> {
    Endpoint::ALL.into_iter().map(ToolDef::from).collect()
}

/// Handle a tools/call request
pub async fn handle_tool_call(
    name: &str,
    arguments: serde_json::Value,
    id: Option<RequestId>,
    client: &dyn DfHackClient,
) -> Response {
    let Some(endpoint) = Endpoint::from_operation_id(name) else {
        let e = DfHackError::InvalidRequest(format!("Unknown tool: {}", name));
        return Response::error(id, e.code(), e.to_string());
    };

    match endpoints::call(endpoint, client, arguments).await {
        Ok(value) => Response::success(
            id,
            serde_json::json!({ "content": [{ "type": "text", "text": value.to_string() }] }),
        ),
        Err(e) => {
            if !e.is_client_error() {
                warn!("Tool {} failed: {}", name, e);
            }
            Response::error(id, e.code(), e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockDfHackClient;
    use dfhack_core::error_codes;
    use dfhack_core::proto::ViewInfo;
    use serde_json::json;

    #[test]
    fn test_one_tool_per_route() {
        let tools = list_tools();
        assert_eq!(tools.len(), Endpoint::ALL.len());

        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "get_versions",
                "get_world_info",
                "get_view_info",
                "get_unit_list",
                "list_units"
            ]
        );

        let list_units = serde_json::to_value(&tools[4]).unwrap();
        assert_eq!(list_units["inputSchema"]["required"], json!(["unit_ids"]));
    }

    #[tokio::test]
    async fn test_tool_call_returns_text_content() {
        let mut client = MockDfHackClient::new();
        client.expect_get_view_info().returning(|| {
            Ok(ViewInfo {
                view_pos_z: Some(120),
                ..Default::default()
            })
        });

        let response =
            handle_tool_call("get_view_info", json!({}), Some(RequestId::Number(7)), &client)
                .await;
        assert!(response.error.is_none());

        let result = response.result.unwrap();
        assert_eq!(result["content"][0]["type"], "text");
        let text = result["content"][0]["text"].as_str().unwrap();
        let body: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(body["viewPosZ"], 120);
        assert_eq!(body["followUnitId"], -1);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_invalid_params() {
        let client = MockDfHackClient::new();
        let response = handle_tool_call("reveal_map", json!({}), None, &client).await;
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_rpc_failure_maps_error_code() {
        let mut client = MockDfHackClient::new();
        client
            .expect_get_unit_list()
            .returning(|| Err(DfHackError::Ipc("connection reset".into())));

        let response = handle_tool_call("get_unit_list", json!({}), None, &client).await;
        let error = response.error.unwrap();
        assert_eq!(error.code, error_codes::GAME_UNREACHABLE);
        assert!(error.message.contains("connection reset"));
    }
}
