//! HTTP surface: one route per endpoint plus `POST /mcp`

pub mod error;
pub mod mcp;
pub mod routes;

pub use error::{ApiError, ApiResult, ErrorResponse};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::DfHackServer;
use crate::endpoints::Endpoint;

/// Build the router with the server injected as state
pub fn router(server: Arc<DfHackServer>) -> Router {
    let mut router = Router::new();
    for endpoint in Endpoint::ALL {
        let path = endpoint.path();
        router = match endpoint {
            Endpoint::GetVersions => router.route(path, get(routes::get_versions)),
            Endpoint::GetWorldInfo => router.route(path, get(routes::get_world_info)),
            Endpoint::GetViewInfo => router.route(path, get(routes::get_view_info)),
            Endpoint::GetUnitList => router.route(path, get(routes::get_unit_list)),
            Endpoint::ListUnits => router.route(path, post(routes::list_units)),
        };
    }

    router
        .route("/mcp", post(mcp::handle_mcp))
        .layer(TraceLayer::new_for_http())
        .with_state(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockDfHackClient;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use dfhack_core::proto::{BasicUnitInfo, ListUnitsOut, UnitDefinition, UnitList};
    use dfhack_core::{CommandResult, DfHackError};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app(client: MockDfHackClient) -> Router {
        router(Arc::new(DfHackServer::new(Arc::new(client))))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn versions_client() -> MockDfHackClient {
        let mut client = MockDfHackClient::new();
        client
            .expect_get_version()
            .returning(|| Ok("0.8".to_string()));
        client
            .expect_get_df_version()
            .returning(|| Ok("50.11".to_string()));
        client
    }

    fn unit_list() -> UnitList {
        UnitList {
            creature_list: vec![
                UnitDefinition {
                    id: 1,
                    name: Some("Kogan".into()),
                    ..Default::default()
                },
                UnitDefinition {
                    id: 2,
                    ..Default::default()
                },
                UnitDefinition {
                    id: 5,
                    is_soldier: Some(true),
                    ..Default::default()
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_get_versions_body() {
        let (status, body) = send(app(versions_client()), get_request("/get-versions")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            String::from_utf8(body).unwrap(),
            r#"{"dfhackVersion":"0.8","dwarfFortressVersion":"50.11"}"#
        );
    }

    #[tokio::test]
    async fn test_repeated_gets_are_byte_identical() {
        let mut client = MockDfHackClient::new();
        client
            .expect_get_unit_list()
            .times(2)
            .returning(|| Ok(unit_list()));
        let app = app(client);

        let (_, first) = send(app.clone(), get_request("/get-unit-list")).await;
        let (_, second) = send(app, get_request("/get-unit-list")).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_unit_count_matches_units() {
        let mut client = MockDfHackClient::new();
        client.expect_get_unit_list().returning(|| Ok(unit_list()));

        let (status, body) = send(app(client), get_request("/get-unit-list")).await;
        assert_eq!(status, StatusCode::OK);

        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["unitCount"], 3);
        assert_eq!(value["units"].as_array().unwrap().len(), 3);
        assert_eq!(value["units"][2]["isSoldier"], true);
    }

    #[tokio::test]
    async fn test_list_units_returns_resolved_ids() {
        let mut client = MockDfHackClient::new();
        client.expect_list_units().returning(|request| {
            let value = request
                .id_list
                .iter()
                .filter(|id| **id != 2)
                .map(|id| BasicUnitInfo {
                    unit_id: *id,
                    ..Default::default()
                })
                .collect();
            Ok(ListUnitsOut { value })
        });

        let (status, body) = send(
            app(client),
            post_json("/list-units", json!({ "unit_ids": [1, 2, 3] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let value: Value = serde_json::from_slice(&body).unwrap();
        let ids: Vec<i64> = value["units"]
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["unitId"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_list_units_with_nothing_resolved_is_empty() {
        for unit_ids in [json!([999_999]), json!([])] {
            let mut client = MockDfHackClient::new();
            client.expect_list_units().times(1).returning(|_| {
                Err(DfHackError::CommandFailed {
                    method: "ListUnits".into(),
                    result: CommandResult::NotFound,
                })
            });

            let request = post_json("/list-units", json!({ "unit_ids": unit_ids }));
            let (status, body) = send(app(client), request).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(String::from_utf8(body).unwrap(), r#"{"units":[]}"#);
        }
    }

    #[tokio::test]
    async fn test_list_units_without_ids_is_bad_request() {
        let client = MockDfHackClient::new();

        let request = post_json("/list-units", json!({ "ids": [1] }));
        let (status, body) = send(app(client), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error.error.contains("unit_ids"));
        assert_eq!(error.code, dfhack_core::error_codes::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_list_units_without_json_body_is_bad_request() {
        let client = MockDfHackClient::new();
        let request = Request::builder()
            .method("POST")
            .uri("/list-units")
            .body(Body::from("unit_ids=1"))
            .unwrap();

        let (status, _) = send(app(client), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rpc_failure_is_bad_gateway() {
        let mut client = MockDfHackClient::new();
        client
            .expect_get_world_info()
            .returning(|| Err(DfHackError::Ipc("not connected".into())));

        let (status, body) = send(app(client), get_request("/get-world-info")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "IPC error: not connected");
    }

    #[tokio::test]
    async fn test_mcp_tools_list() {
        let request = post_json(
            "/mcp",
            json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list" }),
        );
        let (status, body) = send(app(MockDfHackClient::new()), request).await;
        assert_eq!(status, StatusCode::OK);

        let value: Value = serde_json::from_slice(&body).unwrap();
        let tools = value["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), Endpoint::ALL.len());
    }

    #[tokio::test]
    async fn test_mcp_tool_call_matches_route() {
        let mut client = MockDfHackClient::new();
        client
            .expect_get_unit_list()
            .times(2)
            .returning(|| Ok(unit_list()));
        let app = app(client);

        let (_, route_body) = send(app.clone(), get_request("/get-unit-list")).await;
        let request = post_json(
            "/mcp",
            json!({
                "jsonrpc": "2.0",
                "id": "call-1",
                "method": "tools/call",
                "params": { "name": "get_unit_list", "arguments": {} }
            }),
        );
        let (_, mcp_body) = send(app, request).await;

        let reply: Value = serde_json::from_slice(&mcp_body).unwrap();
        let text = reply["result"]["content"][0]["text"].as_str().unwrap();
        let from_tool: Value = serde_json::from_str(text).unwrap();
        let from_route: Value = serde_json::from_slice(&route_body).unwrap();
        assert_eq!(from_tool, from_route);
        assert_eq!(reply["id"], "call-1");
    }

    #[tokio::test]
    async fn test_mcp_notification_is_accepted() {
        let request = post_json(
            "/mcp",
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
        );
        let (status, body) = send(app(MockDfHackClient::new()), request).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert!(body.is_empty());
    }
}
