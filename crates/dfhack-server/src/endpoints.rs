//! Route table and endpoint translators
//!
//! Each endpoint issues its RPC call(s) through the injected client and maps
//! the reply into its response record. The HTTP router and the MCP tools are
//! both built from [`Endpoint::ALL`].

use crate::client::DfHackClient;
use dfhack_core::proto::ListUnitsIn;
use dfhack_core::{
    CommandResult, DfHackError, ListUnitsRequest, ListUnitsResponse, Result, UnitListResponse,
    VersionsResponse, ViewInfoResponse, WorldInfoResponse,
};
use tracing::debug;

/// An exposed route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GetVersions,
    GetWorldInfo,
    GetViewInfo,
    GetUnitList,
    ListUnits,
}

impl Endpoint {
    pub const ALL: [Endpoint; 5] = [
        Endpoint::GetVersions,
        Endpoint::GetWorldInfo,
        Endpoint::GetViewInfo,
        Endpoint::GetUnitList,
        Endpoint::ListUnits,
    ];

    /// Operation id, also the MCP tool name
    pub fn operation_id(self) -> &'static str {
        match self {
            Endpoint::GetVersions => "get_versions",
            Endpoint::GetWorldInfo => "get_world_info",
            Endpoint::GetViewInfo => "get_view_info",
            Endpoint::GetUnitList => "get_unit_list",
            Endpoint::ListUnits => "list_units",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::GetVersions => "/get-versions",
            Endpoint::GetWorldInfo => "/get-world-info",
            Endpoint::GetViewInfo => "/get-view-info",
            Endpoint::GetUnitList => "/get-unit-list",
            Endpoint::ListUnits => "/list-units",
        }
    }

    /// Whether the route takes a JSON body
    pub fn takes_body(self) -> bool {
        matches!(self, Endpoint::ListUnits)
    }

    pub fn description(self) -> &'static str {
        match self {
            Endpoint::GetVersions => {
                "Get the DFHack and Dwarf Fortress versions for the connected server"
            }
            Endpoint::GetWorldInfo => {
                "Get the world specific info for the currently running game. Mode-specific ids are only filled in dwarf mode."
            }
            Endpoint::GetViewInfo => {
                "Get the view info (viewport position and size, cursor, followed unit or item) for the currently running game"
            }
            Endpoint::GetUnitList => {
                "Get the list of units in the currently running game with position, name, description, profession and age"
            }
            Endpoint::ListUnits => {
                "Get basic info on a specific list of units. Example: {\"unit_ids\": [1, 2, 3]}"
            }
        }
    }

    /// JSON schema of the tool arguments
    pub fn input_schema(self) -> serde_json::Value {
        match self {
            Endpoint::ListUnits => serde_json::json!({
                "type": "object",
                "properties": {
                    "unit_ids": {
                        "type": "array",
                        "items": { "type": "integer" },
                        "description": "Ids of the units to look up"
                    }
                },
                "required": ["unit_ids"]
            }),
            _ => serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    pub fn from_operation_id(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.operation_id() == name)
    }
}

/// Run an endpoint with JSON arguments and return its JSON response
pub async fn call(
    endpoint: Endpoint,
    client: &dyn DfHackClient,
    arguments: serde_json::Value,
) -> Result<serde_json::Value> {
    debug!("Calling endpoint {}", endpoint.operation_id());
    let value = match endpoint {
        Endpoint::GetVersions => serde_json::to_value(get_versions(client).await?)?,
        Endpoint::GetWorldInfo => serde_json::to_value(get_world_info(client).await?)?,
        Endpoint::GetViewInfo => serde_json::to_value(get_view_info(client).await?)?,
        Endpoint::GetUnitList => serde_json::to_value(get_unit_list(client).await?)?,
        Endpoint::ListUnits => {
            let request = ListUnitsRequest::from_value(arguments)?;
            serde_json::to_value(list_units(client, request).await?)?
        }
    };
    Ok(value)
}

/// Run an endpoint by operation id
pub async fn call_by_name(
    name: &str,
    client: &dyn DfHackClient,
    arguments: serde_json::Value,
) -> Result<serde_json::Value> {
    let endpoint = Endpoint::from_operation_id(name)
        .ok_or_else(|| DfHackError::InvalidRequest(format!("Unknown tool: {}", name)))?;
    call(endpoint, client, arguments).await
}

pub async fn get_versions(client: &dyn DfHackClient) -> Result<VersionsResponse> {
    let (dfhack_version, dwarf_fortress_version) =
        tokio::try_join!(client.get_version(), client.get_df_version())?;

    Ok(VersionsResponse {
        dfhack_version,
        dwarf_fortress_version,
    })
}

pub async fn get_world_info(client: &dyn DfHackClient) -> Result<WorldInfoResponse> {
    WorldInfoResponse::try_from(client.get_world_info().await?)
}

pub async fn get_view_info(client: &dyn DfHackClient) -> Result<ViewInfoResponse> {
    Ok(client.get_view_info().await?.into())
}

pub async fn get_unit_list(client: &dyn DfHackClient) -> Result<UnitListResponse> {
    Ok(client.get_unit_list().await?.into())
}

/// Look up the requested units. Ids the game cannot resolve are left out.
pub async fn list_units(
    client: &dyn DfHackClient,
    request: ListUnitsRequest,
) -> Result<ListUnitsResponse> {
    match client.list_units(ListUnitsIn::for_ids(request.unit_ids)).await {
        Ok(out) => Ok(out.into()),
        // ListUnits answers CR_NOT_FOUND when no id resolves
        Err(DfHackError::CommandFailed {
            result: CommandResult::NotFound,
            ..
        }) => Ok(ListUnitsResponse { units: Vec::new() }),
        Err(e) => Err(e),
    }
}
