//! Route handlers. Each one delegates to its endpoint translator.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use dfhack_core::{
    ListUnitsRequest, ListUnitsResponse, UnitListResponse, VersionsResponse, ViewInfoResponse,
    WorldInfoResponse,
};
use std::sync::Arc;

use super::error::ApiResult;
use crate::DfHackServer;
use crate::endpoints;

pub async fn get_versions(
    State(server): State<Arc<DfHackServer>>,
) -> ApiResult<Json<VersionsResponse>> {
    Ok(Json(endpoints::get_versions(server.client().as_ref()).await?))
}

pub async fn get_world_info(
    State(server): State<Arc<DfHackServer>>,
) -> ApiResult<Json<WorldInfoResponse>> {
    Ok(Json(endpoints::get_world_info(server.client().as_ref()).await?))
}

pub async fn get_view_info(
    State(server): State<Arc<DfHackServer>>,
) -> ApiResult<Json<ViewInfoResponse>> {
    Ok(Json(endpoints::get_view_info(server.client().as_ref()).await?))
}

pub async fn get_unit_list(
    State(server): State<Arc<DfHackServer>>,
) -> ApiResult<Json<UnitListResponse>> {
    Ok(Json(endpoints::get_unit_list(server.client().as_ref()).await?))
}

pub async fn list_units(
    State(server): State<Arc<DfHackServer>>,
    body: Result<Json<ListUnitsRequest>, JsonRejection>,
) -> ApiResult<Json<ListUnitsResponse>> {
    let Json(request) = body?;
    Ok(Json(endpoints::list_units(server.client().as_ref(), request).await?))
}
