//! JSON response records for the HTTP routes and MCP tools
//!
//! Each record is a pure projection of one RPC reply. Absent optional fields
//! take the default declared by the protocol; nothing else is invented.

use serde::{Deserialize, Serialize};

use crate::error::{DfHackError, Result};
use crate::proto::{
    BasicUnitInfo, GetWorldInfoOut, ListUnitsOut, NameInfo, UnitDefinition, UnitList, ViewInfo,
    get_world_info_out::Mode,
};

/// `get-versions` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionsResponse {
    pub dfhack_version: String,
    pub dwarf_fortress_version: String,
}

/// Language name of a world or unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameRecord {
    pub language_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub english_name: String,
}

impl From<NameInfo> for NameRecord {
    fn from(name: NameInfo) -> Self {
        Self {
            language_id: name.language_id.unwrap_or(-1),
            first_name: name.first_name.unwrap_or_default(),
            last_name: name.last_name.unwrap_or_default(),
            nickname: name.nickname.unwrap_or_default(),
            english_name: name.english_name.unwrap_or_default(),
        }
    }
}

/// `get-world-info` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldInfoResponse {
    pub world_name: NameRecord,
    pub mode: String,
    pub details: WorldDetails,
}

/// Mode-specific world identifiers; an empty object outside dwarf mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorldDetails {
    Dwarf(DwarfModeDetails),
    Empty {},
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DwarfModeDetails {
    pub civ_id: i32,
    pub site_id: i32,
    pub group_id: i32,
    pub race_id: i32,
}

impl TryFrom<GetWorldInfoOut> for WorldInfoResponse {
    type Error = DfHackError;

    fn try_from(info: GetWorldInfoOut) -> Result<Self> {
        let mode = Mode::try_from(info.mode).map_err(|_| {
            DfHackError::MalformedResponse(format!("unknown world mode {}", info.mode))
        })?;

        let details = match mode {
            Mode::Dwarf => WorldDetails::Dwarf(DwarfModeDetails {
                civ_id: info.civ_id.unwrap_or_default(),
                site_id: info.site_id.unwrap_or_default(),
                group_id: info.group_id.unwrap_or_default(),
                race_id: info.race_id.unwrap_or_default(),
            }),
            Mode::Adventure | Mode::Legends => WorldDetails::Empty {},
        };

        Ok(Self {
            world_name: info.world_name.unwrap_or_default().into(),
            mode: mode.as_str_name().to_string(),
            details,
        })
    }
}

/// `get-view-info` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewInfoResponse {
    pub view_pos_x: i32,
    pub view_pos_y: i32,
    pub view_pos_z: i32,
    pub view_size_x: i32,
    pub view_size_y: i32,
    pub cursor_pos_x: i32,
    pub cursor_pos_y: i32,
    pub cursor_pos_z: i32,
    pub follow_unit_id: i32,
    pub follow_item_id: i32,
}

impl From<ViewInfo> for ViewInfoResponse {
    fn from(view: ViewInfo) -> Self {
        Self {
            view_pos_x: view.view_pos_x.unwrap_or_default(),
            view_pos_y: view.view_pos_y.unwrap_or_default(),
            view_pos_z: view.view_pos_z.unwrap_or_default(),
            view_size_x: view.view_size_x.unwrap_or_default(),
            view_size_y: view.view_size_y.unwrap_or_default(),
            cursor_pos_x: view.cursor_pos_x.unwrap_or_default(),
            cursor_pos_y: view.cursor_pos_y.unwrap_or_default(),
            cursor_pos_z: view.cursor_pos_z.unwrap_or_default(),
            follow_unit_id: view.follow_unit_id.unwrap_or(-1),
            follow_item_id: view.follow_item_id.unwrap_or(-1),
        }
    }
}

/// Map tile coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// One creature in the `get-unit-list` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitSummary {
    pub id: i32,
    pub position: Position,
    pub is_soldier: bool,
    pub name: String,
    pub physical_description: String,
    pub profession_id: i32,
    pub age: i32,
}

impl From<UnitDefinition> for UnitSummary {
    fn from(unit: UnitDefinition) -> Self {
        Self {
            id: unit.id,
            position: Position {
                x: unit.pos_x.unwrap_or_default(),
                y: unit.pos_y.unwrap_or_default(),
                z: unit.pos_z.unwrap_or_default(),
            },
            is_soldier: unit.is_soldier.unwrap_or_default(),
            name: unit.name.unwrap_or_default(),
            physical_description: unit
                .appearance
                .and_then(|a| a.physical_description)
                .unwrap_or_default(),
            profession_id: unit.profession_id.unwrap_or_default(),
            age: unit.age.unwrap_or_default(),
        }
    }
}

/// `get-unit-list` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitListResponse {
    pub unit_count: usize,
    pub units: Vec<UnitSummary>,
}

impl From<UnitList> for UnitListResponse {
    fn from(list: UnitList) -> Self {
        let units: Vec<UnitSummary> = list.creature_list.into_iter().map(Into::into).collect();
        Self {
            unit_count: units.len(),
            units,
        }
    }
}

/// `list-units` request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUnitsRequest {
    pub unit_ids: Vec<i32>,
}

impl ListUnitsRequest {
    /// Parse tool or route arguments, reporting bad input as a client error
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| DfHackError::InvalidRequest(e.to_string()))
    }
}

/// One unit in the `list-units` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitDetail {
    pub unit_id: i32,
    pub name: NameRecord,
    pub flags1: u32,
    pub flags2: u32,
    pub flags3: u32,
    pub race: i32,
    pub caste: i32,
    pub gender: i32,
    pub civ_id: i32,
    pub histfig_id: i32,
    pub position: Position,
    pub profession: i32,
}

impl From<BasicUnitInfo> for UnitDetail {
    fn from(unit: BasicUnitInfo) -> Self {
        Self {
            unit_id: unit.unit_id,
            name: unit.name.unwrap_or_default().into(),
            flags1: unit.flags1,
            flags2: unit.flags2,
            flags3: unit.flags3,
            race: unit.race,
            caste: unit.caste,
            gender: unit.gender.unwrap_or(-1),
            civ_id: unit.civ_id.unwrap_or(-1),
            histfig_id: unit.histfig_id.unwrap_or(-1),
            position: Position {
                x: unit.pos_x,
                y: unit.pos_y,
                z: unit.pos_z,
            },
            profession: unit.profession.unwrap_or(-1),
        }
    }
}

/// `list-units` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUnitsResponse {
    pub units: Vec<UnitDetail>,
}

impl From<ListUnitsOut> for ListUnitsResponse {
    fn from(out: ListUnitsOut) -> Self {
        Self {
            units: out.value.into_iter().map(Into::into).collect(),
        }
    }
}
