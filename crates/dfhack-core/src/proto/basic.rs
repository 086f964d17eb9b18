//! `dfproto` messages from Basic.proto and BasicApi.proto

#[derive(Clone, PartialEq, prost::Message)]
pub struct NameInfo {
    #[prost(string, optional, tag = "1")]
    pub first_name: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub nickname: Option<String>,
    #[prost(int32, optional, tag = "3", default = "-1")]
    pub language_id: Option<i32>,
    #[prost(string, optional, tag = "4")]
    pub last_name: Option<String>,
    #[prost(string, optional, tag = "5")]
    pub english_name: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetWorldInfoOut {
    #[prost(enumeration = "get_world_info_out::Mode", required, tag = "1")]
    pub mode: i32,
    #[prost(string, required, tag = "2")]
    pub save_dir: String,
    #[prost(message, optional, tag = "3")]
    pub world_name: Option<NameInfo>,
    #[prost(int32, optional, tag = "4")]
    pub civ_id: Option<i32>,
    #[prost(int32, optional, tag = "5")]
    pub site_id: Option<i32>,
    #[prost(int32, optional, tag = "6")]
    pub group_id: Option<i32>,
    #[prost(int32, optional, tag = "7")]
    pub race_id: Option<i32>,
}

pub mod get_world_info_out {
    /// Game mode the world is loaded in
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
    #[repr(i32)]
    pub enum Mode {
        Dwarf = 1,
        Adventure = 2,
        Legends = 3,
    }

    impl Mode {
        /// Enum value name as declared in BasicApi.proto
        pub fn as_str_name(&self) -> &'static str {
            match self {
                Mode::Dwarf => "MODE_DWARF",
                Mode::Adventure => "MODE_ADVENTURE",
                Mode::Legends => "MODE_LEGENDS",
            }
        }
    }
}

/// Optional sections of `BasicUnitInfo` to fill in
#[derive(Clone, PartialEq, prost::Message)]
pub struct BasicUnitInfoMask {
    #[prost(bool, optional, tag = "1")]
    pub labors: Option<bool>,
    #[prost(bool, optional, tag = "2")]
    pub skills: Option<bool>,
    #[prost(bool, optional, tag = "3")]
    pub profession: Option<bool>,
    #[prost(bool, optional, tag = "4")]
    pub misc_traits: Option<bool>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct BasicUnitInfo {
    #[prost(int32, required, tag = "1")]
    pub unit_id: i32,
    #[prost(message, optional, tag = "2")]
    pub name: Option<NameInfo>,
    #[prost(fixed32, required, tag = "3")]
    pub flags1: u32,
    #[prost(fixed32, required, tag = "4")]
    pub flags2: u32,
    #[prost(fixed32, required, tag = "5")]
    pub flags3: u32,
    #[prost(int32, required, tag = "6")]
    pub race: i32,
    #[prost(int32, required, tag = "7")]
    pub caste: i32,
    #[prost(int32, optional, tag = "8", default = "-1")]
    pub gender: Option<i32>,
    #[prost(int32, optional, tag = "9", default = "-1")]
    pub civ_id: Option<i32>,
    #[prost(int32, optional, tag = "10", default = "-1")]
    pub histfig_id: Option<i32>,
    #[prost(int32, required, tag = "13")]
    pub pos_x: i32,
    #[prost(int32, required, tag = "14")]
    pub pos_y: i32,
    #[prost(int32, required, tag = "15")]
    pub pos_z: i32,
    #[prost(int32, optional, tag = "22", default = "-1")]
    pub profession: Option<i32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListUnitsIn {
    #[prost(message, optional, tag = "1")]
    pub mask: Option<BasicUnitInfoMask>,
    #[prost(int32, repeated, packed = "false", tag = "2")]
    pub id_list: Vec<i32>,
    #[prost(bool, optional, tag = "5")]
    pub scan_all: Option<bool>,
}

impl ListUnitsIn {
    /// Look up exactly `ids`, with profession data filled in
    pub fn for_ids(ids: Vec<i32>) -> Self {
        Self {
            mask: Some(BasicUnitInfoMask {
                profession: Some(true),
                ..Default::default()
            }),
            id_list: ids,
            scan_all: None,
        }
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListUnitsOut {
    #[prost(message, repeated, tag = "1")]
    pub value: Vec<BasicUnitInfo>,
}
