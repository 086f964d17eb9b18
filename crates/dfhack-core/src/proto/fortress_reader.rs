//! `RemoteFortressReader` plugin messages

#[derive(Clone, PartialEq, prost::Message)]
pub struct ViewInfo {
    #[prost(int32, optional, tag = "1")]
    pub view_pos_x: Option<i32>,
    #[prost(int32, optional, tag = "2")]
    pub view_pos_y: Option<i32>,
    #[prost(int32, optional, tag = "3")]
    pub view_pos_z: Option<i32>,
    #[prost(int32, optional, tag = "4")]
    pub view_size_x: Option<i32>,
    #[prost(int32, optional, tag = "5")]
    pub view_size_y: Option<i32>,
    #[prost(int32, optional, tag = "6")]
    pub cursor_pos_x: Option<i32>,
    #[prost(int32, optional, tag = "7")]
    pub cursor_pos_y: Option<i32>,
    #[prost(int32, optional, tag = "8")]
    pub cursor_pos_z: Option<i32>,
    #[prost(int32, optional, tag = "9", default = "-1")]
    pub follow_unit_id: Option<i32>,
    #[prost(int32, optional, tag = "10", default = "-1")]
    pub follow_item_id: Option<i32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UnitList {
    #[prost(message, repeated, tag = "1")]
    pub creature_list: Vec<UnitDefinition>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UnitDefinition {
    #[prost(int32, required, tag = "1")]
    pub id: i32,
    #[prost(int32, optional, tag = "3")]
    pub pos_x: Option<i32>,
    #[prost(int32, optional, tag = "4")]
    pub pos_y: Option<i32>,
    #[prost(int32, optional, tag = "5")]
    pub pos_z: Option<i32>,
    #[prost(bool, optional, tag = "11")]
    pub is_soldier: Option<bool>,
    #[prost(string, optional, tag = "13")]
    pub name: Option<String>,
    #[prost(message, optional, tag = "16")]
    pub appearance: Option<UnitAppearance>,
    #[prost(int32, optional, tag = "17")]
    pub profession_id: Option<i32>,
    #[prost(int32, optional, tag = "25")]
    pub age: Option<i32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UnitAppearance {
    #[prost(string, optional, tag = "9")]
    pub physical_description: Option<String>,
}
