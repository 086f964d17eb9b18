//! Protobuf messages for the DFHack remote API
//!
//! Only the messages and fields used by the facade are declared. Unknown
//! fields sent by the game are skipped on decode.

pub mod basic;
pub mod core_protocol;
pub mod fortress_reader;

pub use basic::{
    BasicUnitInfo, BasicUnitInfoMask, GetWorldInfoOut, ListUnitsIn, ListUnitsOut, NameInfo,
    get_world_info_out,
};
pub use core_protocol::{
    CoreBindReply, CoreBindRequest, CoreTextFragment, CoreTextNotification, EmptyMessage,
    StringMessage,
};
pub use fortress_reader::{UnitAppearance, UnitDefinition, UnitList, ViewInfo};
