//! RPC client contract consumed by the endpoints

use async_trait::async_trait;
use dfhack_core::Result;
use dfhack_core::proto::{GetWorldInfoOut, ListUnitsIn, ListUnitsOut, UnitList, ViewInfo};
use std::sync::Arc;

/// Shared handle to the single connection of this process
pub type SharedClient = Arc<dyn DfHackClient>;

/// Typed calls against a running DFHack instance
///
/// Implement this trait to plug a channel into the server. Every call is
/// read-only against the game. Implementations serialize calls over their
/// channel themselves; the server adds no locking.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DfHackClient: Send + Sync + 'static {
    /// DFHack version (`GetVersion`)
    async fn get_version(&self) -> Result<String>;

    /// Dwarf Fortress version (`GetDFVersion`)
    async fn get_df_version(&self) -> Result<String>;

    /// Loaded world and game mode (`GetWorldInfo`)
    async fn get_world_info(&self) -> Result<GetWorldInfoOut>;

    /// Viewport and cursor (`RemoteFortressReader::GetViewInfo`)
    async fn get_view_info(&self) -> Result<ViewInfo>;

    /// Every creature in the simulation (`RemoteFortressReader::GetUnitList`)
    async fn get_unit_list(&self) -> Result<UnitList>;

    /// Basic info for selected units (`ListUnits`)
    async fn list_units(&self, request: ListUnitsIn) -> Result<ListUnitsOut>;

    /// Tear down the channel
    async fn close(&self) -> Result<()>;
}
