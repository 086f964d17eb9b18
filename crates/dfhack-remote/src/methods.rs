//! Remote methods called by the facade

use dfhack_core::proto::CoreBindRequest;

/// A remote method as identified to `BindMethod`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RemoteMethod {
    /// `None` for methods built into the DFHack core
    pub plugin: Option<&'static str>,
    pub name: &'static str,
    /// Fully qualified input message type
    pub input: &'static str,
    /// Fully qualified output message type
    pub output: &'static str,
}

impl RemoteMethod {
    pub const fn core(name: &'static str, input: &'static str, output: &'static str) -> Self {
        Self {
            plugin: None,
            name,
            input,
            output,
        }
    }

    pub const fn plugin(
        plugin: &'static str,
        name: &'static str,
        input: &'static str,
        output: &'static str,
    ) -> Self {
        Self {
            plugin: Some(plugin),
            name,
            input,
            output,
        }
    }

    pub fn bind_request(&self) -> CoreBindRequest {
        CoreBindRequest {
            method: self.name.to_string(),
            input_msg: self.input.to_string(),
            output_msg: self.output.to_string(),
            plugin: self.plugin.map(str::to_string),
        }
    }
}

const EMPTY: &str = "dfproto.EmptyMessage";
const RFR: &str = "RemoteFortressReader";

pub const GET_VERSION: RemoteMethod =
    RemoteMethod::core("GetVersion", EMPTY, "dfproto.StringMessage");
pub const GET_DF_VERSION: RemoteMethod =
    RemoteMethod::core("GetDFVersion", EMPTY, "dfproto.StringMessage");
pub const GET_WORLD_INFO: RemoteMethod =
    RemoteMethod::core("GetWorldInfo", EMPTY, "dfproto.GetWorldInfoOut");
pub const LIST_UNITS: RemoteMethod =
    RemoteMethod::core("ListUnits", "dfproto.ListUnitsIn", "dfproto.ListUnitsOut");
pub const GET_UNIT_LIST: RemoteMethod =
    RemoteMethod::plugin(RFR, "GetUnitList", EMPTY, "RemoteFortressReader.UnitList");
pub const GET_VIEW_INFO: RemoteMethod =
    RemoteMethod::plugin(RFR, "GetViewInfo", EMPTY, "RemoteFortressReader.ViewInfo");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_method_bind_request() {
        let request = GET_VIEW_INFO.bind_request();
        assert_eq!(request.method, "GetViewInfo");
        assert_eq!(request.plugin.as_deref(), Some("RemoteFortressReader"));
        assert_eq!(request.output_msg, "RemoteFortressReader.ViewInfo");

        assert_eq!(LIST_UNITS.bind_request().plugin, None);
    }
}
