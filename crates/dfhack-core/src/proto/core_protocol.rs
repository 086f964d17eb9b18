//! `dfproto` core protocol messages (CoreProtocol.proto)

/// Request body for method id 0 (BindMethod)
#[derive(Clone, PartialEq, prost::Message)]
pub struct CoreBindRequest {
    #[prost(string, required, tag = "1")]
    pub method: String,
    #[prost(string, required, tag = "2")]
    pub input_msg: String,
    #[prost(string, required, tag = "3")]
    pub output_msg: String,
    #[prost(string, optional, tag = "4")]
    pub plugin: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CoreBindReply {
    #[prost(int32, required, tag = "1")]
    pub assigned_id: i32,
}

/// Console output pushed by the game while a call is running
#[derive(Clone, PartialEq, prost::Message)]
pub struct CoreTextNotification {
    #[prost(message, repeated, tag = "1")]
    pub fragments: Vec<CoreTextFragment>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CoreTextFragment {
    #[prost(string, required, tag = "1")]
    pub text: String,
    #[prost(int32, optional, tag = "2")]
    pub color: Option<i32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct EmptyMessage {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct StringMessage {
    #[prost(string, required, tag = "1")]
    pub value: String,
}
