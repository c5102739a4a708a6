//! JSON-RPC protocol types for the MCP stdio transport.
//!
//! This module defines the message structures for the server side of the
//! Model Context Protocol over JSON-RPC 2.0.
//!
//! # Protocol Overview
//!
//! - **Requests**: Client → server (`initialize`, `tools/list`, `tools/call`, `ping`)
//! - **Responses**: Server → client (result or error)
//! - **Notifications**: Client → server (`notifications/initialized`, `notifications/cancelled`)
//!
//! Classification is pure: [`classify_message`] inspects a parsed value
//! without touching the transport, so it can be tested in isolation.

use serde::{Deserialize, Serialize};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

/// An incoming JSON-RPC message from the client.
///
/// The `id` is kept as a raw value since JSON-RPC allows both numbers and
/// strings; it is echoed back verbatim in the response.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

/// What kind of JSON-RPC message a parsed value is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    /// Has `id` and `method`; expects a response.
    Request,
    /// Has `method` but no `id`; never answered.
    Notification,
    /// Neither a request nor a notification.
    Invalid,
}

/// Classify a parsed message without consuming it.
pub fn classify_message(message: &IncomingMessage) -> MessageKind {
    match (&message.id, &message.method) {
        (Some(_), Some(_)) => MessageKind::Request,
        (None, Some(_)) => MessageKind::Notification,
        _ => MessageKind::Invalid,
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    pub fn parse_error(detail: impl Into<String>) -> Self {
        Self {
            code: PARSE_ERROR,
            message: detail.into(),
            data: None,
        }
    }

    pub fn invalid_request() -> Self {
        Self {
            code: INVALID_REQUEST,
            message: "Invalid request: missing method".to_string(),
            data: None,
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: format!("Method not found: {method}"),
            data: None,
        }
    }

    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self {
            code: INVALID_PARAMS,
            message: detail.into(),
            data: None,
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: detail.into(),
            data: None,
        }
    }
}

/// JSON-RPC response sent from server → client.
#[derive(Debug, Clone, Serialize)]
pub struct OutgoingResponse {
    pub jsonrpc: &'static str,
    pub id: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl OutgoingResponse {
    pub fn success(id: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: serde_json::Value, error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// Result of the `initialize` handshake
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: &'static str,
    pub capabilities: serde_json::Value,
    pub server_info: ServerInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl InitializeResult {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION,
            capabilities: serde_json::json!({ "tools": {} }),
            server_info: ServerInfo {
                name: name.into(),
                version: version.into(),
            },
        }
    }
}

/// Result of `tools/list`
#[derive(Debug, Clone, Serialize)]
pub struct ToolsListResult {
    pub tools: Vec<serde_json::Value>,
}

/// Parameters of a `tools/call` request
#[derive(Debug, Clone, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Result of a `tools/call` request.
///
/// Execution failures (non-zero exit, timeout, spawn failure) are reported
/// here with `isError: true`, not as JSON-RPC errors.
#[derive(Debug, Clone, Serialize)]
pub struct CallToolResult {
    pub content: Vec<TextContent>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub content_type: &'static str,
    pub text: String,
}

impl CallToolResult {
    pub fn text(text: impl Into<String>, is_error: bool) -> Self {
        Self {
            content: vec![TextContent {
                content_type: "text",
                text: text.into(),
            }],
            is_error,
        }
    }
}

/// Parameters of a `notifications/cancelled` notification
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelledParams {
    pub request_id: serde_json::Value,
    #[serde(default)]
    pub reason: Option<String>,
}
