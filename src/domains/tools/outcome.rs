//! Result/error normalization.
//!
//! Every tool call ends in a [`CallToolResult`]: the upstream body as
//! pretty-printed JSON text on success, or a single error text item. No
//! failure escapes to the host.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;
use tracing::{error, warn};

use super::error::ToolError;

/// Convert the result of a dispatch into the tool outcome.
pub fn to_result(result: Result<Value, ToolError>) -> CallToolResult {
    match result {
        Ok(body) => success(&body),
        Err(e) => failure(e),
    }
}

/// Wrap a response body as pretty-printed JSON text, without an error flag.
pub fn success(body: &Value) -> CallToolResult {
    match serde_json::to_string_pretty(body) {
        Ok(text) => CallToolResult {
            content: vec![Content::text(text)],
            structured_content: None,
            is_error: None,
            meta: None,
        },
        Err(e) => failure(e.into()),
    }
}

/// Build the error outcome for a failed call, logging the raw error first.
///
/// Upstream API errors read `API Error: <message>`; everything else reads
/// `Error: <error>`.
pub fn failure(err: ToolError) -> CallToolResult {
    let text = match &err {
        ToolError::Api { status, message } => {
            warn!(status, "Upstream API error: {}", message);
            format!("API Error: {message}")
        }
        other => {
            error!("Tool call failed: {:?}", other);
            format!("Error: {other}")
        }
    };
    CallToolResult::error(vec![Content::text(text)])
}

/// Serialize an outcome into its wire JSON shape.
pub fn to_json(result: &CallToolResult) -> Result<Value, ToolError> {
    Ok(serde_json::to_value(result)?)
}
