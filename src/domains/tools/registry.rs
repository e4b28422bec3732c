//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of endpoint descriptors, keyed by unique tool name
//! - Startup validation of every registered descriptor
//! - Dispatch of tool calls through the shared API client

use std::collections::HashMap;

use rmcp::model::{CallToolResult, Tool};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use super::adapter::{self, Invocation};
use super::client::ApiClient;
use super::definitions::ENDPOINTS;
use super::descriptor::EndpointDescriptor;
use super::error::ToolError;
use super::outcome;
use crate::core::config::Config;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - holds every callable operation.
///
/// Descriptors are immutable once registered; the registry is shared
/// read-only by concurrent invocations.
pub struct ToolRegistry {
    client: ApiClient,
    descriptors: Vec<EndpointDescriptor>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Create an empty registry around the given client.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            descriptors: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create a registry holding every Notion endpoint.
    pub fn from_config(config: &Config) -> crate::core::Result<Self> {
        let client = ApiClient::new(&config.api)?;
        Ok(Self::with_descriptors(client, ENDPOINTS)?)
    }

    /// Create a registry holding the given descriptors.
    pub fn with_descriptors(
        client: ApiClient,
        descriptors: &[EndpointDescriptor],
    ) -> Result<Self, ToolError> {
        let mut registry = Self::new(client);
        for descriptor in descriptors {
            registry.register(*descriptor)?;
        }
        Ok(registry)
    }

    /// Register one descriptor.
    ///
    /// Fails on a duplicate name or an inconsistent descriptor; both are
    /// configuration errors surfaced at startup.
    pub fn register(&mut self, descriptor: EndpointDescriptor) -> Result<(), ToolError> {
        if self.index.contains_key(descriptor.name) {
            return Err(ToolError::DuplicateTool(descriptor.name.to_string()));
        }
        descriptor.validate()?;
        debug!("Registered tool {}", descriptor.name);
        self.index.insert(descriptor.name, self.descriptors.len());
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Look up a descriptor by tool name.
    pub fn get(&self, name: &str) -> Option<&EndpointDescriptor> {
        self.index.get(name).map(|&i| &self.descriptors[i])
    }

    /// All descriptors, in registration order.
    pub fn descriptors(&self) -> &[EndpointDescriptor] {
        &self.descriptors
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.descriptors.iter().map(|d| d.name).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools(&self) -> Vec<Tool> {
        self.descriptors.iter().map(EndpointDescriptor::to_tool).collect()
    }

    /// Run one invocation and return the raw upstream body.
    pub async fn invoke(&self, name: &str, invocation: &Invocation) -> Result<Value, ToolError> {
        let descriptor = self.get(name).ok_or_else(|| ToolError::not_found(name))?;
        adapter::dispatch(&self.client, descriptor, invocation).await
    }

    /// Call a tool and normalize the result.
    ///
    /// Only an unknown tool name is reported as `Err`; every other failure
    /// becomes an error outcome.
    #[instrument(skip(self, arguments, credential))]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
        credential: Option<String>,
    ) -> Result<CallToolResult, ToolError> {
        if self.get(name).is_none() {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        }
        let invocation = Invocation::new(arguments).with_credential(credential);
        Ok(outcome::to_result(self.invoke(name, &invocation).await))
    }

    /// Call a tool with arguments that have not been checked to be an object.
    ///
    /// `null` is treated as an empty argument set.
    pub async fn call_tool_value(
        &self,
        name: &str,
        arguments: Value,
        credential: Option<String>,
    ) -> Result<CallToolResult, ToolError> {
        match arguments {
            Value::Object(map) => self.call_tool(name, map, credential).await,
            Value::Null => self.call_tool(name, Map::new(), credential).await,
            _ if self.get(name).is_none() => Err(ToolError::not_found(name)),
            _ => Ok(outcome::failure(ToolError::invalid_arguments(
                "arguments must be a JSON object",
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ApiConfig;
    use crate::domains::tools::definitions::{databases, pages, users};
    use crate::domains::tools::test_support::MockApi;
    use rmcp::model::RawContent;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    fn registry_for(base_url: &str) -> ToolRegistry {
        let config = ApiConfig::with_token("secret_default").base_url(base_url);
        let client = ApiClient::new(&config).unwrap();
        ToolRegistry::with_descriptors(client, ENDPOINTS).unwrap()
    }

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            other => panic!("expected text content, got {:?}", other),
        }
    }

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = registry_for("http://localhost:1");
        let names = registry.tool_names();
        assert_eq!(names.len(), 20);
        assert!(names.contains(&"get-user"));
        assert!(names.contains(&"post-database-query"));
        assert!(names.contains(&"retrieve-a-page"));
        assert!(names.contains(&"create-a-comment"));
        assert!(names.contains(&"retrieve-a-file-upload"));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let client = ApiClient::new(&ApiConfig::with_token("t")).unwrap();
        let result =
            ToolRegistry::with_descriptors(client, &[users::GET_USER, users::GET_USER]);
        assert!(matches!(result, Err(ToolError::DuplicateTool(name)) if name == "get-user"));
    }

    #[test]
    fn test_invalid_descriptor_rejected() {
        let mut registry = ToolRegistry::new(ApiClient::new(&ApiConfig::with_token("t")).unwrap());
        let broken = EndpointDescriptor {
            path: "/v1/pages/{id}",
            ..pages::RETRIEVE_A_PAGE
        };
        assert_err!(registry.register(broken));
        assert!(registry.get("retrieve-a-page").is_none());
    }

    #[test]
    fn test_tools_metadata() {
        let registry = registry_for("http://localhost:1");
        let tools = registry.get_all_tools();
        assert_eq!(tools.len(), registry.descriptors().len());
        assert_eq!(tools[0].name, "get-user");
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry = registry_for("http://localhost:1");
        let err = registry.call_tool("nope", Map::new(), None).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
        assert_eq!(err.to_string(), "Unknown tool: nope");
    }

    #[tokio::test]
    async fn test_retrieve_page_request() {
        let api = MockApi::start(200, json!({"object": "page", "id": "abc123"})).await;
        let registry = registry_for(&api.base_url);

        let result = assert_ok!(
            registry
                .call_tool("retrieve-a-page", args(json!({"pageId": "abc123"})), None)
                .await
        );
        assert!(result.is_error.is_none());

        let requests = api.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].path, "/v1/pages/abc123");
        assert_eq!(requests[0].query, None);
        assert_eq!(requests[0].authorization.as_deref(), Some("Bearer secret_default"));
        assert_eq!(requests[0].header("accept"), Some("application/json"));
        assert_eq!(requests[0].header("notion-version"), Some("2022-06-28"));
        assert!(requests[0].body.is_none());
    }

    #[tokio::test]
    async fn test_database_query_request() {
        let api = MockApi::start(200, json!({"results": []})).await;
        let registry = registry_for(&api.base_url);

        let result = registry
            .call_tool(
                "post-database-query",
                args(json!({"databaseId": "db1", "pageSize": 10})),
                None,
            )
            .await
            .unwrap();
        assert!(result.is_error.is_none());

        let requests = api.requests();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/v1/databases/db1/query");
        assert_eq!(requests[0].body, Some(json!({"page_size": 10})));
        assert_eq!(requests[0].header("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_query_parameters_sent() {
        let api = MockApi::start(200, json!({"results": []})).await;
        let registry = registry_for(&api.base_url);

        registry
            .call_tool(
                "get-users",
                args(json!({"startCursor": "abc", "pageSize": 25})),
                None,
            )
            .await
            .unwrap();

        let requests = api.requests();
        assert_eq!(requests[0].path, "/v1/users");
        assert_eq!(requests[0].query.as_deref(), Some("start_cursor=abc&page_size=25"));
    }

    #[tokio::test]
    async fn test_caller_credential_scoped_to_call() {
        let api = MockApi::start(200, json!({})).await;
        let registry = registry_for(&api.base_url);

        let (with_caller, without_caller) = tokio::join!(
            registry.call_tool("get-self", Map::new(), Some("caller_token".to_string())),
            registry.call_tool("get-user", args(json!({"userId": "u1"})), None),
        );
        assert_ok!(with_caller);
        assert_ok!(without_caller);

        let requests = api.requests();
        assert_eq!(requests.len(), 2);
        let auth_for = |path: &str| {
            requests
                .iter()
                .find(|r| r.path == path)
                .and_then(|r| r.authorization.clone())
        };
        assert_eq!(auth_for("/v1/users/me").as_deref(), Some("Bearer caller_token"));
        assert_eq!(auth_for("/v1/users/u1").as_deref(), Some("Bearer secret_default"));
    }

    #[tokio::test]
    async fn test_success_outcome_text() {
        let api = MockApi::start(200, json!({"id": "x"})).await;
        let registry = registry_for(&api.base_url);

        let result = registry
            .call_tool("retrieve-a-block", args(json!({"blockId": "x"})), None)
            .await
            .unwrap();
        assert_eq!(text_of(&result), "{\n  \"id\": \"x\"\n}");
    }

    #[tokio::test]
    async fn test_api_error_outcome() {
        let api = MockApi::start(404, json!({"message": "not found"})).await;
        let registry = registry_for(&api.base_url);

        let result = registry
            .call_tool("retrieve-a-page", args(json!({"pageId": "missing"})), None)
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "API Error: not found");
    }

    #[tokio::test]
    async fn test_api_error_without_message() {
        let api = MockApi::start(500, json!({"code": "internal"})).await;
        let registry = registry_for(&api.base_url);

        let result = registry
            .call_tool("delete-a-block", args(json!({"blockId": "b1"})), None)
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text_of(&result),
            "API Error: Request failed with status code 500"
        );
        assert_eq!(api.requests()[0].method, "DELETE");
    }

    #[tokio::test]
    async fn test_api_error_with_empty_message() {
        let api = MockApi::start(400, json!({"message": ""})).await;
        let registry = registry_for(&api.base_url);

        let result = registry
            .call_tool("retrieve-a-database", args(json!({"databaseId": "d1"})), None)
            .await
            .unwrap();
        assert_eq!(
            text_of(&result),
            "API Error: Request failed with status code 400"
        );
    }

    #[tokio::test]
    async fn test_transport_error_outcome() {
        // Nothing listens on port 1.
        let registry = registry_for("http://127.0.0.1:1");
        let result = registry
            .call_tool("get-self", Map::new(), None)
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).starts_with("Error: Request failed"));
    }

    #[tokio::test]
    async fn test_missing_argument_sends_nothing() {
        let api = MockApi::start(200, json!({})).await;
        let registry = registry_for(&api.base_url);

        let result = registry
            .call_tool("update-a-database", Map::new(), None)
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn test_non_object_arguments() {
        let registry = registry_for("http://localhost:1");
        let result = registry
            .call_tool_value("get-self", json!([1, 2]), None)
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert_err!(registry.call_tool_value("nope", json!("x"), None).await);
    }

    #[tokio::test]
    async fn test_invoke_returns_raw_body() {
        let api = MockApi::start(200, json!({"object": "page"})).await;
        let registry = registry_for(&api.base_url);

        let invocation = Invocation::new(args(json!({
            "pageId": "p1",
            "page_id": "p1",
            "inTrash": true
        })));
        let body = registry.invoke(pages::PATCH_PAGE.name, &invocation).await.unwrap();
        assert_eq!(body, json!({"object": "page"}));

        let requests = api.requests();
        assert_eq!(requests[0].method, "PATCH");
        assert_eq!(requests[0].path, "/v1/pages/p1");
        assert_eq!(requests[0].body, Some(json!({"in_trash": true})));
    }

    #[tokio::test]
    async fn test_update_database_without_fields_sends_empty_body() {
        let api = MockApi::start(200, json!({})).await;
        let registry = registry_for(&api.base_url);

        let invocation = Invocation::new(args(json!({"databaseId": "d1"})));
        registry
            .invoke(databases::UPDATE_A_DATABASE.name, &invocation)
            .await
            .unwrap();

        let requests = api.requests();
        assert_eq!(requests[0].path, "/v1/databases/d1");
        assert_eq!(requests[0].body, Some(json!({})));
    }
}
