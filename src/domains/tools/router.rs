//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Every registered descriptor becomes one route; all routes share the same
//! registry and therefore the same dispatch path.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
};

use super::descriptor::EndpointDescriptor;
use super::registry::ToolRegistry;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .descriptors()
        .iter()
        .fold(ToolRouter::new(), |router, descriptor| {
            router.with_route(create_route(registry.clone(), descriptor))
        })
}

/// Create a ToolRoute for one descriptor (STDIO transport).
///
/// This transport carries no request headers, so calls always use the
/// configured credential.
fn create_route<S>(registry: Arc<ToolRegistry>, descriptor: &EndpointDescriptor) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let name = descriptor.name;
    ToolRoute::new_dyn(descriptor.to_tool(), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let registry = registry.clone();
        async move {
            registry
                .call_tool(name, args, None)
                .await
                .map_err(|e| McpError::invalid_params(e.to_string(), None))
        }
        .boxed()
    })
}
