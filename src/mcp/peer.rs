use async_trait::async_trait;

use super::types::{
    McpPrompt, McpResource, McpResourceTemplate, McpTool, McpToolCall, McpToolResult,
    ResourceReadResponse,
};
use crate::error::Result;

/// The request/response operations the menu needs from a connected server.
#[async_trait]
pub trait Peer: Send + Sync {
    async fn list_tools(&self) -> Result<Vec<McpTool>>;

    async fn list_resources(&self) -> Result<Vec<McpResource>>;

    async fn list_prompts(&self) -> Result<Vec<McpPrompt>>;

    async fn list_resource_templates(&self) -> Result<Vec<McpResourceTemplate>>;

    async fn call_tool(&self, tool_call: &McpToolCall) -> Result<McpToolResult>;

    async fn read_resource(&self, uri: &str) -> Result<ResourceReadResponse>;
}
