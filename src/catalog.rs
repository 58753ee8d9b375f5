use futures::future::try_join4;
use tracing::debug;

use crate::error::Result;
use crate::mcp::types::{McpPrompt, McpResource, McpResourceTemplate, McpTool};
use crate::mcp::Peer;

/// Everything the server advertised at startup. Read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub tools: Vec<McpTool>,
    pub resources: Vec<McpResource>,
    pub prompts: Vec<McpPrompt>,
    pub resource_templates: Vec<McpResourceTemplate>,
}

impl Catalog {
    /// Issue the four list queries together. Any failure fails the whole load.
    pub async fn load<P: Peer + ?Sized>(peer: &P) -> Result<Self> {
        let (tools, resources, prompts, resource_templates) = try_join4(
            peer.list_tools(),
            peer.list_resources(),
            peer.list_prompts(),
            peer.list_resource_templates(),
        )
        .await?;

        debug!(
            tools = tools.len(),
            resources = resources.len(),
            prompts = prompts.len(),
            resource_templates = resource_templates.len(),
            "capability catalog loaded"
        );

        Ok(Self {
            tools,
            resources,
            prompts,
            resource_templates,
        })
    }

    pub fn find_tool(&self, name: &str) -> Option<&McpTool> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    /// Match a picked identifier against concrete resource URIs first, then
    /// template URIs, by exact string equality.
    pub fn find_resource_uri(&self, identifier: &str) -> Option<&str> {
        self.resources
            .iter()
            .find(|resource| resource.uri == identifier)
            .map(|resource| resource.uri.as_str())
            .or_else(|| {
                self.resource_templates
                    .iter()
                    .find(|template| template.uri_template == identifier)
                    .map(|template| template.uri_template.as_str())
            })
    }
}
