#![allow(dead_code)]

use async_trait::async_trait;
use mcpmenu::mcp::types::{
    McpPrompt, McpResource, McpResourceTemplate, McpTool, McpToolCall, McpToolResult,
    ResourceContents, ResourceReadResponse, ToolContent,
};
use mcpmenu::mcp::Peer;
use mcpmenu::ui::{Choice, Console, Prompter};
use mcpmenu::{McpMenuError, Result};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// In-memory server that records every request it receives.
#[derive(Default)]
pub struct FakePeer {
    pub tools: Vec<McpTool>,
    pub resources: Vec<McpResource>,
    pub prompts: Vec<McpPrompt>,
    pub resource_templates: Vec<McpResourceTemplate>,
    pub tool_result: Option<McpToolResult>,
    pub resource_response: Option<ResourceReadResponse>,
    pub fail_method: Option<&'static str>,
    pub calls: Mutex<Vec<String>>,
    pub tool_calls: Mutex<Vec<McpToolCall>>,
    pub read_uris: Mutex<Vec<String>>,
}

impl FakePeer {
    fn record(&self, method: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(method.to_string());
        if self.fail_method == Some(method) {
            return Err(McpMenuError::Rpc {
                code: -32603,
                message: format!("{} failed", method),
            });
        }
        Ok(())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Peer for FakePeer {
    async fn list_tools(&self) -> Result<Vec<McpTool>> {
        self.record("tools/list")?;
        Ok(self.tools.clone())
    }

    async fn list_resources(&self) -> Result<Vec<McpResource>> {
        self.record("resources/list")?;
        Ok(self.resources.clone())
    }

    async fn list_prompts(&self) -> Result<Vec<McpPrompt>> {
        self.record("prompts/list")?;
        Ok(self.prompts.clone())
    }

    async fn list_resource_templates(&self) -> Result<Vec<McpResourceTemplate>> {
        self.record("resources/templates/list")?;
        Ok(self.resource_templates.clone())
    }

    async fn call_tool(&self, tool_call: &McpToolCall) -> Result<McpToolResult> {
        self.record("tools/call")?;
        self.tool_calls.lock().unwrap().push(tool_call.clone());
        Ok(self
            .tool_result
            .clone()
            .unwrap_or_else(|| text_result("ok")))
    }

    async fn read_resource(&self, uri: &str) -> Result<ResourceReadResponse> {
        self.record("resources/read")?;
        self.read_uris.lock().unwrap().push(uri.to_string());
        Ok(self
            .resource_response
            .clone()
            .unwrap_or_else(|| json_contents(uri, "{}")))
    }
}

/// Replays canned answers; runs out with `Interrupted`, like Ctrl-C in a prompt.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub selects: Arc<Mutex<Vec<(String, Vec<Choice>)>>>,
    pub inputs: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    fn next(&mut self) -> Result<String> {
        self.answers.pop_front().ok_or(McpMenuError::Interrupted)
    }

    pub fn input_messages(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn select(&mut self, message: &str, choices: &[Choice]) -> Result<String> {
        self.selects
            .lock()
            .unwrap()
            .push((message.to_string(), choices.to_vec()));
        self.next()
    }

    async fn input(&mut self, message: &str) -> Result<String> {
        self.inputs.lock().unwrap().push(message.to_string());
        self.next()
    }
}

/// Clonable in-memory writer for capturing console output.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Console writing to two buffers, colors off.
pub fn capture_console() -> (Console, SharedBuffer, SharedBuffer) {
    colored::control::set_override(false);
    let out = SharedBuffer::default();
    let err = SharedBuffer::default();
    (Console::new(out.clone(), err.clone()), out, err)
}

pub fn tool(name: &str, schema: Value) -> McpTool {
    serde_json::from_value(json!({
        "name": name,
        "description": format!("{} tool", name),
        "inputSchema": schema,
    }))
    .unwrap()
}

pub fn resource(name: &str, uri: &str) -> McpResource {
    McpResource {
        uri: uri.to_string(),
        name: name.to_string(),
        description: None,
        mime_type: Some("application/json".to_string()),
    }
}

pub fn template(name: &str, uri_template: &str) -> McpResourceTemplate {
    McpResourceTemplate {
        uri_template: uri_template.to_string(),
        name: name.to_string(),
        description: None,
        mime_type: None,
    }
}

pub fn text_result(text: &str) -> McpToolResult {
    McpToolResult {
        content: vec![ToolContent {
            content_type: "text".to_string(),
            text: Some(text.to_string()),
        }],
        is_error: None,
    }
}

pub fn json_contents(uri: &str, text: &str) -> ResourceReadResponse {
    ResourceReadResponse {
        contents: vec![ResourceContents {
            uri: uri.to_string(),
            mime_type: Some("application/json".to_string()),
            text: Some(text.to_string()),
            blob: None,
        }],
    }
}
