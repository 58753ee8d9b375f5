use serde_json::{Map, Value};
use tracing::debug;

use super::coerce::{coerce_arguments, validate_arguments};
use crate::error::{McpMenuError, Result};
use crate::mcp::types::McpTool;
use crate::mcp::{McpToolCall, McpToolResult, Peer};
use crate::ui::Prompter;

/// Ask for one value per declared parameter, in schema order. Every value is
/// kept as the text the user typed.
pub async fn collect_arguments<U>(tool: &McpTool, prompter: &mut U) -> Result<Map<String, Value>>
where
    U: Prompter + ?Sized,
{
    let mut arguments = Map::new();

    for parameter in tool.parameters() {
        let value = prompter
            .input(&format!(
                "Enter value for {} ({})",
                parameter.name, parameter.type_tag
            ))
            .await?;
        arguments.insert(parameter.name, Value::String(value));
    }

    Ok(arguments)
}

/// Collect arguments and issue exactly one `tools/call`.
///
/// With `coerce` set, the collected text is converted by declared type and
/// checked against the input schema first; a failure there returns
/// `InvalidArguments` without contacting the server.
pub async fn invoke_tool<P, U>(
    peer: &P,
    prompter: &mut U,
    tool: &McpTool,
    coerce: bool,
) -> Result<McpToolResult>
where
    P: Peer + ?Sized,
    U: Prompter + ?Sized,
{
    let mut arguments = collect_arguments(tool, prompter).await?;

    if coerce {
        arguments = coerce_arguments(tool, arguments)?;
        validate_arguments(tool, &arguments)?;
    }

    debug!(tool = %tool.name, arguments = arguments.len(), "calling tool");
    let tool_call = McpToolCall {
        name: tool.name.clone(),
        arguments,
    };
    peer.call_tool(&tool_call).await
}

/// Text of the first content block.
pub fn render_tool_result(result: &McpToolResult) -> Result<String> {
    let first = result.content.first().ok_or_else(|| {
        McpMenuError::MalformedResponse("tool result has no content".to_string())
    })?;

    first.text.clone().ok_or_else(|| {
        McpMenuError::MalformedResponse(format!(
            "first tool content block is '{}', not text",
            first.content_type
        ))
    })
}
