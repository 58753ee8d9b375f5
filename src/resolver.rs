//! Resource URI resolution: fill `{placeholder}` tokens interactively, read the
//! resulting URI once and pretty-print its JSON payload.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::{McpMenuError, Result};
use crate::mcp::{Peer, ResourceReadResponse};
use crate::ui::Prompter;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{[^}]+\}").expect("valid placeholder pattern"))
}

/// Every placeholder token in `uri`, braces included, left to right.
/// Repeated tokens are returned once per occurrence.
pub fn placeholders(uri: &str) -> Vec<&str> {
    placeholder_pattern()
        .find_iter(uri)
        .map(|m| m.as_str())
        .collect()
}

/// `{id}` -> `id`
pub fn placeholder_name(token: &str) -> &str {
    let token = token.strip_prefix('{').unwrap_or(token);
    token.strip_suffix('}').unwrap_or(token)
}

/// Prompt once per placeholder occurrence and substitute each answer for the
/// first remaining literal occurrence of that token. No escaping is applied.
pub async fn resolve_uri<U>(uri: &str, prompter: &mut U) -> Result<String>
where
    U: Prompter + ?Sized,
{
    let mut final_uri = uri.to_string();

    for token in placeholders(uri) {
        let name = placeholder_name(token);
        let value = prompter.input(&format!("Enter value for {}", name)).await?;
        final_uri = final_uri.replacen(token, &value, 1);
    }

    Ok(final_uri)
}

/// Pretty-print the first content entry, which must carry JSON text.
pub fn render_resource(response: &ResourceReadResponse) -> Result<String> {
    let first = response.contents.first().ok_or_else(|| {
        McpMenuError::MalformedResponse("resource read returned no contents".to_string())
    })?;

    let text = first.text.as_deref().ok_or_else(|| {
        McpMenuError::MalformedResponse(format!("resource {} has no text payload", first.uri))
    })?;

    let value: Value = serde_json::from_str(text).map_err(|e| {
        McpMenuError::MalformedResponse(format!("resource {} is not JSON: {}", first.uri, e))
    })?;

    Ok(serde_json::to_string_pretty(&value)?)
}

/// Resolve `uri`, issue exactly one read and render the payload.
pub async fn read_resource<P, U>(peer: &P, prompter: &mut U, uri: &str) -> Result<String>
where
    P: Peer + ?Sized,
    U: Prompter + ?Sized,
{
    let resolved = resolve_uri(uri, prompter).await?;
    debug!(template = %uri, uri = %resolved, "reading resource");

    let response = peer.read_resource(&resolved).await?;
    render_resource(&response)
}
