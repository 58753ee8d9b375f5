pub mod client;
pub mod peer;
pub mod types;

pub use client::McpClient;
pub use peer::Peer;
pub use types::{McpToolCall, McpToolResult, ResourceReadResponse};
