use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::defaults::{default_inherit_stderr, default_server_args, default_server_command};

/// `server:` section of the config file. Every field may be omitted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>, // Values may reference ${VAR}
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherit_stderr: Option<bool>,
}

/// How to launch the MCP server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub command: String,
    pub args: Vec<String>,
    pub env: HashMap<String, String>,
    pub inherit_stderr: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            command: default_server_command(),
            args: default_server_args(),
            env: HashMap::new(),
            inherit_stderr: default_inherit_stderr(),
        }
    }
}
