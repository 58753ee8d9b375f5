use std::fmt;

#[derive(Debug)]
pub enum McpMenuError {
    Spawn {
        command: String,
        source: std::io::Error,
    },
    Rpc {
        code: i64,
        message: String,
    },
    TransportClosed,
    MalformedResponse(String),
    InvalidArguments(String),
    Prompt(String),
    Interrupted,
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    YamlError(serde_yaml::Error),
    Other(String),
}

impl McpMenuError {
    /// Errors the menu reports and then keeps going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, McpMenuError::InvalidArguments(_))
    }
}

impl fmt::Display for McpMenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            McpMenuError::Spawn { command, source } => {
                write!(f, "Failed to start MCP server '{}': {}", command, source)
            }
            McpMenuError::Rpc { code, message } => {
                write!(f, "MCP error {}: {}", code, message)
            }
            McpMenuError::TransportClosed => write!(f, "MCP server closed the connection"),
            McpMenuError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
            McpMenuError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            McpMenuError::Prompt(msg) => write!(f, "Prompt error: {}", msg),
            McpMenuError::Interrupted => write!(f, "Interrupted"),
            McpMenuError::IoError(e) => write!(f, "IO error: {}", e),
            McpMenuError::JsonError(e) => write!(f, "JSON error: {}", e),
            McpMenuError::YamlError(e) => write!(f, "YAML error: {}", e),
            McpMenuError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for McpMenuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            McpMenuError::Spawn { source, .. } => Some(source),
            McpMenuError::IoError(e) => Some(e),
            McpMenuError::JsonError(e) => Some(e),
            McpMenuError::YamlError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for McpMenuError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::Interrupted {
            McpMenuError::Interrupted
        } else {
            McpMenuError::IoError(err)
        }
    }
}

impl From<serde_json::Error> for McpMenuError {
    fn from(err: serde_json::Error) -> Self {
        McpMenuError::JsonError(err)
    }
}

impl From<serde_yaml::Error> for McpMenuError {
    fn from(err: serde_yaml::Error) -> Self {
        McpMenuError::YamlError(err)
    }
}

impl From<anyhow::Error> for McpMenuError {
    fn from(err: anyhow::Error) -> Self {
        McpMenuError::Other(format!("{:#}", err))
    }
}

impl From<String> for McpMenuError {
    fn from(msg: String) -> Self {
        McpMenuError::Other(msg)
    }
}

impl From<&str> for McpMenuError {
    fn from(msg: &str) -> Self {
        McpMenuError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, McpMenuError>;
