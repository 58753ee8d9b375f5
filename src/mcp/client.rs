use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::peer::Peer;
use super::types::{
    InitializeResult, JsonRpcMessage, McpPrompt, McpResource, McpResourceTemplate, McpTool,
    McpToolCall, McpToolResult, PromptListResponse, ResourceListResponse, ResourceReadResponse,
    ResourceTemplateListResponse, ServerInfo, ToolListResponse,
};
use crate::config::{expand_env_vars, ServerConfig};
use crate::error::{McpMenuError, Result};

// MCP Protocol constants
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
const CLIENT_NAME: &str = "mcpmenu";
const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

const METHOD_NOT_FOUND: i64 = -32601;

type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;
type PendingMap = HashMap<u64, oneshot::Sender<Result<Value>>>;

/// JSON-RPC client for one MCP server over a line-delimited duplex stream.
pub struct McpClient {
    process: StdMutex<Option<Child>>,
    writer: Arc<Mutex<BoxedWriter>>,
    pending: Arc<Mutex<PendingMap>>,
    closed: Arc<AtomicBool>,
    next_id: AtomicU64,
    reader_task: JoinHandle<()>,
    server_info: Option<ServerInfo>,
}

impl McpClient {
    /// Spawn the configured server process and complete the handshake.
    pub async fn spawn(config: &ServerConfig) -> Result<Self> {
        let mut cmd = Command::new(&config.command);
        cmd.args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .kill_on_drop(true);

        if config.inherit_stderr {
            cmd.stderr(Stdio::inherit());
        } else {
            cmd.stderr(Stdio::null());
        }

        // Values are never logged, only the names.
        for (key, value) in expand_env_vars(&config.env) {
            debug!(var = %key, "setting server env var");
            cmd.env(key, value);
        }

        debug!(command = %config.command, args = ?config.args, "spawning MCP server");
        let mut process = cmd.spawn().map_err(|source| McpMenuError::Spawn {
            command: config.command.clone(),
            source,
        })?;

        let stdin = process.stdin.take().ok_or("MCP server stdin unavailable")?;
        let stdout = process
            .stdout
            .take()
            .ok_or("MCP server stdout unavailable")?;

        let mut client = Self::start(stdout, stdin, Some(process));
        client.initialize().await?;
        Ok(client)
    }

    /// Complete the handshake over an already connected stream pair.
    pub async fn connect<R, W>(reader: R, writer: W) -> Result<Self>
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let mut client = Self::start(reader, writer, None);
        client.initialize().await?;
        Ok(client)
    }

    fn start<R, W>(reader: R, writer: W, process: Option<Child>) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let writer: Arc<Mutex<BoxedWriter>> = Arc::new(Mutex::new(Box::new(writer)));
        let pending: Arc<Mutex<PendingMap>> = Arc::new(Mutex::new(HashMap::new()));
        let closed = Arc::new(AtomicBool::new(false));

        let reader_task = tokio::spawn(read_loop(
            BufReader::new(reader),
            Arc::clone(&writer),
            Arc::clone(&pending),
            Arc::clone(&closed),
        ));

        Self {
            process: StdMutex::new(process),
            writer,
            pending,
            closed,
            next_id: AtomicU64::new(1),
            reader_task,
            server_info: None,
        }
    }

    async fn initialize(&mut self) -> Result<()> {
        let init_params = json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": {
                "sampling": {}
            },
            "clientInfo": {
                "name": CLIENT_NAME,
                "version": CLIENT_VERSION
            }
        });

        let response = self.send_request("initialize", Some(init_params)).await?;
        let init_result: InitializeResult = serde_json::from_value(response)?;

        debug!(
            server = %init_result.server_info.name,
            version = %init_result.server_info.version,
            protocol = %init_result.protocol_version,
            "connected to MCP server"
        );
        self.server_info = Some(init_result.server_info);

        self.send_notification("notifications/initialized", None).await
    }

    pub fn server_info(&self) -> Option<&ServerInfo> {
        self.server_info.as_ref()
    }

    pub async fn send_request(&self, method: &str, params: Option<Value>) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = oneshot::channel();

        {
            let mut pending = self.pending.lock().await;
            if self.closed.load(Ordering::SeqCst) {
                return Err(McpMenuError::TransportClosed);
            }
            pending.insert(id, tx);
        }

        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params.unwrap_or(json!({}))
        });

        debug!(id, method, "sending request");
        if let Err(e) = write_message(&self.writer, &request).await {
            self.pending.lock().await.remove(&id);
            return Err(e);
        }

        rx.await.map_err(|_| McpMenuError::TransportClosed)?
    }

    pub async fn send_notification(&self, method: &str, params: Option<Value>) -> Result<()> {
        let notification = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params.unwrap_or(json!({}))
        });

        write_message(&self.writer, &notification).await
    }

    pub async fn shutdown(&mut self) {
        self.reader_task.abort();
        let process = self.process.get_mut().ok().and_then(Option::take);
        if let Some(mut process) = process {
            if let Err(e) = process.kill().await {
                warn!(error = %e, "failed to stop MCP server");
            }
        }
    }
}

impl Drop for McpClient {
    fn drop(&mut self) {
        self.reader_task.abort();
        if let Ok(Some(process)) = self.process.get_mut().map(Option::as_mut) {
            let _ = process.start_kill();
        }
    }
}

async fn write_message(writer: &Mutex<BoxedWriter>, message: &Value) -> Result<()> {
    let mut line = serde_json::to_string(message)?;
    line.push('\n');

    let mut writer = writer.lock().await;
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

async fn read_loop<R>(
    mut reader: BufReader<R>,
    writer: Arc<Mutex<BoxedWriter>>,
    pending: Arc<Mutex<PendingMap>>,
    closed: Arc<AtomicBool>,
) where
    R: AsyncRead + Unpin,
{
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => break,
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                match serde_json::from_str::<JsonRpcMessage>(trimmed) {
                    Ok(message) => dispatch(message, &writer, &pending).await,
                    Err(e) => warn!(error = %e, "ignoring unparseable line from server"),
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to read from MCP server");
                break;
            }
        }
    }

    closed.store(true, Ordering::SeqCst);
    // Dropping the senders wakes every waiter with TransportClosed.
    pending.lock().await.clear();
    debug!("MCP server stream closed");
}

async fn dispatch(
    message: JsonRpcMessage,
    writer: &Mutex<BoxedWriter>,
    pending: &Mutex<PendingMap>,
) {
    if let Some(method) = message.method {
        match message.id {
            Some(id) => answer_server_request(writer, id, &method).await,
            None => debug!(method = %method, "server notification"),
        }
        return;
    }

    let Some(id) = message.id.as_ref().and_then(Value::as_u64) else {
        warn!("response without a usable id");
        return;
    };

    let Some(tx) = pending.lock().await.remove(&id) else {
        warn!(id, "response for unknown request");
        return;
    };

    let outcome = match (message.result, message.error) {
        (_, Some(error)) => Err(McpMenuError::Rpc {
            code: error.code,
            message: error.message,
        }),
        (Some(result), None) => Ok(result),
        (None, None) => Err(McpMenuError::MalformedResponse(format!(
            "response {} has neither result nor error",
            id
        ))),
    };
    debug!(id, ok = outcome.is_ok(), "received response");
    let _ = tx.send(outcome);
}

async fn answer_server_request(writer: &Mutex<BoxedWriter>, id: Value, method: &str) {
    let reply = if method == "ping" {
        json!({ "jsonrpc": "2.0", "id": id, "result": {} })
    } else {
        debug!(method, "declining server request");
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {
                "code": METHOD_NOT_FOUND,
                "message": format!("Method not found: {}", method)
            }
        })
    };

    if let Err(e) = write_message(writer, &reply).await {
        warn!(error = %e, "failed to answer server request");
    }
}

#[async_trait]
impl Peer for McpClient {
    async fn list_tools(&self) -> Result<Vec<McpTool>> {
        let response = self.send_request("tools/list", None).await?;
        let list: ToolListResponse = serde_json::from_value(response)?;
        Ok(list.tools)
    }

    async fn list_resources(&self) -> Result<Vec<McpResource>> {
        let response = self.send_request("resources/list", None).await?;
        let list: ResourceListResponse = serde_json::from_value(response)?;
        Ok(list.resources)
    }

    async fn list_prompts(&self) -> Result<Vec<McpPrompt>> {
        let response = self.send_request("prompts/list", None).await?;
        let list: PromptListResponse = serde_json::from_value(response)?;
        Ok(list.prompts)
    }

    async fn list_resource_templates(&self) -> Result<Vec<McpResourceTemplate>> {
        let response = self.send_request("resources/templates/list", None).await?;
        let list: ResourceTemplateListResponse = serde_json::from_value(response)?;
        Ok(list.resource_templates)
    }

    async fn call_tool(&self, tool_call: &McpToolCall) -> Result<McpToolResult> {
        let params = json!({
            "name": tool_call.name,
            "arguments": tool_call.arguments,
        });

        let response = self.send_request("tools/call", Some(params)).await?;
        let result: McpToolResult = serde_json::from_value(response)?;
        Ok(result)
    }

    async fn read_resource(&self, uri: &str) -> Result<ResourceReadResponse> {
        let params = json!({
            "uri": uri,
        });

        let response = self.send_request("resources/read", Some(params)).await?;
        let resource_read: ResourceReadResponse = serde_json::from_value(response)?;
        Ok(resource_read)
    }
}
