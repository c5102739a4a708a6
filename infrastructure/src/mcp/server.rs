//! MCP server loop over newline-delimited JSON-RPC.
//!
//! Reads one message per line from the transport, answers protocol methods
//! inline, and runs each `tools/call` on its own task so a slow GAM command
//! never blocks `ping` or a second call. All writes go through a single
//! writer task; tool output reaches the client only as a response payload.

use crate::mcp::protocol::{
    CallToolParams, CallToolResult, CancelledParams, IncomingMessage, InitializeResult,
    MessageKind, OutgoingResponse, RpcError, ToolsListResult, classify_message,
};
use crate::tools::schema::all_tools_schema;
use gam_application::ToolDispatcher;
use gam_domain::ToolCall;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// The MCP server: owns the dispatcher and the transport loop.
pub struct McpServer {
    dispatcher: Arc<ToolDispatcher>,
    server_name: String,
    server_version: String,
}

impl McpServer {
    pub fn new(dispatcher: Arc<ToolDispatcher>) -> Self {
        Self {
            dispatcher,
            server_name: env!("CARGO_PKG_NAME").to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Serve on stdin/stdout until the client closes stdin.
    pub async fn serve_stdio(self) -> std::io::Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve on arbitrary transports. Returns once the reader reaches EOF
    /// and all in-flight calls have finished.
    pub async fn serve<R, W>(self, reader: R, writer: W) -> std::io::Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel::<String>();
        let writer_task = tokio::spawn(write_loop(writer, rx));

        // Cancellation tokens for in-flight tools/call requests, keyed by
        // the request id's JSON rendering.
        let in_flight: Arc<Mutex<HashMap<String, CancellationToken>>> =
            Arc::new(Mutex::new(HashMap::new()));
        let mut calls = JoinSet::new();

        let mut lines = BufReader::new(reader).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let message: IncomingMessage = match serde_json::from_str(&line) {
                Ok(m) => m,
                Err(e) => {
                    warn!("Unparseable message: {e}");
                    send(
                        &tx,
                        OutgoingResponse::failure(
                            serde_json::Value::Null,
                            RpcError::parse_error(e.to_string()),
                        ),
                    );
                    continue;
                }
            };

            match classify_message(&message) {
                MessageKind::Request => {
                    self.handle_request(message, &tx, &in_flight, &mut calls);
                }
                MessageKind::Notification => {
                    self.handle_notification(message, &in_flight);
                }
                MessageKind::Invalid => {
                    // A method-less frame carrying an id still expects an
                    // answer; without one the client waits on that id forever.
                    if let Some(id) = message.id {
                        send(&tx, OutgoingResponse::failure(id, RpcError::invalid_request()));
                    } else {
                        warn!("Message is neither request nor notification");
                    }
                }
            }
        }

        // Drain outstanding calls so their responses reach the writer.
        while calls.join_next().await.is_some() {}
        drop(tx);
        let _ = writer_task.await;
        Ok(())
    }

    fn handle_request(
        &self,
        message: IncomingMessage,
        tx: &mpsc::UnboundedSender<String>,
        in_flight: &Arc<Mutex<HashMap<String, CancellationToken>>>,
        calls: &mut JoinSet<()>,
    ) {
        let id = message.id.unwrap_or(serde_json::Value::Null);
        let method = message.method.unwrap_or_default();
        debug!(method = %method, "request");

        match method.as_str() {
            "initialize" => {
                let result = InitializeResult::new(&self.server_name, &self.server_version);
                send(
                    tx,
                    OutgoingResponse::success(id, serde_json::json!(result)),
                );
            }
            "ping" => {
                send(tx, OutgoingResponse::success(id, serde_json::json!({})));
            }
            "tools/list" => {
                let result = ToolsListResult {
                    tools: all_tools_schema(self.dispatcher.tool_spec()),
                };
                send(
                    tx,
                    OutgoingResponse::success(id, serde_json::json!(result)),
                );
            }
            "tools/call" => {
                let params: CallToolParams = match message
                    .params
                    .ok_or_else(|| "missing params".to_string())
                    .and_then(|p| serde_json::from_value(p).map_err(|e| e.to_string()))
                {
                    Ok(p) => p,
                    Err(e) => {
                        send(
                            tx,
                            OutgoingResponse::failure(id, RpcError::invalid_params(e)),
                        );
                        return;
                    }
                };

                let token = CancellationToken::new();
                let key = id.to_string();
                if let Ok(mut map) = in_flight.lock() {
                    map.insert(key.clone(), token.clone());
                }

                let dispatcher = Arc::clone(&self.dispatcher);
                let tx = tx.clone();
                let in_flight = Arc::clone(in_flight);
                calls.spawn(async move {
                    let call = ToolCall {
                        tool_name: params.name,
                        arguments: params
                            .arguments
                            .unwrap_or_default()
                            .into_iter()
                            .collect(),
                    };

                    let response = match dispatcher.dispatch(call, &token).await {
                        Ok(result) => OutgoingResponse::success(
                            id,
                            serde_json::json!(CallToolResult::text(result.text, result.is_error)),
                        ),
                        Err(e) => {
                            OutgoingResponse::failure(id, RpcError::invalid_params(e.to_string()))
                        }
                    };

                    if let Ok(mut map) = in_flight.lock() {
                        map.remove(&key);
                    }
                    send(&tx, response);
                });
            }
            other => {
                send(
                    tx,
                    OutgoingResponse::failure(id, RpcError::method_not_found(other)),
                );
            }
        }
    }

    fn handle_notification(
        &self,
        message: IncomingMessage,
        in_flight: &Arc<Mutex<HashMap<String, CancellationToken>>>,
    ) {
        let method = message.method.unwrap_or_default();
        match method.as_str() {
            "notifications/initialized" => {
                debug!("client initialized");
            }
            "notifications/cancelled" => {
                let Some(params) = message
                    .params
                    .and_then(|p| serde_json::from_value::<CancelledParams>(p).ok())
                else {
                    return;
                };
                let key = params.request_id.to_string();
                let token = in_flight.lock().ok().and_then(|mut map| map.remove(&key));
                if let Some(token) = token {
                    debug!(request_id = %key, "cancelling in-flight call");
                    token.cancel();
                }
            }
            other => {
                debug!(method = %other, "ignoring notification");
            }
        }
    }
}

fn send(tx: &mpsc::UnboundedSender<String>, response: OutgoingResponse) {
    match serde_json::to_string(&response) {
        Ok(line) => {
            let _ = tx.send(line);
        }
        Err(e) => warn!("Could not serialize response: {e}"),
    }
}

async fn write_loop<W: AsyncWrite + Unpin>(mut writer: W, mut rx: mpsc::UnboundedReceiver<String>) {
    while let Some(line) = rx.recv().await {
        if writer.write_all(line.as_bytes()).await.is_err() {
            break;
        }
        if writer.write_all(b"\n").await.is_err() {
            break;
        }
        let _ = writer.flush().await;
    }
}
