// K线推送 WebSocket 路由 / Bar stream WebSocket routes
use async_trait::async_trait;
use axum::{
    extract::{
        ws::{close_code, CloseFrame, Message, WebSocket, WebSocketUpgrade},
        Path, Query, State,
    },
    routing::get,
    Router,
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use serde::Deserialize;
use tracing::{debug, info, warn};
use utoipa::IntoParams;

use crate::service::{EventSink, StreamEnd, StreamEvent, StreamService};
use crate::util::{ApiError, ApiResult};

/// 推送路由的共享状态 / Shared state for stream routes
#[derive(Clone)]
pub struct StreamState {
    pub stream: StreamService,
}

/// 多股票推送参数 / Multi-symbol stream parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StreamParams {
    /// 逗号分隔的股票代码, 允许重复 / Comma-separated symbols, duplicates allowed
    ///
    /// 示例 / Example: `aapl,msft`
    #[serde(default)]
    pub symbols: String,
}

/// WebSocket 写入端 / WebSocket outbound sink
struct WsEventSink {
    sender: SplitSink<WebSocket, Message>,
}

#[async_trait]
impl EventSink for WsEventSink {
    async fn send(&mut self, event: &StreamEvent) -> anyhow::Result<()> {
        let text = serde_json::to_string(event)?;
        self.sender.send(Message::Text(text)).await?;
        Ok(())
    }
}

/// 推送多个股票 / Stream several symbols
///
/// 每个股票一个子流, 每条日线一个 JSON 文本帧; 未知股票只推送一条错误事件。
/// One sub-stream per symbol, one JSON text frame per daily bar; an unknown symbol
/// produces a single error event. The server closes the socket when every sub-stream is done.
#[utoipa::path(
    get,
    path = "/ws",
    params(StreamParams),
    responses(
        (status = 101, description = "升级为 WebSocket / Switching to WebSocket",
         body = crate::service::StreamEvent),
        (status = 400, description = "缺少股票代码或数量超限 / Missing symbols or too many",
         body = crate::docs::ErrorApiResponse)
    ),
    tag = "stream"
)]
pub async fn stream_symbols(
    State(state): State<StreamState>,
    Query(params): Query<StreamParams>,
    ws: WebSocketUpgrade,
) -> ApiResult {
    let symbols = StreamService::parse_symbols(&params.symbols);
    upgrade(state, symbols, ws)
}

/// 推送单个股票 / Stream one symbol
#[utoipa::path(
    get,
    path = "/ws/{symbol}",
    params(("symbol" = String, Path, description = "股票代码 / Symbol")),
    responses(
        (status = 101, description = "升级为 WebSocket / Switching to WebSocket",
         body = crate::service::StreamEvent)
    ),
    tag = "stream"
)]
pub async fn stream_symbol(
    State(state): State<StreamState>,
    Path(symbol): Path<String>,
    ws: WebSocketUpgrade,
) -> ApiResult {
    // 路径变体只推送一个股票 / The path variant streams exactly one symbol
    let symbols: Vec<String> = Some(symbol.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .into_iter()
        .collect();
    upgrade(state, symbols, ws)
}

fn upgrade(state: StreamState, symbols: Vec<String>, ws: WebSocketUpgrade) -> ApiResult {
    if symbols.is_empty() {
        return Err(ApiError::BadRequest("Symbol not specified".to_string()));
    }
    let max_symbols = state.stream.max_symbols();
    if symbols.len() > max_symbols {
        return Err(ApiError::RequestParamError(format!(
            "too many symbols: {}, at most {}",
            symbols.len(),
            max_symbols
        )));
    }

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state.stream, symbols)))
}

async fn handle_socket(socket: WebSocket, service: StreamService, symbols: Vec<String>) {
    info!("🔌 Stream connection opened: {:?}", symbols);
    let (sender, mut receiver) = socket.split();
    let mut sink = WsEventSink { sender };

    // 客户端消息只用于检测断开 / Inbound frames only signal disconnect
    let disconnected = async move {
        while let Some(message) = receiver.next().await {
            match message {
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(other) => debug!("Ignoring client frame: {:?}", other),
            }
        }
    };

    let summary = service.run(symbols, &mut sink, disconnected).await;

    let frame = match summary.end {
        StreamEnd::Completed => Some(CloseFrame {
            code: close_code::NORMAL,
            reason: "done".into(),
        }),
        StreamEnd::SourceFailed => Some(CloseFrame {
            code: close_code::ERROR,
            reason: "failed to read bar data".into(),
        }),
        StreamEnd::Disconnected | StreamEnd::SinkFailed => None,
    };

    if let Some(frame) = frame {
        if let Err(e) = sink.sender.send(Message::Close(Some(frame))).await {
            warn!("Failed to send close frame: {}", e);
        }
    }
    info!("🔌 Stream connection closed after {} events", summary.events_sent);
}

/// 创建推送路由 / Create stream routes
pub fn routes() -> Router<StreamState> {
    Router::new()
        .route("/ws", get(stream_symbols))
        .route("/ws/:symbol", get(stream_symbol))
}
