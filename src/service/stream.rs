// K线推送服务 / Bar stream service
//
// 每个请求的股票一个子流任务, 按固定间隔发送日线; 所有子流通过一个通道汇聚,
// 由单个写循环串行写入连接。
// One task per requested symbol emits daily bars at a fixed pace; all sub-streams
// fan into one channel that a single writer loop drains into the connection.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};
use utoipa::ToSchema;

use crate::bars::{Bar, BarError};
use crate::config::StreamConfig;
use crate::source::BarSource;

/// K线事件 / Bar event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BarEvent {
    /// 请求多个股票时回显股票名 / Echoed when several symbols were requested
    #[serde(rename = "Symbol", default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(flatten)]
    pub bar: Bar,
}

/// 子流错误事件 / In-band sub-stream error event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorEvent {
    #[serde(rename = "Symbol")]
    pub symbol: String,
    pub code: u16,
    pub error: String,
}

/// 推送到连接上的事件 / Event written to the connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum StreamEvent {
    Bar(BarEvent),
    Error(ErrorEvent),
}

impl StreamEvent {
    pub fn symbol(&self) -> Option<&str> {
        match self {
            StreamEvent::Bar(e) => e.symbol.as_deref(),
            StreamEvent::Error(e) => Some(e.symbol.as_str()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StreamEvent::Error(_))
    }
}

/// 事件写入端, 同一时间只接受一次写入 / Outbound sink, one write at a time
#[async_trait]
pub trait EventSink: Send {
    async fn send(&mut self, event: &StreamEvent) -> anyhow::Result<()>;
}

/// 子流状态 / Sub-stream state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubStreamState {
    Idle,
    Validating,
    Streaming,
    /// 终态: 未知股票或读取失败 / Terminal: unknown symbol or reader failure
    Error,
    /// 终态: 全部发送 / Terminal: every bar sent
    Done,
}

/// 连接结束原因 / Why the connection ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamEnd {
    /// 所有子流结束 / Every sub-stream finished
    #[default]
    Completed,
    /// 对端断开 / Peer disconnected
    Disconnected,
    /// 写入失败 / Write to the connection failed
    SinkFailed,
    /// 数据读取失败 / Record reader failed
    SourceFailed,
}

/// 一次推送连接的统计 / Summary of one stream connection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamSummary {
    pub events_sent: usize,
    pub completed: usize,
    pub errored: usize,
    pub end: StreamEnd,
}

enum SubStreamMessage {
    Event(StreamEvent),
    Fatal { symbol: String, error: BarError },
}

struct SubStreamOutcome {
    state: SubStreamState,
}

/// 单个股票的定时子流 / Paced sub-stream for one symbol
struct SubStream {
    symbol: String,
    echo_symbol: bool,
    pace: Duration,
    source: Arc<dyn BarSource>,
    tx: mpsc::Sender<SubStreamMessage>,
    state: SubStreamState,
}

impl SubStream {
    fn transition(&mut self, next: SubStreamState) {
        debug!("🔁 Sub-stream {}: {:?} -> {:?}", self.symbol, self.state, next);
        self.state = next;
    }

    fn finish(mut self, terminal: SubStreamState) -> SubStreamOutcome {
        self.transition(terminal);
        SubStreamOutcome { state: self.state }
    }

    async fn run(mut self) -> SubStreamOutcome {
        self.transition(SubStreamState::Validating);

        let bars = match self.source.load(&self.symbol).await {
            Ok(bars) => bars,
            Err(error) if error.is_client_error() => {
                info!("🚫 Unknown symbol in stream request: {}", self.symbol);
                let event = StreamEvent::Error(ErrorEvent {
                    symbol: self.symbol.clone(),
                    code: 404,
                    error: "Symbol not found".to_string(),
                });
                let _ = self.tx.send(SubStreamMessage::Event(event)).await;
                return self.finish(SubStreamState::Error);
            }
            Err(error) => {
                let message = SubStreamMessage::Fatal {
                    symbol: self.symbol.clone(),
                    error,
                };
                let _ = self.tx.send(message).await;
                return self.finish(SubStreamState::Error);
            }
        };

        self.transition(SubStreamState::Streaming);

        // 第一次 tick 立即完成, 之后每个间隔一次 / First tick completes immediately, then once per pace
        let mut ticker = interval(self.pace);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let total = bars.len();
        for (sent, bar) in bars.into_iter().enumerate() {
            ticker.tick().await;
            let event = StreamEvent::Bar(BarEvent {
                symbol: self.echo_symbol.then(|| self.symbol.clone()),
                bar,
            });
            if self.tx.send(SubStreamMessage::Event(event)).await.is_err() {
                debug!("Sub-stream {} stopped after {}/{} bars", self.symbol, sent, total);
                break;
            }
        }

        self.finish(SubStreamState::Done)
    }
}

/// 活跃连接计数守卫 / Active connection counter guard
struct ActiveGuard(Arc<AtomicUsize>);

impl ActiveGuard {
    fn new(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// 推送服务 / Stream service
#[derive(Clone)]
pub struct StreamService {
    source: Arc<dyn BarSource>,
    pace: Duration,
    channel_capacity: usize,
    max_symbols: usize,
    active: Arc<AtomicUsize>,
}

impl StreamService {
    pub fn new(source: Arc<dyn BarSource>, config: &StreamConfig) -> Self {
        Self {
            source,
            // tokio interval 不接受零间隔 / tokio interval rejects a zero period
            pace: Duration::from_millis(config.pace_ms.max(1)),
            channel_capacity: config.channel_capacity.max(1),
            max_symbols: config.max_symbols,
            active: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn pace(&self) -> Duration {
        self.pace
    }

    pub fn max_symbols(&self) -> usize {
        self.max_symbols
    }

    /// 当前打开的推送连接数 / Currently open stream connections
    pub fn active_streams(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// 解析逗号分隔的股票列表 / Parse a comma-separated symbol list
    ///
    /// 保留顺序和重复项, 去掉空白项 / Keeps order and duplicates, drops blank entries
    pub fn parse_symbols(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// 推送请求的股票直到全部结束或对端断开 / Stream the symbols until all finish or the peer disconnects
    ///
    /// 每个股票一个子流任务, 未知股票只产生一个错误事件, 不影响其他子流。
    /// Each symbol gets its own task; an unknown symbol yields one error event without
    /// affecting the others. Returning always leaves no sub-stream task running.
    pub async fn run<S, D>(&self, symbols: Vec<String>, sink: &mut S, disconnected: D) -> StreamSummary
    where
        S: EventSink + ?Sized,
        D: Future<Output = ()> + Send,
    {
        let _guard = ActiveGuard::new(&self.active);
        let echo_symbol = symbols.len() > 1;
        info!("📡 Stream started for {:?}", symbols);

        let (tx, mut rx) = mpsc::channel(self.channel_capacity);
        let mut tasks = JoinSet::new();
        for symbol in symbols {
            let sub_stream = SubStream {
                symbol,
                echo_symbol,
                pace: self.pace,
                source: Arc::clone(&self.source),
                tx: tx.clone(),
                state: SubStreamState::Idle,
            };
            tasks.spawn(sub_stream.run());
        }
        // 只保留子流持有的发送端 / Only sub-streams hold senders from here on
        drop(tx);

        tokio::pin!(disconnected);
        let mut summary = StreamSummary::default();

        summary.end = loop {
            tokio::select! {
                biased;
                _ = &mut disconnected => break StreamEnd::Disconnected,
                message = rx.recv() => match message {
                    Some(SubStreamMessage::Event(event)) => {
                        if let Err(e) = sink.send(&event).await {
                            warn!("❌ Failed to send stream event: {}", e);
                            break StreamEnd::SinkFailed;
                        }
                        summary.events_sent += 1;
                    }
                    Some(SubStreamMessage::Fatal { symbol, error }) => {
                        error!("❌ Reader failed for {}: {}", symbol, error);
                        break StreamEnd::SourceFailed;
                    }
                    None => break StreamEnd::Completed,
                },
            }
        };

        if summary.end != StreamEnd::Completed {
            tasks.abort_all();
        }
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => match outcome.state {
                    SubStreamState::Done => summary.completed += 1,
                    SubStreamState::Error => summary.errored += 1,
                    SubStreamState::Idle | SubStreamState::Validating | SubStreamState::Streaming => {}
                },
                Err(e) if e.is_cancelled() => {}
                Err(e) => error!("❌ Sub-stream task failed: {}", e),
            }
        }

        info!(
            "✅ Stream finished: {:?}, {} events, {} completed, {} errored",
            summary.end, summary.events_sent, summary.completed, summary.errored
        );
        summary
    }
}
