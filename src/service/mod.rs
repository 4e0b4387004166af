// 业务服务模块 / Service module
// 查询服务: 数据源 + 重采样 / Query service: bar source then resampler
// 推送服务: 每个股票一个定时子流, 汇聚到一个连接 / Stream service: one paced sub-stream per symbol, fanned into one connection

pub mod query;
pub mod stream;

#[cfg(test)]
mod tests;

pub use query::QueryService;
pub use stream::{EventSink, StreamEnd, StreamEvent, StreamService, StreamSummary};
