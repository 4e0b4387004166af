// K线查询服务 / Bar query service
use std::sync::Arc;
use tracing::debug;

use crate::bars::{aggregate, Bar, BarError, Frequency, Result};
use crate::source::BarSource;

/// 查询服务 / Query service
///
/// 无状态: 每次请求都重新读取数据 / Stateless: every request reads the data afresh
#[derive(Clone)]
pub struct QueryService {
    source: Arc<dyn BarSource>,
}

impl QueryService {
    pub fn new(source: Arc<dyn BarSource>) -> Self {
        Self { source }
    }

    /// 查询股票K线, 并按周期重采样 / Load the symbol's bars and resample them
    pub async fn handle(&self, symbol: &str, frequency: Frequency) -> Result<Vec<Bar>> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(BarError::InvalidArgument("Symbol not specified".to_string()));
        }

        let bars = self.source.load(symbol).await?;
        let input_len = bars.len();
        let bars = aggregate(bars, frequency);
        debug!(
            "🔍 Query {} {}: {} daily bars -> {} bars",
            symbol,
            frequency,
            input_len,
            bars.len()
        );
        Ok(bars)
    }
}
