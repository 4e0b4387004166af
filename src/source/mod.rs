// 行情数据源模块 / Bar source module
// 启动时扫描数据目录, 按需从CSV文件读取K线 / Scans the data directory once at startup and reads bars from CSV files on demand

pub mod csv_source;
pub mod symbols;

use async_trait::async_trait;

use crate::bars::{Bar, Result};

pub use csv_source::CsvBarSource;
pub use symbols::SymbolRegistry;

/// K线数据源trait / Bar source trait
#[async_trait]
pub trait BarSource: Send + Sync {
    /// 按时间顺序加载该股票的全部日线 / Load the symbol's full daily bar sequence in file order
    ///
    /// 股票名不区分大小写, 未知股票返回 `BarError::NotFound`。
    /// Symbols match case-insensitively; unknown symbols fail with `BarError::NotFound`.
    async fn load(&self, symbol: &str) -> Result<Vec<Bar>>;
}
