// Library 模块导出
// Library Module Exports

pub mod app;
pub mod bars;
pub mod config;
pub mod docs;
pub mod router;
pub mod service;
pub mod source;
pub mod util;

// Re-export commonly used types
// 重导出常用类型
pub use bars::{aggregate, Bar, BarError, Frequency, StockData};
pub use service::{QueryService, StreamService};
pub use source::{BarSource, CsvBarSource, SymbolRegistry};
