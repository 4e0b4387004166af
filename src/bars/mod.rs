// K线(日线)模块 / Price bar module
// 提供K线类型、周期枚举和重采样聚合 / Provides bar types, frequency enum and resampling aggregation

pub mod errors;
pub mod frequency;
pub mod resampler;
pub mod types;

#[cfg(test)]
pub(crate) mod tests;

// 重新导出常用类型 / Re-export commonly used types
pub use errors::{BarError, Result};
pub use frequency::Frequency;
pub use resampler::aggregate;
pub use types::{Bar, StockData};
