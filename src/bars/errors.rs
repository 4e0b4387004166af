// K线错误定义 / Bar error definitions
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BarError {
    /// 缺少必填参数 / Missing or empty required field
    #[error("参数错误 / Invalid argument: {0}")]
    InvalidArgument(String),

    /// 股票没有对应数据 / Symbol has no backing data
    #[error("Symbol not found: {symbol}")]
    NotFound { symbol: String },

    /// 文件读取错误 / File I/O error
    #[error("IO错误 / IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV 读取错误 / CSV reader error
    #[error("CSV错误 / CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// 后台读取任务失败 / Blocking reader task failed
    #[error("读取任务失败 / Reader task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl BarError {
    pub fn not_found(symbol: impl Into<String>) -> Self {
        Self::NotFound {
            symbol: symbol.into(),
        }
    }

    /// 是否为请求本身的问题(不需要打印堆栈) / Whether the caller caused it
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::NotFound { .. })
    }
}

/// Result 类型别名 / Result type alias
pub type Result<T> = std::result::Result<T, BarError>;
