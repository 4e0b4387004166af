use serde::Deserialize;
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub stream: StreamConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// 行情数据目录配置 / Price data directory configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// 每个股票一个文件的目录 / Directory holding one file per symbol
    pub stocks_dir: PathBuf,
    /// 文件后缀, 例如 aapl.us.txt / File suffix, e.g. aapl.us.txt
    pub file_suffix: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            stocks_dir: PathBuf::from("./Stocks"),
            file_suffix: ".us.txt".to_string(),
        }
    }
}

/// 推送配置 / Stream configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StreamConfig {
    /// 每条K线之间的间隔(毫秒) / Interval between two bars (ms)
    pub pace_ms: u64,
    /// 汇聚通道容量 / Fan-in channel capacity
    pub channel_capacity: usize,
    /// 单连接最多股票数 / Max symbols per connection
    pub max_symbols: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            pace_ms: 500,
            channel_capacity: 64,
            max_symbols: 50,
        }
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }
}
