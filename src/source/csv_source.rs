// CSV K线数据源 / CSV-backed bar source
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use super::symbols::SymbolRegistry;
use super::BarSource;
use crate::bars::{Bar, BarError, Result};

/// 文件中的原始行 / Raw row as stored in the file
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Date", alias = "date")]
    date: String,
    #[serde(rename = "Open", alias = "open")]
    open: f64,
    #[serde(rename = "High", alias = "high")]
    high: f64,
    #[serde(rename = "Low", alias = "low")]
    low: f64,
    #[serde(rename = "Close", alias = "close")]
    close: f64,
    #[serde(rename = "Volume", alias = "volume")]
    volume: u64,
    #[serde(rename = "OpenInt", alias = "openint", alias = "open_interest")]
    open_interest: u64,
}

/// 每个股票一个CSV文件的数据源 / Bar source backed by one CSV file per symbol
pub struct CsvBarSource {
    registry: Arc<SymbolRegistry>,
}

impl CsvBarSource {
    pub fn new(registry: Arc<SymbolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SymbolRegistry {
        &self.registry
    }
}

#[async_trait]
impl BarSource for CsvBarSource {
    async fn load(&self, symbol: &str) -> Result<Vec<Bar>> {
        let path = self
            .registry
            .path_of(symbol)
            .ok_or_else(|| BarError::not_found(symbol))?
            .to_path_buf();

        // 文件读取是阻塞IO / File reading is blocking I/O
        let bars = tokio::task::spawn_blocking(move || read_bars(&path)).await??;
        debug!("📊 Loaded {} bars for {}", bars.len(), symbol);
        Ok(bars)
    }
}

/// 按文件顺序读取K线, 跳过无法解析的行 / Read bars in file order, skipping rows that fail to parse
pub fn read_bars(path: &Path) -> Result<Vec<Bar>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)?;

    let mut bars = Vec::new();
    let mut skipped = 0usize;

    for (index, record) in reader.deserialize::<RawRecord>().enumerate() {
        // 第1行是表头 / Line 1 is the header
        let line = index + 2;
        let raw = match record {
            Ok(raw) => raw,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("⚠️ Skipping malformed row {} in {}: {}", line, path.display(), e);
                skipped += 1;
                continue;
            }
        };

        let Some(date) = parse_date(&raw.date) else {
            warn!(
                "⚠️ Skipping row {} in {}: invalid date {:?}",
                line,
                path.display(),
                raw.date
            );
            skipped += 1;
            continue;
        };

        bars.push(Bar {
            date,
            open: raw.open,
            high: raw.high,
            low: raw.low,
            close: raw.close,
            volume: raw.volume,
            open_interest: raw.open_interest,
        });
    }

    if skipped > 0 {
        warn!("⚠️ {} rows skipped in {}", skipped, path.display());
    }

    Ok(bars)
}

/// 解析日期字段 / Parse the date field
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
}
