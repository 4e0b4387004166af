// 服务测试 / Service tests

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

use crate::bars::{Bar, BarError, Result};
use crate::source::BarSource;

/// 内存数据源 / In-memory bar source
#[derive(Default)]
pub struct MemoryBarSource {
    data: HashMap<String, Vec<Bar>>,
    broken: HashSet<String>,
}

impl MemoryBarSource {
    pub fn with_symbol(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(symbol.to_lowercase(), bars);
        self
    }

    /// 读取时返回IO错误的股票 / Symbol whose reads fail with an I/O error
    pub fn with_broken(mut self, symbol: &str) -> Self {
        self.broken.insert(symbol.to_lowercase());
        self
    }
}

#[async_trait]
impl BarSource for MemoryBarSource {
    async fn load(&self, symbol: &str) -> Result<Vec<Bar>> {
        let key = symbol.to_lowercase();
        if self.broken.contains(&key) {
            return Err(BarError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "truncated file",
            )));
        }
        self.data
            .get(&key)
            .cloned()
            .ok_or_else(|| BarError::not_found(symbol))
    }
}
