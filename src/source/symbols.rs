// 股票列表 / Known symbol registry
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::bars::Result;

/// 启动时扫描得到的股票集合, 之后只读 / Symbol set computed once at startup, read-only afterwards
#[derive(Debug, Clone, Default)]
pub struct SymbolRegistry {
    // 小写股票名 -> 数据文件 / lowercase symbol -> data file
    entries: BTreeMap<String, PathBuf>,
}

impl SymbolRegistry {
    /// 扫描数据目录 / Scan the data directory
    ///
    /// 每个以 `suffix` 结尾的文件贡献一个股票名(去掉后缀并转小写)。
    /// Every file ending with `suffix` contributes its lowercased stem as a symbol.
    pub fn scan(dir: &Path, suffix: &str) -> Result<Self> {
        let mut entries = BTreeMap::new();

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                warn!("⚠️ Skipping non UTF-8 file name in {}", dir.display());
                continue;
            };

            let Some(stem) = strip_suffix_ignore_case(name, suffix) else {
                debug!("Skipping {}: no {} suffix", name, suffix);
                continue;
            };
            if stem.is_empty() {
                continue;
            }

            let symbol = stem.to_lowercase();
            if let Some(previous) = entries.insert(symbol.clone(), entry.path()) {
                warn!(
                    "⚠️ Duplicate data file for symbol {}: {} replaced by {}",
                    symbol,
                    previous.display(),
                    entry.path().display()
                );
            }
        }

        info!("📂 Discovered {} symbols in {}", entries.len(), dir.display());
        Ok(Self { entries })
    }

    /// 从已知文件构建 / Build from known (symbol, path) pairs
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, PathBuf)>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(symbol, path)| (symbol.as_ref().to_lowercase(), path))
                .collect(),
        }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(&symbol.to_lowercase())
    }

    /// 股票对应的数据文件 / Data file backing the symbol
    pub fn path_of(&self, symbol: &str) -> Option<&Path> {
        self.entries.get(&symbol.to_lowercase()).map(PathBuf::as_path)
    }

    /// 按字母排序的股票名 / Symbols in sorted order
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    if !name.is_char_boundary(split) {
        return None;
    }
    let (stem, tail) = name.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    use uuid::Uuid;

    /// 创建临时数据目录 / Create temporary data directory
    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("symbols_test_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_scan_registers_suffix_files_lowercase() {
        let dir = temp_dir();
        std::fs::write(dir.join("aapl.us.txt"), "").unwrap();
        std::fs::write(dir.join("MSFT.US.TXT"), "").unwrap();
        std::fs::write(dir.join("notes.md"), "").unwrap();
        std::fs::create_dir_all(dir.join("nested.us.txt")).unwrap();

        let registry = SymbolRegistry::scan(&dir, ".us.txt").unwrap();

        assert_eq!(registry.symbols().collect::<Vec<_>>(), vec!["aapl", "msft"]);
        assert!(registry.contains("AAPL"));
        assert!(registry.contains("msft"));
        assert!(!registry.contains("notes"));
        assert_eq!(registry.path_of("Aapl"), Some(dir.join("aapl.us.txt").as_path()));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_scan_missing_dir_fails() {
        let missing = std::env::temp_dir().join("symbols_test_definitely_missing_dir");
        assert!(SymbolRegistry::scan(&missing, ".us.txt").is_err());
    }

    #[test]
    fn test_strip_suffix() {
        assert_eq!(strip_suffix_ignore_case("a.us.txt", ".us.txt"), Some("a"));
        assert_eq!(strip_suffix_ignore_case("a.US.txt", ".us.txt"), Some("a"));
        assert_eq!(strip_suffix_ignore_case("txt", ".us.txt"), None);
        assert_eq!(strip_suffix_ignore_case("a.csv", ".us.txt"), None);
    }
}
