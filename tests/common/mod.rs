// 集成测试公共工具 / Shared integration test helpers
#![allow(dead_code)]

use axum::Router;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use stock_bar_server::config::StreamConfig;
use stock_bar_server::router::create_router;
use stock_bar_server::source::{BarSource, CsvBarSource, SymbolRegistry};
use stock_bar_server::{QueryService, StreamService};
use uuid::Uuid;

pub const HEADER: &str = "Date,Open,High,Low,Close,Volume,OpenInt\n";

/// 2020-01-06(周一) 到 2020-01-14(周二) / Monday 2020-01-06 through Tuesday 2020-01-14
pub const AAPL_ROWS: &str = "\
2020-01-06,73.45,74.99,73.19,74.95,118387200,0
2020-01-07,74.96,75.22,74.37,74.60,108872000,0
2020-01-08,74.29,76.11,74.29,75.80,132079200,0
2020-01-09,76.81,77.61,76.55,77.41,170108400,0
2020-01-10,77.65,78.17,77.06,77.58,140644800,0
2020-01-13,77.91,79.27,77.79,79.24,121532000,0
2020-01-14,79.18,79.39,78.04,78.17,161954400,0
";

pub const MSFT_ROWS: &str = "\
2020-01-06,157.08,159.10,156.51,159.03,20813700,0
2020-01-07,159.32,159.67,157.32,157.58,21634100,0
2020-01-08,158.93,160.80,157.95,160.09,27746500,0
";

/// 测试数据目录, 结束时删除 / Test data directory removed on drop
pub struct TestData {
    pub dir: PathBuf,
}

impl TestData {
    pub fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("stock_bar_test_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("aapl.us.txt"), format!("{}{}", HEADER, AAPL_ROWS)).unwrap();
        std::fs::write(dir.join("msft.us.txt"), format!("{}{}", HEADER, MSFT_ROWS)).unwrap();
        std::fs::write(dir.join("readme.md"), "not a price file").unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }
}

impl Drop for TestData {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

/// 创建路由并返回推送服务句柄 / Build the router, keeping a stream service handle
pub fn create_app(data: &TestData, pace_ms: u64) -> (Router, StreamService) {
    let registry = Arc::new(SymbolRegistry::scan(data.path(), ".us.txt").unwrap());
    let source: Arc<dyn BarSource> = Arc::new(CsvBarSource::new(registry.clone()));
    let stream = StreamService::new(
        source.clone(),
        &StreamConfig {
            pace_ms,
            channel_capacity: 8,
            max_symbols: 5,
        },
    );
    let router = create_router(registry, QueryService::new(source), stream.clone());
    (router, stream)
}

/// 在随机端口启动服务 / Serve on an ephemeral port
pub async fn spawn_server(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}
