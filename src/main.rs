use stock_bar_server::{app, config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stock_bar_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("启动 Stock Bar Server...");

    // 加载配置
    let config = match config::Config::new() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ 配置加载失败: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("✅ 配置加载成功");

    // 扫描数据目录并创建路由
    let app = match app::build_app(&config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("❌ 数据目录初始化失败: {:#}", e);
            std::process::exit(1);
        }
    };

    // 绑定地址
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("❌ 绑定地址失败 {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("服务器启动成功！");
    tracing::info!("访问 http://localhost:{}/health 测试接口", config.server.port);
    tracing::info!("访问 http://localhost:{}/swagger-ui 查看 API 文档", config.server.port);
    tracing::info!("访问 ws://localhost:{}/ws?symbols=aapl,msft 订阅推送", config.server.port);

    // 启动服务器
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("❌ 服务器异常退出: {}", e);
        std::process::exit(1);
    }
}
