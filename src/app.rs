// 应用组装 / Application assembly
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::docs::ApiDoc;
use crate::router;
use crate::service::{QueryService, StreamService};
use crate::source::{BarSource, CsvBarSource, SymbolRegistry};

/// 扫描数据目录并创建完整路由 / Scan the data directory and build the full router
pub fn build_app(config: &Config) -> Result<Router> {
    // 股票集合只在启动时计算一次 / The symbol set is computed once at startup
    let registry = SymbolRegistry::scan(&config.data.stocks_dir, &config.data.file_suffix)
        .with_context(|| {
            format!(
                "failed to scan data directory {}",
                config.data.stocks_dir.display()
            )
        })?;
    info!("✅ 已加载 {} 个股票 / {} symbols loaded", registry.len(), registry.len());

    Ok(build_router(Arc::new(registry), config))
}

/// 用已知股票集合创建路由 / Build the router from a known symbol registry
pub fn build_router(registry: Arc<SymbolRegistry>, config: &Config) -> Router {
    let source: Arc<dyn BarSource> = Arc::new(CsvBarSource::new(registry.clone()));
    let query = QueryService::new(source.clone());
    let stream = StreamService::new(source, &config.stream);

    // 创建 CORS 层
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 创建 Swagger UI
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_ui)
        .merge(router::create_router(registry, query, stream))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
