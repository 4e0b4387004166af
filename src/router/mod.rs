pub mod health;
pub mod stock;
pub mod stream;

use axum::Router;
use std::sync::Arc;

use crate::service::{QueryService, StreamService};
use crate::source::SymbolRegistry;

/// 创建所有路由
pub fn create_router(
    registry: Arc<SymbolRegistry>,
    query: QueryService,
    stream: StreamService,
) -> Router {
    let stock_state = stock::StockState {
        query,
        registry: registry.clone(),
    };
    let stream_state = stream::StreamState {
        stream: stream.clone(),
    };
    let health_state = health::HealthState { registry, stream };

    Router::new()
        .merge(health::routes().with_state(health_state))
        .merge(stock::routes().with_state(stock_state))
        .merge(stream::routes().with_state(stream_state))
}
