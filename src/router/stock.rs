// K线查询路由处理器 / Bar query route handlers
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::bars::{Frequency, StockData};
use crate::service::QueryService;
use crate::source::SymbolRegistry;
use crate::util::{ok_result, ApiError, ApiResult};

/// K线查询的共享状态 / Shared state for bar queries
#[derive(Clone)]
pub struct StockState {
    pub query: QueryService,
    pub registry: Arc<SymbolRegistry>,
}

/// K线查询参数 / Bar query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GetBarsParams {
    /// 股票代码, 不区分大小写 / Symbol, case-insensitive
    ///
    /// 示例 / Example: `aapl`
    #[serde(default)]
    pub symbol: String,

    /// 时间粒度 / Frequency
    ///
    /// 支持的粒度 / Supported frequencies:
    /// - `daily`: 日线, 原样返回(默认) / Daily, unmodified (default)
    /// - `weekly`: 周线, 周一至周日 / Weekly, Monday to Sunday
    /// - `monthly`: 月线 / Monthly
    /// - `yearly`: 年线 / Yearly
    pub frequency: Option<String>,
}

/// 股票列表响应 / Symbol list response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SymbolListResponse {
    /// 股票数量 / Number of symbols
    #[schema(example = 2)]
    pub count: usize,
    /// 按字母排序的股票代码 / Symbols in sorted order
    pub symbols: Vec<String>,
}

/// 查询K线数据 / Query bar data
///
/// 根据股票代码查询日线, 可按周/月/年重采样。
/// Query daily bars by symbol, optionally resampled to weekly/monthly/yearly.
#[utoipa::path(
    get,
    path = "/api/bars",
    params(GetBarsParams),
    responses(
        (status = 200, description = "查询成功 / Query successful", body = StockData),
        (status = 400, description = "缺少股票代码或粒度无效 / Missing symbol or invalid frequency",
         body = crate::docs::ErrorApiResponse),
        (status = 404, description = "股票不存在 / Symbol not found",
         body = crate::docs::ErrorApiResponse),
        (status = 500, description = "服务器内部错误 / Internal server error",
         body = crate::docs::ErrorApiResponse)
    ),
    tag = "bars"
)]
pub async fn get_bars(
    State(state): State<StockState>,
    Query(params): Query<GetBarsParams>,
) -> ApiResult {
    // 验证粒度参数 / Validate frequency parameter
    let frequency = match params.frequency.as_deref() {
        None | Some("") => Frequency::default(),
        Some(raw) => raw.parse::<Frequency>().map_err(ApiError::from)?,
    };

    let data = state.query.handle(&params.symbol, frequency).await?;

    Ok(Json(StockData { data }).into_response())
}

/// 已知股票列表 / Known symbols
///
/// 启动时扫描数据目录得到, 运行期间不更新。
/// Discovered from the data directory at startup; not refreshed while running.
#[utoipa::path(
    get,
    path = "/api/symbols",
    responses(
        (status = 200, description = "查询成功 / Query successful",
         body = crate::docs::ApiResponse<SymbolListResponse>)
    ),
    tag = "bars"
)]
pub async fn list_symbols(State(state): State<StockState>) -> ApiResult {
    let symbols: Vec<String> = state.registry.symbols().map(str::to_string).collect();
    let response = SymbolListResponse {
        count: symbols.len(),
        symbols,
    };

    Ok(ok_result(Ok(response)))
}

/// 创建K线查询路由 / Create bar query routes
pub fn routes() -> Router<StockState> {
    Router::new()
        .route("/", get(get_bars))
        .route("/api/bars", get(get_bars))
        .route("/api/symbols", get(list_symbols))
}
