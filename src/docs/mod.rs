use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{OpenApi, ToSchema};

/// API 统一响应格式（用于 Swagger 文档）
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(title = "ApiResponse", description = "API 统一响应格式")]
pub struct ApiResponse<T>
where
    T: ToSchema + Serialize,
{
    /// 响应状态码：200=成功，其他=错误
    #[schema(example = 200)]
    pub code: u32,

    /// 响应消息
    #[schema(example = "success")]
    pub msg: String,

    /// 响应数据，成功时包含具体数据，失败时为 null
    pub data: Option<T>,
}

/// 错误响应格式（用于 Swagger 文档）
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(title = "ErrorApiResponse", description = "错误响应格式")]
pub struct ErrorApiResponse {
    /// 响应状态码：非200表示错误
    pub code: u32,

    /// 错误消息
    pub msg: String,

    /// 错误时数据为空
    pub data: Option<Value>,
}

/// OpenAPI 文档配置
#[derive(OpenApi)]
#[openapi(
    paths(
        // 路由函数列表
        crate::router::health::health,
        crate::router::stock::get_bars,
        crate::router::stock::list_symbols,
        crate::router::stream::stream_symbols,
        crate::router::stream::stream_symbol,
    ),
    components(
        schemas(
            // 响应结构体列表
            crate::router::health::HealthResponse,
            crate::router::stock::SymbolListResponse,
            crate::bars::Bar,
            crate::bars::StockData,
            crate::bars::Frequency,
            crate::service::StreamEvent,
            ErrorApiResponse,
        )
    ),
    tags(
        (name = "system", description = "系统相关接口"),
        (name = "bars", description = "K线查询接口 / Bar query endpoints"),
        (name = "stream", description = "K线推送接口 / Bar stream endpoints"),
    ),
    info(
        title = "Stock Bar Server API",
        version = "0.1.0",
        description = "历史K线查询与推送 API 文档 / Historical bar query and stream API"
    )
)]
pub struct ApiDoc;
