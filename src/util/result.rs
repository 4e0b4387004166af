use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::error;

use crate::bars::BarError;

/// API 统一响应结果类型
pub type ApiResult = Result<Response, ApiError>;

/// 统一响应格式
#[derive(Debug, Serialize, Deserialize)]
pub struct CommonResult<T: Serialize> {
    /// 响应状态码
    pub code: u32,
    /// 响应消息
    pub msg: String,
    /// 响应数据（成功时包含数据，失败时为 None）
    pub data: Option<T>,
}

impl<T: Serialize> CommonResult<T> {
    /// 自定义响应
    pub fn default(code: u32, msg: String, data: Option<T>) -> Self {
        CommonResult { code, msg, data }
    }

    /// 成功响应（带数据）
    pub fn ok(data: T) -> Self {
        Self::default(200, "success".to_string(), Some(data))
    }

    /// 错误响应（无数据）
    pub fn error(code: u32, msg: String) -> Self {
        Self::default(code, msg, None)
    }
}

impl<T: Serialize> IntoResponse for CommonResult<T> {
    fn into_response(self) -> Response {
        // HTTP 状态码与 code 一致 / HTTP status mirrors `code`
        let status = u16::try_from(self.code)
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// 处理 Result 类型，自动将 Result<T, ApiError> 转换为响应
pub fn ok_result<T: Serialize>(result: Result<T, ApiError>) -> Response {
    match result {
        Ok(data) => CommonResult::ok(data).into_response(),
        Err(err) => err.into_response(),
    }
}

/// API 错误枚举
#[derive(Debug)]
pub enum ApiError {
    /// 请求错误
    BadRequest(String),
    /// 请求参数错误
    RequestParamError(String),
    /// 资源不存在
    NotFound(String),
    /// 内部错误
    InternalError(String),
}

impl ApiError {
    /// 判断是否为业务错误（不需要打印堆栈）
    pub fn is_business_error(&self) -> bool {
        matches!(
            self,
            ApiError::BadRequest(_) | ApiError::RequestParamError(_) | ApiError::NotFound(_)
        )
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(e) => write!(f, "请求错误: {}", e),
            ApiError::RequestParamError(e) => write!(f, "参数错误: {}", e),
            ApiError::NotFound(e) => write!(f, "未找到: {}", e),
            ApiError::InternalError(e) => write!(f, "内部错误: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

/// K线错误转换 / Bar error conversion
impl From<BarError> for ApiError {
    fn from(e: BarError) -> Self {
        match e {
            BarError::InvalidArgument(msg) => Self::BadRequest(msg),
            BarError::NotFound { .. } => Self::NotFound("Symbol not found".to_string()),
            other => {
                error!("读取行情数据失败 / Failed to read bar data: {}", other);
                Self::InternalError(other.to_string())
            }
        }
    }
}

/// 构建错误响应的辅助函数
fn error(code: u32, msg: String) -> Response {
    CommonResult::<()>::error(code, msg).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // 记录系统错误的详细信息
        if !self.is_business_error() {
            error!("系统错误: {:?}", self);
        }

        match self {
            Self::NotFound(e) => error(404, e),
            Self::BadRequest(e) => error(400, e),
            Self::RequestParamError(e) => error(400, format!("参数错误：{}", e)),
            Self::InternalError(e) => error(500, format!("内部错误：{}", e)),
        }
    }
}
