//! 响应构建帮助函数

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, error};
use serde::Serialize;
use tracing::error;

use crate::errors::LinkdropError;

use super::error_code::ErrorCode;
use super::types::ApiResponse;

/// 直接序列化数据的 JSON 响应
pub fn json_response<T: Serialize>(status: StatusCode, data: &T) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(data)
}

pub fn success_response<T: Serialize>(data: &T) -> HttpResponse {
    json_response(StatusCode::OK, data)
}

pub fn created_response<T: Serialize>(data: &T) -> HttpResponse {
    json_response(StatusCode::CREATED, data)
}

/// 错误响应：`{code, message}`
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response(
        status,
        &ApiResponse::<()> {
            code: error_code.as_i32(),
            message: message.to_string(),
            data: None,
        },
    )
}

/// 从 LinkdropError 构建错误响应
///
/// 存储故障对外只返回通用消息，详情写入日志。
pub fn error_from_linkdrop(err: &LinkdropError, error_code: ErrorCode) -> HttpResponse {
    let status = err.http_status();
    if err.is_storage_fault() {
        error!("{}", err.format_simple());
        return error_response(status, error_code, "Internal storage error");
    }
    error_response(status, error_code, err.message())
}

/// JSON 解析失败时返回统一错误体
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> error::Error {
    let message = format!("Invalid JSON body: {}", err);
    let response = error_response(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, &message);
    error::InternalError::from_response(err, response).into()
}

/// 未匹配路由
pub async fn not_found_handler() -> HttpResponse {
    error_response(
        StatusCode::NOT_FOUND,
        ErrorCode::NotFound,
        "Resource not found",
    )
}
