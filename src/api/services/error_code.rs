//! 统一 API 错误码定义

use crate::errors::LinkdropError;

/// API 错误码，序列化为数字
///
/// 按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 链接错误
/// - 4000-4099: 文件错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    NotFound = 1004,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,

    // 链接错误 3000-3099
    LinkNotFound = 3000,
    LinkInvalidUrl = 3002,
    LinkDatabaseError = 3005,
    LinkCodeSpaceExhausted = 3007,

    // 文件错误 4000-4099
    FileNotFound = 4000,
    FileRejected = 4001,
    InvalidMultipartData = 4002,
    InvalidUploadBody = 4003,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// 链接接口的错误码
    pub fn for_link(err: &LinkdropError) -> Self {
        match err {
            LinkdropError::Validation(_) => ErrorCode::LinkInvalidUrl,
            LinkdropError::NotFound(_) => ErrorCode::LinkNotFound,
            LinkdropError::CodeSpaceExhausted(_) => ErrorCode::LinkCodeSpaceExhausted,
            e if e.is_storage_fault() => ErrorCode::LinkDatabaseError,
            e => ErrorCode::from(e),
        }
    }

    /// 文件接口的错误码
    pub fn for_file(err: &LinkdropError) -> Self {
        match err {
            LinkdropError::Validation(_) => ErrorCode::FileRejected,
            LinkdropError::NotFound(_) => ErrorCode::FileNotFound,
            e => ErrorCode::from(e),
        }
    }
}

impl From<&LinkdropError> for ErrorCode {
    fn from(err: &LinkdropError) -> Self {
        match err {
            LinkdropError::Validation(_) => ErrorCode::BadRequest,
            LinkdropError::NotFound(_) => ErrorCode::NotFound,
            _ => ErrorCode::InternalServerError,
        }
    }
}
