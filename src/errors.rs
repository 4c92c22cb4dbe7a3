use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum LinkdropError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    CodeSpaceExhausted(String),
    Validation(String),
    NotFound(String),
}

impl LinkdropError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkdropError::DatabaseConfig(_) => "E001",
            LinkdropError::DatabaseConnection(_) => "E002",
            LinkdropError::DatabaseOperation(_) => "E003",
            LinkdropError::CodeSpaceExhausted(_) => "E004",
            LinkdropError::Validation(_) => "E005",
            LinkdropError::NotFound(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkdropError::DatabaseConfig(_) => "Database Configuration Error",
            LinkdropError::DatabaseConnection(_) => "Database Connection Error",
            LinkdropError::DatabaseOperation(_) => "Database Operation Error",
            LinkdropError::CodeSpaceExhausted(_) => "Short Code Generation Failed",
            LinkdropError::Validation(_) => "Validation Error",
            LinkdropError::NotFound(_) => "Resource Not Found",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkdropError::DatabaseConfig(msg) => msg,
            LinkdropError::DatabaseConnection(msg) => msg,
            LinkdropError::DatabaseOperation(msg) => msg,
            LinkdropError::CodeSpaceExhausted(msg) => msg,
            LinkdropError::Validation(msg) => msg,
            LinkdropError::NotFound(msg) => msg,
        }
    }

    /// 存储层故障（对外统一为 5xx）
    pub fn is_storage_fault(&self) -> bool {
        matches!(
            self,
            LinkdropError::DatabaseConfig(_)
                | LinkdropError::DatabaseConnection(_)
                | LinkdropError::DatabaseOperation(_)
                | LinkdropError::CodeSpaceExhausted(_)
        )
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            LinkdropError::Validation(_) => StatusCode::BAD_REQUEST,
            LinkdropError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkdropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkdropError {}

// 便捷的构造函数
impl LinkdropError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LinkdropError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LinkdropError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        LinkdropError::DatabaseOperation(msg.into())
    }

    pub fn code_space_exhausted<T: Into<String>>(msg: T) -> Self {
        LinkdropError::CodeSpaceExhausted(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinkdropError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkdropError::NotFound(msg.into())
    }
}

impl From<sea_orm::DbErr> for LinkdropError {
    fn from(err: sea_orm::DbErr) -> Self {
        LinkdropError::DatabaseOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkdropError>;
