//! API 请求/响应类型

use serde::{Deserialize, Serialize};

use crate::storage::{FileSummary, Link};

/// 通用响应包装（错误响应与健康检查使用）
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// POST /links 的响应
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CreatedLinkResponse {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
}

/// GET /links 列表项
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LinkResponse {
    pub id: i64,
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub title: Option<String>,
    pub clicks: u64,
    pub created_at: String,
    pub last_access: Option<String>,
}

impl LinkResponse {
    pub fn from_link(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            short_url,
            short_code: link.short_code,
            original_url: link.long_url,
            title: link.title,
            clicks: link.clicks,
            created_at: link.created_at.to_rfc3339(),
            last_access: link.last_access.map(|t| t.to_rfc3339()),
        }
    }
}

/// POST /files 的响应
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UploadedFileResponse {
    pub id: i64,
    pub name: String,
}

/// GET /files 列表项
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FileSummaryResponse {
    pub id: i64,
    pub name: String,
    pub size: u64,
    pub date: String,
}

impl From<FileSummary> for FileSummaryResponse {
    fn from(summary: FileSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            size: summary.size,
            date: summary.date.to_rfc3339(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StatsResponse {
    pub total_files: u64,
    pub total_links: u64,
    pub status: String,
    pub timestamp: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthStorageCheck {
    pub status: String,
    pub backend: String,
    pub links_count: Option<u64>,
    pub files_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u64,
    pub storage: HealthStorageCheck,
    pub response_time_ms: u64,
}
