use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 短链接记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub short_code: String,
    pub long_url: String,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_access: Option<DateTime<Utc>>,

    #[serde(default)]
    pub clicks: u64,
}

/// 待插入的短链接
#[derive(Debug, Clone)]
pub struct NewLink {
    pub short_code: String,
    pub long_url: String,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 已存储的文件（包含内容）
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub id: i64,
    pub stored_name: String,
    pub original_name: String,
    pub content: Vec<u8>,
    pub content_type: String,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// 待插入的文件
#[derive(Debug, Clone)]
pub struct NewFile {
    pub stored_name: String,
    pub original_name: String,
    pub content: Vec<u8>,
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
}

/// 文件元数据（列表用，不含内容）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileSummary {
    pub id: i64,
    pub name: String,
    pub size: u64,
    pub date: DateTime<Utc>,
}

/// 审计记录
#[derive(Debug, Clone)]
pub struct ActivityRecord {
    pub action: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    pub details: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
}
