//! 文件存储业务逻辑
//!
//! 上传时清洗文件名、检查扩展名与大小，内容和元数据在同一事务中写入。

use std::sync::Arc;

use base64::Engine;
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use super::activity_log::ActivityLog;
use crate::config::FilesConfig;
use crate::errors::{LinkdropError, Result};
use crate::storage::{FileSummary, NewFile, SeaOrmStorage, StoredFile};
use crate::utils::filename::{extension_of, sanitize_filename, stored_name_for};

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const MAX_CONTENT_TYPE_LEN: usize = 255;

/// JSON 上传请求，content 为 base64
#[derive(Debug, Clone, Deserialize)]
pub struct UploadJsonRequest {
    pub filename: String,
    pub content: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// 已解码的上传内容
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub original_name: String,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

impl UploadJsonRequest {
    pub fn decode(self) -> Result<FileUpload> {
        let content = base64::engine::general_purpose::STANDARD
            .decode(self.content.trim())
            .map_err(|e| LinkdropError::validation(format!("Invalid base64 content: {}", e)))?;

        Ok(FileUpload {
            original_name: self.filename,
            content_type: self.content_type,
            content,
        })
    }
}

pub struct FileStore {
    storage: Arc<SeaOrmStorage>,
    activity: ActivityLog,
    max_file_size: usize,
    allowed_extensions: Vec<String>,
}

impl FileStore {
    pub fn new(storage: Arc<SeaOrmStorage>, config: &FilesConfig) -> Self {
        Self {
            activity: ActivityLog::new(storage.clone()),
            storage,
            max_file_size: config.max_file_size,
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
        }
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// 校验文件名与内容，返回清洗后的文件名
    pub fn validate(&self, original_name: &str, content: &[u8]) -> Result<String> {
        let name = sanitize_filename(original_name).ok_or_else(|| {
            LinkdropError::validation(format!("Invalid file name '{}'", original_name))
        })?;

        let ext = extension_of(&name).ok_or_else(|| {
            LinkdropError::validation(format!("File '{}' has no extension", name))
        })?;

        if !self.allowed_extensions.iter().any(|allowed| *allowed == ext) {
            return Err(LinkdropError::validation(format!(
                "File type '.{}' is not allowed. Allowed: {}",
                ext,
                self.allowed_extensions.join(", ")
            )));
        }

        if content.is_empty() {
            return Err(LinkdropError::validation("File is empty"));
        }

        if content.len() > self.max_file_size {
            return Err(LinkdropError::validation(format!(
                "File is too large: {} bytes (max {} bytes)",
                content.len(),
                self.max_file_size
            )));
        }

        Ok(name)
    }

    pub async fn put(
        &self,
        original_name: &str,
        content_type: Option<&str>,
        content: Vec<u8>,
    ) -> Result<StoredFile> {
        let name = self.validate(original_name, &content)?;
        let content_type = normalize_content_type(content_type)?;

        let uploaded_at = Utc::now();
        let new_file = NewFile {
            stored_name: stored_name_for(&name, uploaded_at.timestamp()),
            original_name: name,
            content,
            content_type,
            uploaded_at,
        };

        let file = self.storage.insert_file(&new_file).await?;
        info!(
            "FileStore: stored '{}' ({} bytes) as id {}",
            file.original_name, file.size, file.id
        );

        self.activity.file_uploaded(&file).await;
        Ok(file)
    }

    pub async fn put_upload(&self, upload: FileUpload) -> Result<StoredFile> {
        self.put(
            &upload.original_name,
            upload.content_type.as_deref(),
            upload.content,
        )
        .await
    }

    /// 元数据列表（不读取文件内容）
    pub async fn list_metadata(&self) -> Result<Vec<FileSummary>> {
        self.storage.list_file_summaries().await
    }

    pub async fn get(&self, id: i64) -> Result<StoredFile> {
        self.storage
            .get_file(id)
            .await?
            .ok_or_else(|| LinkdropError::not_found(format!("File {} not found", id)))
    }

    pub async fn count_files(&self) -> Result<u64> {
        self.storage.count_files().await
    }
}

fn normalize_content_type(content_type: Option<&str>) -> Result<String> {
    let content_type = content_type.map(str::trim).unwrap_or_default();

    if content_type.is_empty() {
        return Ok(DEFAULT_CONTENT_TYPE.to_string());
    }
    if content_type.len() > MAX_CONTENT_TYPE_LEN || content_type.chars().any(char::is_control) {
        return Err(LinkdropError::validation("Invalid content type"));
    }

    Ok(content_type.to_string())
}
