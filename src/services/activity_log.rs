//! 审计日志（尽力而为）
//!
//! 在业务事务提交之后写入；写入失败只记录 warn，不影响调用方。

use std::sync::Arc;

use serde_json::json;
use tracing::warn;

use crate::storage::{ActivityRecord, Link, SeaOrmStorage, StoredFile};

pub const ACTION_LINK_CREATE: &str = "link_create";
pub const ACTION_FILE_UPLOAD: &str = "file_upload";

#[derive(Clone)]
pub struct ActivityLog {
    storage: Arc<SeaOrmStorage>,
}

impl ActivityLog {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn record(&self, record: ActivityRecord) {
        if let Err(e) = self.storage.append_activity(&record).await {
            warn!(
                "Failed to record activity '{}' for {:?} {:?}: {}",
                record.action, record.entity_type, record.entity_id, e
            );
        }
    }

    pub async fn link_created(&self, link: &Link) {
        self.record(ActivityRecord {
            action: ACTION_LINK_CREATE.to_string(),
            entity_type: Some("link".to_string()),
            entity_id: Some(link.id),
            details: Some(
                json!({ "short_code": link.short_code, "long_url": link.long_url }).to_string(),
            ),
        })
        .await;
    }

    pub async fn file_uploaded(&self, file: &StoredFile) {
        self.record(ActivityRecord {
            action: ACTION_FILE_UPLOAD.to_string(),
            entity_type: Some("file".to_string()),
            entity_id: Some(file.id),
            details: Some(
                json!({
                    "stored_name": file.stored_name,
                    "content_type": file.content_type,
                    "size": file.size,
                })
                .to_string(),
            ),
        })
        .await;
    }
}
