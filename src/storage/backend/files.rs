//! 文件表读写：内容与元数据同行存储

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, DbErr, EntityTrait, FromQueryResult, PaginatorTrait, QueryOrder,
    QuerySelect, TransactionTrait,
};
use tracing::{debug, info};

use super::converters::{model_to_stored_file, new_file_to_active_model};
use super::{FILE_COUNT_KEY, SeaOrmStorage, retry};
use crate::errors::{LinkdropError, Result};
use crate::storage::{FileSummary, NewFile, StoredFile};

use migration::entities::stored_file;

/// 列表投影，不含 content 列
#[derive(Debug, FromQueryResult)]
struct FileSummaryRow {
    id: i64,
    original_name: String,
    size: i64,
    uploaded_at: DateTime<Utc>,
}

impl From<FileSummaryRow> for FileSummary {
    fn from(row: FileSummaryRow) -> Self {
        FileSummary {
            id: row.id,
            name: row.original_name,
            size: row.size.max(0) as u64,
            date: row.uploaded_at,
        }
    }
}

impl SeaOrmStorage {
    /// 在单个事务中写入文件内容和元数据
    pub async fn insert_file(&self, new_file: &NewFile) -> Result<StoredFile> {
        let db = &self.db;

        let model = retry::with_retry(
            &format!("insert_file({})", new_file.stored_name),
            self.retry_config,
            || async {
                let txn = db.begin().await?;
                let model = new_file_to_active_model(new_file).insert(&txn).await?;
                txn.commit().await?;
                Ok::<_, DbErr>(model)
            },
        )
        .await
        .map_err(|e| LinkdropError::database_operation(format!("保存文件失败: {}", e)))?;

        self.invalidate_count(FILE_COUNT_KEY);
        info!(
            "File stored: id={}, name={}, size={}",
            model.id, model.stored_name, model.size
        );
        Ok(model_to_stored_file(model))
    }

    /// 文件元数据列表，按上传时间倒序，同一时间按 id 倒序
    pub async fn list_file_summaries(&self) -> Result<Vec<FileSummary>> {
        let db = &self.db;

        let rows = retry::with_retry("list_file_summaries", self.retry_config, || async {
            stored_file::Entity::find()
                .select_only()
                .columns([
                    stored_file::Column::Id,
                    stored_file::Column::OriginalName,
                    stored_file::Column::Size,
                    stored_file::Column::UploadedAt,
                ])
                .order_by_desc(stored_file::Column::UploadedAt)
                .order_by_desc(stored_file::Column::Id)
                .into_model::<FileSummaryRow>()
                .all(db)
                .await
        })
        .await
        .map_err(|e| LinkdropError::database_operation(format!("加载文件列表失败: {}", e)))?;

        Ok(rows.into_iter().map(FileSummary::from).collect())
    }

    pub async fn get_file(&self, id: i64) -> Result<Option<StoredFile>> {
        let db = &self.db;

        let model = retry::with_retry(&format!("get_file({})", id), self.retry_config, || async {
            stored_file::Entity::find_by_id(id).one(db).await
        })
        .await
        .map_err(|e| LinkdropError::database_operation(format!("读取文件失败: {}", e)))?;

        Ok(model.map(model_to_stored_file))
    }

    /// 文件总数（带缓存）
    pub async fn count_files(&self) -> Result<u64> {
        if let Some(cached) = self.count_cache.get(&FILE_COUNT_KEY) {
            debug!("count cache hit: key={}, value={}", FILE_COUNT_KEY, cached);
            return Ok(cached);
        }

        let db = &self.db;
        let count = retry::with_retry("count_files", self.retry_config, || async {
            stored_file::Entity::find().count(db).await
        })
        .await
        .map_err(|e| LinkdropError::database_operation(format!("统计文件数失败: {}", e)))?;

        self.count_cache.insert(FILE_COUNT_KEY, count);
        Ok(count)
    }
}
