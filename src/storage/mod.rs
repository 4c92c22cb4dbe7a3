use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use models::{ActivityRecord, FileSummary, Link, NewFile, NewLink, StorageConfig, StoredFile};

pub struct StorageFactory;

impl StorageFactory {
    /// 按全局配置创建存储
    pub async fn create() -> Result<Arc<SeaOrmStorage>> {
        let config = crate::config::get_config();
        Self::create_with(&config.database).await
    }

    pub async fn create_with(database: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
        let database_url = &database.database_url;

        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(database_url)?;

        let storage =
            backend::SeaOrmStorage::connect(database_url, &backend_type, database).await?;
        Ok(Arc::new(storage))
    }
}
