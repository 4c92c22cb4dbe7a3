//! 链接只读查询

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::debug;

use super::converters::model_to_link;
use super::{LINK_COUNT_KEY, SeaOrmStorage, retry};
use crate::errors::{LinkdropError, Result};
use crate::services::CodeLookup;
use crate::storage::Link;

use migration::entities::link;

impl SeaOrmStorage {
    /// 按短码查找（无副作用）
    pub async fn get_link(&self, code: &str) -> Result<Option<Link>> {
        let db = &self.db;

        let model = retry::with_retry(&format!("get_link({})", code), self.retry_config, || async {
            link::Entity::find()
                .filter(link::Column::ShortCode.eq(code))
                .one(db)
                .await
        })
        .await
        .map_err(|e| LinkdropError::database_operation(format!("查询短链接失败: {}", e)))?;

        Ok(model.map(model_to_link))
    }

    pub async fn short_code_exists(&self, code: &str) -> Result<bool> {
        let db = &self.db;

        let count = retry::with_retry(
            &format!("short_code_exists({})", code),
            self.retry_config,
            || async {
                link::Entity::find()
                    .filter(link::Column::ShortCode.eq(code))
                    .count(db)
                    .await
            },
        )
        .await
        .map_err(|e| LinkdropError::database_operation(format!("检查短码失败: {}", e)))?;

        Ok(count > 0)
    }

    /// 全部链接，按创建时间倒序，同一时间按 id 倒序
    pub async fn list_links(&self) -> Result<Vec<Link>> {
        let db = &self.db;

        let models = retry::with_retry("list_links", self.retry_config, || async {
            link::Entity::find()
                .order_by_desc(link::Column::CreatedAt)
                .order_by_desc(link::Column::Id)
                .all(db)
                .await
        })
        .await
        .map_err(|e| LinkdropError::database_operation(format!("加载链接列表失败: {}", e)))?;

        Ok(models.into_iter().map(model_to_link).collect())
    }

    /// 链接总数（带缓存）
    pub async fn count_links(&self) -> Result<u64> {
        if let Some(cached) = self.count_cache.get(&LINK_COUNT_KEY) {
            debug!("count cache hit: key={}, value={}", LINK_COUNT_KEY, cached);
            return Ok(cached);
        }

        let db = &self.db;
        let count = retry::with_retry("count_links", self.retry_config, || async {
            link::Entity::find().count(db).await
        })
        .await
        .map_err(|e| LinkdropError::database_operation(format!("统计链接数失败: {}", e)))?;

        self.count_cache.insert(LINK_COUNT_KEY, count);
        Ok(count)
    }
}

#[async_trait]
impl CodeLookup for SeaOrmStorage {
    async fn code_exists(&self, code: &str) -> Result<bool> {
        self.short_code_exists(code).await
    }
}
