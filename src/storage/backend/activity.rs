use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait};

use super::{SeaOrmStorage, retry};
use crate::errors::{LinkdropError, Result};
use crate::storage::ActivityRecord;

use migration::entities::activity;

impl SeaOrmStorage {
    /// 追加一条审计记录（独立于业务事务）
    pub async fn append_activity(&self, record: &ActivityRecord) -> Result<()> {
        let db = &self.db;
        let recorded_at = Utc::now();

        retry::with_retry(
            &format!("append_activity({})", record.action),
            self.retry_config,
            || async {
                activity::ActiveModel {
                    id: NotSet,
                    action: Set(record.action.clone()),
                    entity_type: Set(record.entity_type.clone()),
                    entity_id: Set(record.entity_id),
                    details: Set(record.details.clone()),
                    recorded_at: Set(recorded_at),
                }
                .insert(db)
                .await
            },
        )
        .await
        .map_err(|e| LinkdropError::database_operation(format!("写入审计记录失败: {}", e)))?;

        Ok(())
    }

    pub async fn count_activity(&self) -> Result<u64> {
        activity::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| LinkdropError::database_operation(format!("统计审计记录失败: {}", e)))
    }
}
