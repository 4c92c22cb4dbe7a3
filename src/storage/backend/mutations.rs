//! 链接写操作

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, ExprTrait, QueryFilter, QuerySelect,
    SqlErr, TransactionTrait,
};
use tracing::{debug, info};

use super::converters::{model_to_link, new_link_to_active_model};
use super::{LINK_COUNT_KEY, SeaOrmStorage, retry};
use crate::errors::{LinkdropError, Result};
use crate::storage::{Link, NewLink};

use migration::entities::link;

/// 是否为唯一约束冲突
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

impl SeaOrmStorage {
    /// 插入新链接
    ///
    /// 短码已被占用（唯一索引拒绝）时返回 `Ok(None)`，由调用方重新生成短码。
    pub async fn insert_link(&self, new_link: &NewLink) -> Result<Option<Link>> {
        let db = &self.db;

        let result = retry::with_retry(
            &format!("insert_link({})", new_link.short_code),
            self.retry_config,
            || async {
                let txn = db.begin().await?;
                let model = new_link_to_active_model(new_link).insert(&txn).await?;
                txn.commit().await?;
                Ok::<_, DbErr>(model)
            },
        )
        .await;

        match result {
            Ok(model) => {
                self.invalidate_count(LINK_COUNT_KEY);
                info!("Short link created: {}", model.short_code);
                Ok(Some(model_to_link(model)))
            }
            Err(e) if is_unique_violation(&e) => {
                debug!("Short code '{}' already taken", new_link.short_code);
                Ok(None)
            }
            Err(e) => Err(LinkdropError::database_operation(format!(
                "创建短链接失败: {}",
                e
            ))),
        }
    }

    /// 记录一次访问并返回目标 URL
    ///
    /// 先执行 `clicks = clicks + 1` 再读取，同一事务内完成；
    /// 短码不存在时回滚并返回 `Ok(None)`，不修改任何行。
    pub async fn record_access(&self, code: &str, at: DateTime<Utc>) -> Result<Option<String>> {
        let db = &self.db;

        retry::with_retry(&format!("record_access({})", code), self.retry_config, || async {
            let txn = db.begin().await?;

            let updated = link::Entity::update_many()
                .col_expr(link::Column::Clicks, Expr::col(link::Column::Clicks).add(1))
                .col_expr(link::Column::LastAccess, Expr::val(at))
                .filter(link::Column::ShortCode.eq(code))
                .exec(&txn)
                .await?;

            if updated.rows_affected == 0 {
                txn.rollback().await?;
                return Ok(None);
            }

            let long_url = link::Entity::find()
                .select_only()
                .column(link::Column::LongUrl)
                .filter(link::Column::ShortCode.eq(code))
                .into_tuple::<String>()
                .one(&txn)
                .await?;

            txn.commit().await?;
            Ok::<_, DbErr>(long_url)
        })
        .await
        .map_err(|e| LinkdropError::database_operation(format!("记录访问失败: {}", e)))
    }
}
