//! 短链接业务逻辑
//!
//! 创建：校验 URL → 生成未占用短码 → 插入；唯一约束冲突时换码重试。
//! 解析：单事务内 `clicks + 1` 并读取目标地址。

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use super::activity_log::ActivityLog;
use super::code_generator::CodeGenerator;
use crate::config::StaticConfig;
use crate::errors::{LinkdropError, Result};
use crate::storage::{Link, NewLink, SeaOrmStorage};
use crate::utils::is_valid_short_code;
use crate::utils::url_validator::{validate_url, validation_error_message};

/// 标题最大长度（字符）
const MAX_TITLE_CHARS: usize = 255;

// ============ Request/Response DTOs ============

/// 创建短链接请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLinkRequest {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// 创建结果
#[derive(Debug, Clone)]
pub struct LinkCreateResult {
    pub link: Link,
    /// `<public_base_url>/r/<code>`
    pub short_url: String,
}

// ============ LinkService Implementation ============

pub struct LinkService {
    storage: Arc<SeaOrmStorage>,
    generator: CodeGenerator,
    activity: ActivityLog,
    public_base_url: String,
}

impl LinkService {
    pub fn new(
        storage: Arc<SeaOrmStorage>,
        generator: CodeGenerator,
        public_base_url: impl Into<String>,
    ) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        Self {
            activity: ActivityLog::new(storage.clone()),
            storage,
            generator,
            public_base_url,
        }
    }

    pub fn from_config(storage: Arc<SeaOrmStorage>, config: &StaticConfig) -> Self {
        Self::new(
            storage,
            CodeGenerator::from_config(&config.links),
            config.server.public_base_url.clone(),
        )
    }

    pub fn generator(&self) -> &CodeGenerator {
        &self.generator
    }

    /// 完整的短链接地址
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/r/{}", self.public_base_url, code)
    }

    pub async fn create_link(&self, req: CreateLinkRequest) -> Result<LinkCreateResult> {
        let long_url = req.url.trim().to_string();
        validate_url(&long_url).map_err(|e| {
            LinkdropError::validation(format!("{}: {}", validation_error_message(&e), e))
        })?;

        let title = normalize_title(req.title)?;

        let mut budget = self.generator.budget();
        let link = loop {
            let code = self
                .generator
                .next_unused_code(self.storage.as_ref(), &mut budget)
                .await?;

            let new_link = NewLink {
                short_code: code,
                long_url: long_url.clone(),
                title: title.clone(),
                created_at: Utc::now(),
            };

            // None：预检查之后被并发写入抢占，换一个短码
            match self.storage.insert_link(&new_link).await? {
                Some(link) => break link,
                None => debug!(
                    "Insert of '{}' lost a race, regenerating",
                    new_link.short_code
                ),
            }
        };

        info!("LinkService: created '{}' -> {}", link.short_code, link.long_url);
        self.activity.link_created(&link).await;

        Ok(LinkCreateResult {
            short_url: self.short_url(&link.short_code),
            link,
        })
    }

    /// 解析短码并计一次点击
    pub async fn resolve(&self, code: &str) -> Result<String> {
        if !is_valid_short_code(code) {
            return Err(not_found(code));
        }

        match self.storage.record_access(code, Utc::now()).await? {
            Some(long_url) => {
                debug!("Resolved '{}' -> {}", code, long_url);
                Ok(long_url)
            }
            None => Err(not_found(code)),
        }
    }

    pub async fn list_links(&self) -> Result<Vec<Link>> {
        self.storage.list_links().await
    }

    /// 只读查询，不计点击
    pub async fn get_link(&self, code: &str) -> Result<Link> {
        if !is_valid_short_code(code) {
            return Err(not_found(code));
        }

        self.storage
            .get_link(code)
            .await?
            .ok_or_else(|| not_found(code))
    }

    pub async fn count_links(&self) -> Result<u64> {
        self.storage.count_links().await
    }
}

fn not_found(code: &str) -> LinkdropError {
    LinkdropError::not_found(format!("Short link '{}' not found", code))
}

/// 去除首尾空白，空标题视为未提供
fn normalize_title(title: Option<String>) -> Result<Option<String>> {
    let Some(title) = title else {
        return Ok(None);
    };

    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_TITLE_CHARS {
        return Err(LinkdropError::validation(format!(
            "Title must be at most {} characters",
            MAX_TITLE_CHARS
        )));
    }

    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title(None).unwrap(), None);
        assert_eq!(normalize_title(Some("   ".to_string())).unwrap(), None);
        assert_eq!(
            normalize_title(Some("  Docs  ".to_string())).unwrap(),
            Some("Docs".to_string())
        );
        assert!(normalize_title(Some("x".repeat(256))).is_err());
    }

    #[test]
    fn test_create_request_title_optional() {
        let req: CreateLinkRequest =
            serde_json::from_str(r#"{"url":"https://example.com"}"#).unwrap();
        assert_eq!(req.url, "https://example.com");
        assert!(req.title.is_none());
    }
}
