use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::services::AppStartTime;
use crate::config::{StaticConfig, get_config};
use crate::services::{FileStore, LinkService};
use crate::storage::{SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub link_service: Arc<LinkService>,
    pub file_store: Arc<FileStore>,
    pub app_start_time: AppStartTime,
}

/// 按全局配置准备服务器启动上下文
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let config = get_config();
    prepare_startup_with(&config).await
}

/// 存储（含迁移）→ 业务服务
pub async fn prepare_startup_with(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create_with(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!(
        "Using storage backend: {}",
        storage.get_backend_config().storage_type
    );

    let link_service = Arc::new(LinkService::from_config(storage.clone(), config));
    let file_store = Arc::new(FileStore::new(storage.clone(), &config.files));

    info!(
        "Short codes: length {}, {} attempts; uploads: max {} bytes, extensions [{}]",
        link_service.generator().length(),
        link_service.generator().max_attempts(),
        file_store.max_file_size(),
        file_store.allowed_extensions().join(", ")
    );

    debug!("Pre-startup completed in {:?}", start_time.elapsed());

    Ok(StartupContext {
        storage,
        link_service,
        file_store,
        app_start_time: AppStartTime::now(),
    })
}
