//! Server mode
//!
//! 组装 actix-web App、绑定 TCP 地址，并在 Ctrl+C 时优雅退出。

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::middleware::RequestIdMiddleware;
use crate::api::services::configure_routes;
use crate::config::get_config;
use crate::runtime::lifetime::{self, StartupContext};

pub async fn run_server() -> Result<()> {
    let config = get_config();

    let StartupContext {
        storage,
        link_service,
        file_store,
        app_start_time,
    } = lifetime::prepare_server_startup()
        .await
        .context("Failed to prepare server startup")?;

    // storage 移入闭包前保留一份连接，供关闭时使用
    let db_for_shutdown = storage.get_db().clone();

    let cpu_count = config.server.cpu_count.max(1);
    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .app_data(web::Data::from(link_service.clone()))
            .app_data(web::Data::from(file_store.clone()))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .configure(configure_routes)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_secs(30))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    tokio::select! {
        res = server => {
            res.context("HTTP server error")?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&db_for_shutdown) => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
