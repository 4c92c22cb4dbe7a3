pub mod error_code;
pub mod files;
pub mod health;
pub mod helpers;
pub mod index;
pub mod links;
pub mod redirect;
pub mod stats;
pub mod types;

use actix_web::web;

pub use error_code::ErrorCode;
pub use files::{FilesService, files_routes};
pub use health::{AppStartTime, HealthService, health_routes};
pub use index::index_routes;
pub use links::{LinksService, links_routes};
pub use redirect::{RedirectService, redirect_routes};
pub use stats::{StatsService, stats_routes};
pub use types::ApiResponse;

/// POST /links 等小 JSON 请求体上限
const JSON_BODY_LIMIT: usize = 64 * 1024;

/// 注册全部路由（服务端与集成测试共用）
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_BODY_LIMIT)
            .error_handler(helpers::json_error_handler),
    )
    .service(index_routes())
    .service(links_routes())
    .service(redirect_routes())
    .service(files_routes())
    .service(stats_routes())
    .service(health_routes())
    .default_service(web::to(helpers::not_found_handler));
}
