use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use tracing::{debug, trace};

use crate::errors::LinkdropError;
use crate::services::LinkService;

use super::error_code::ErrorCode;
use super::helpers::error_from_linkdrop;

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        link_service: web::Data<LinkService>,
        path: web::Path<String>,
    ) -> HttpResponse {
        Self::redirect(&link_service, &path.into_inner()).await
    }

    /// 解析短码、计数并返回 302
    pub async fn redirect(link_service: &LinkService, code: &str) -> HttpResponse {
        match link_service.resolve(code).await {
            Ok(long_url) => {
                trace!("Redirecting {} -> {}", code, long_url);
                HttpResponse::build(StatusCode::FOUND)
                    .insert_header(("Location", long_url))
                    .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
                    .finish()
            }
            Err(e @ LinkdropError::NotFound(_)) => {
                debug!("Redirect target not found: {}", code);
                error_from_linkdrop(&e, ErrorCode::LinkNotFound)
            }
            Err(e) => error_from_linkdrop(&e, ErrorCode::for_link(&e)),
        }
    }
}

/// 短链接跳转路由，挂载在 /r
pub fn redirect_routes() -> actix_web::Scope {
    web::scope("/r")
        .route("/{code}", web::get().to(RedirectService::handle_redirect))
}
