//! 短链接接口
//!
//! - POST /links        创建
//! - GET  /links        列表（新建在前）
//! - GET  /links/{code} 跳转并计数

use actix_web::{HttpResponse, Responder, web};
use tracing::{info, trace};

use crate::services::{CreateLinkRequest, LinkService};

use super::error_code::ErrorCode;
use super::helpers::{created_response, error_from_linkdrop, success_response};
use super::redirect::RedirectService;
use super::types::{CreatedLinkResponse, LinkResponse};

pub struct LinksService;

impl LinksService {
    pub async fn create_link(
        link_service: web::Data<LinkService>,
        payload: web::Json<CreateLinkRequest>,
    ) -> impl Responder {
        let req = payload.into_inner();
        trace!("Create link request: url={}", req.url);

        match link_service.create_link(req).await {
            Ok(result) => {
                info!(
                    "Created short link {} -> {}",
                    result.short_url, result.link.long_url
                );
                created_response(&CreatedLinkResponse {
                    short_code: result.link.short_code,
                    short_url: result.short_url,
                    original_url: result.link.long_url,
                })
            }
            Err(e) => error_from_linkdrop(&e, ErrorCode::for_link(&e)),
        }
    }

    pub async fn list_links(link_service: web::Data<LinkService>) -> impl Responder {
        match link_service.list_links().await {
            Ok(links) => {
                let body: Vec<LinkResponse> = links
                    .into_iter()
                    .map(|link| {
                        let short_url = link_service.short_url(&link.short_code);
                        LinkResponse::from_link(link, short_url)
                    })
                    .collect();
                success_response(&body)
            }
            Err(e) => error_from_linkdrop(&e, ErrorCode::for_link(&e)),
        }
    }

    pub async fn follow_link(
        link_service: web::Data<LinkService>,
        path: web::Path<String>,
    ) -> HttpResponse {
        RedirectService::redirect(&link_service, &path.into_inner()).await
    }
}

/// 链接路由，挂载在 /links
pub fn links_routes() -> actix_web::Scope {
    web::scope("/links")
        .route("", web::post().to(LinksService::create_link))
        .route("", web::get().to(LinksService::list_links))
        .route("/{code}", web::get().to(LinksService::follow_link))
}
