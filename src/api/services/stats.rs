use actix_web::{Responder, web};
use chrono::Utc;

use crate::errors::Result;
use crate::services::{FileStore, LinkService};

use super::error_code::ErrorCode;
use super::helpers::{error_from_linkdrop, success_response};
use super::types::StatsResponse;

pub struct StatsService;

impl StatsService {
    pub async fn stats(
        link_service: web::Data<LinkService>,
        file_store: web::Data<FileStore>,
    ) -> impl Responder {
        match Self::collect(&link_service, &file_store).await {
            Ok(stats) => success_response(&stats),
            Err(e) => error_from_linkdrop(&e, ErrorCode::from(&e)),
        }
    }

    async fn collect(link_service: &LinkService, file_store: &FileStore) -> Result<StatsResponse> {
        let (total_links, total_files) =
            tokio::try_join!(link_service.count_links(), file_store.count_files())?;

        Ok(StatsResponse {
            total_files,
            total_links,
            status: "operational".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}

pub fn stats_routes() -> actix_web::Resource {
    web::resource("/stats").route(web::get().to(StatsService::stats))
}
