use actix_web::{Responder, web};
use serde_json::json;

use super::helpers::success_response;

/// GET /：接口索引
pub async fn api_index() -> impl Responder {
    success_response(&json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "create_link": "POST /links",
            "list_links": "GET /links",
            "follow_link": "GET /links/{code}",
            "redirect": "GET /r/{code}",
            "upload_file": "POST /files",
            "list_files": "GET /files",
            "download_file": "GET /files/{id}",
            "stats": "GET /stats",
            "health": "GET /health",
        }
    }))
}

pub fn index_routes() -> actix_web::Resource {
    web::resource("/").route(web::get().to(api_index))
}
