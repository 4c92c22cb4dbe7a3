//! 文件接口
//!
//! - POST /files       上传（multipart 字段 `file`，或 JSON + base64）
//! - GET  /files       元数据列表
//! - GET  /files/{id}  下载原始内容

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::web::BytesMut;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use futures_util::StreamExt;
use tracing::{debug, info};

use crate::errors::LinkdropError;
use crate::services::{FileStore, FileUpload, UploadJsonRequest};

use super::error_code::ErrorCode;
use super::helpers::{created_response, error_from_linkdrop, error_response, success_response};
use super::types::{FileSummaryResponse, UploadedFileResponse};

/// multipart 中承载文件的字段名
const FILE_FIELD: &str = "file";

/// JSON 上传时 base64 及其余字段的额外开销
const JSON_OVERHEAD: usize = 64 * 1024;

/// 上传体解析失败
enum UploadError {
    Multipart(String),
    Body(String),
    Rejected(LinkdropError),
}

impl UploadError {
    fn into_response(self) -> HttpResponse {
        match self {
            UploadError::Multipart(msg) => error_response(
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidMultipartData,
                &msg,
            ),
            UploadError::Body(msg) => {
                error_response(StatusCode::BAD_REQUEST, ErrorCode::InvalidUploadBody, &msg)
            }
            UploadError::Rejected(e) => error_from_linkdrop(&e, ErrorCode::for_file(&e)),
        }
    }
}

pub struct FilesService;

impl FilesService {
    pub async fn upload(
        req: HttpRequest,
        payload: web::Payload,
        file_store: web::Data<FileStore>,
    ) -> impl Responder {
        let content_type = req
            .headers()
            .get("Content-Type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let upload = if content_type.starts_with("multipart/form-data") {
            Self::read_multipart(&req, payload, file_store.max_file_size()).await
        } else if content_type.starts_with("application/json") {
            Self::read_json(payload, file_store.max_file_size()).await
        } else {
            Err(UploadError::Body(
                "Expected multipart/form-data or application/json".to_string(),
            ))
        };

        let upload = match upload {
            Ok(upload) => upload,
            Err(e) => return e.into_response(),
        };

        match file_store.put_upload(upload).await {
            Ok(file) => {
                info!("Uploaded file {} as id {}", file.original_name, file.id);
                created_response(&UploadedFileResponse {
                    id: file.id,
                    name: file.original_name,
                })
            }
            Err(e) => error_from_linkdrop(&e, ErrorCode::for_file(&e)),
        }
    }

    /// 读取 `file` 字段，内容超过上限时立即停止读取
    async fn read_multipart(
        req: &HttpRequest,
        payload: web::Payload,
        max_size: usize,
    ) -> Result<FileUpload, UploadError> {
        let mut multipart = Multipart::new(req.headers(), payload);

        while let Some(field) = multipart.next().await {
            let mut field = field.map_err(|e| UploadError::Multipart(e.to_string()))?;

            if field.name() != Some(FILE_FIELD) {
                debug!("Skipping multipart field {:?}", field.name());
                while let Some(chunk) = field.next().await {
                    chunk.map_err(|e| UploadError::Multipart(e.to_string()))?;
                }
                continue;
            }

            let original_name = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .map(str::to_string)
                .ok_or_else(|| {
                    UploadError::Rejected(LinkdropError::validation("No filename provided"))
                })?;
            let content_type = field.content_type().map(|mime| mime.to_string());

            let mut content = BytesMut::new();
            while let Some(chunk) = field.next().await {
                let chunk = chunk.map_err(|e| UploadError::Multipart(e.to_string()))?;
                if content.len() + chunk.len() > max_size {
                    return Err(UploadError::Rejected(too_large(max_size)));
                }
                content.extend_from_slice(&chunk);
            }

            return Ok(FileUpload {
                original_name,
                content_type,
                content: content.to_vec(),
            });
        }

        Err(UploadError::Rejected(LinkdropError::validation(
            "No file provided",
        )))
    }

    async fn read_json(
        mut payload: web::Payload,
        max_size: usize,
    ) -> Result<FileUpload, UploadError> {
        // base64 体积约为原始内容的 4/3
        let limit = max_size / 3 * 4 + 4 + JSON_OVERHEAD;

        let mut body = BytesMut::new();
        while let Some(chunk) = payload.next().await {
            let chunk = chunk.map_err(|e| UploadError::Body(e.to_string()))?;
            if body.len() + chunk.len() > limit {
                return Err(UploadError::Rejected(too_large(max_size)));
            }
            body.extend_from_slice(&chunk);
        }

        let request: UploadJsonRequest = serde_json::from_slice(&body)
            .map_err(|e| UploadError::Body(format!("Invalid JSON body: {}", e)))?;

        request.decode().map_err(UploadError::Rejected)
    }

    pub async fn list_files(file_store: web::Data<FileStore>) -> impl Responder {
        match file_store.list_metadata().await {
            Ok(files) => {
                let body: Vec<FileSummaryResponse> =
                    files.into_iter().map(FileSummaryResponse::from).collect();
                success_response(&body)
            }
            Err(e) => error_from_linkdrop(&e, ErrorCode::for_file(&e)),
        }
    }

    pub async fn download(
        file_store: web::Data<FileStore>,
        path: web::Path<String>,
    ) -> HttpResponse {
        let raw_id = path.into_inner();
        let Ok(id) = raw_id.parse::<i64>() else {
            let err = LinkdropError::not_found(format!("File {} not found", raw_id));
            return error_from_linkdrop(&err, ErrorCode::FileNotFound);
        };

        match file_store.get(id).await {
            Ok(file) => HttpResponse::Ok()
                .content_type(file.content_type.as_str())
                .insert_header(ContentDisposition {
                    disposition: DispositionType::Attachment,
                    parameters: vec![DispositionParam::Filename(file.original_name.clone())],
                })
                .body(file.content),
            Err(e) => error_from_linkdrop(&e, ErrorCode::for_file(&e)),
        }
    }
}

fn too_large(max_size: usize) -> LinkdropError {
    LinkdropError::validation(format!("File is too large (max {} bytes)", max_size))
}

/// 文件路由，挂载在 /files
pub fn files_routes() -> actix_web::Scope {
    web::scope("/files")
        .route("", web::post().to(FilesService::upload))
        .route("", web::get().to(FilesService::list_files))
        .route("/{id}", web::get().to(FilesService::download))
}
