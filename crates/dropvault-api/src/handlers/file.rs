//! File upload and download handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;
use validator::Validate;

use dropvault_core::error::AppError;

use crate::dto::request::{DownloadRequest, PresignUploadRequest};
use crate::dto::response::{ApiResponse, DownloadUrlResponse, UploadResponse, UploadUrlResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/files/upload — multipart upload gated by JWT.
///
/// Expects a `shared_secret` field and a `file` field. The response
/// carries the derived identifier; together with the secret it is the
/// caller's capability for later retrieval.
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponse>>, ApiError> {
    let mut secret: Option<String> = None;
    let mut file_name: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "shared_secret" => {
                secret = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            "file" => {
                file_name = field.file_name().map(String::from);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let secret = secret
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::validation("missing secret"))?;
    let file_name = file_name.ok_or_else(|| AppError::validation("missing file"))?;
    let data = data.ok_or_else(|| AppError::validation("missing file"))?;

    // Clients may send a full path; only the base name is meaningful.
    let file_name = base_name(&file_name);

    let identifier = state
        .upload_service
        .upload(&secret, file_name, data, Some(auth.user_id.clone()))
        .await?;

    Ok(Json(ApiResponse::ok(UploadResponse {
        identifier,
        user_id: auth.user_id,
    })))
}

/// POST /api/files/upload-url — presigned-upload variant.
pub async fn upload_url(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<PresignUploadRequest>,
) -> Result<Json<ApiResponse<UploadUrlResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let file_name = base_name(&req.file_name).to_string();
    let presigned = state
        .upload_service
        .presigned_upload(&req.shared_secret, &file_name, Some(auth.user_id))
        .await?;

    Ok(Json(ApiResponse::ok(UploadUrlResponse {
        identifier: presigned.identifier,
        upload_url: presigned.url,
        url_expires_in: presigned.expires_in_seconds,
    })))
}

/// POST /api/files/download — streams the file back to the caller.
///
/// Content type and length are mirrored from the stored object.
pub async fn download(
    State(state): State<AppState>,
    Json(req): Json<DownloadRequest>,
) -> Result<Response, ApiError> {
    let (record, object) = state
        .download_service
        .open(&req.hashed_secret, &req.shared_secret)
        .await?;

    let mut builder = Response::builder().status(StatusCode::OK).header(
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{}\"", record.file_name),
    );
    if let Some(content_type) = object.content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    if let Some(content_length) = object.content_length {
        builder = builder.header(header::CONTENT_LENGTH, content_length);
    }

    builder
        .body(Body::from_stream(object.stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")).into())
}

/// POST /api/files/download/url — responds with a presigned URL.
pub async fn download_url(
    State(state): State<AppState>,
    Json(req): Json<DownloadRequest>,
) -> Result<Json<ApiResponse<DownloadUrlResponse>>, ApiError> {
    let presigned = state
        .download_service
        .presigned_url(&req.hashed_secret, &req.shared_secret)
        .await?;

    Ok(Json(ApiResponse::ok(DownloadUrlResponse {
        file_name: presigned.file_name,
        presigned_url: presigned.url,
        url_expires_in: presigned.expires_in_seconds,
    })))
}

/// POST /api/files/download/qr — responds with a QR-encoded presigned URL.
pub async fn download_qr(
    State(state): State<AppState>,
    Json(req): Json<DownloadRequest>,
) -> Result<Response, ApiError> {
    let png = state
        .download_service
        .qr_png(&req.hashed_secret, &req.shared_secret)
        .await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/png")
        .header(
            header::CONTENT_DISPOSITION,
            "inline; filename=\"download_qr.png\"",
        )
        .body(Body::from(png))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")).into())
}

/// Strips any path components a client sent along with the filename.
fn base_name(file_name: &str) -> &str {
    file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_paths() {
        assert_eq!(base_name("report.pdf"), "report.pdf");
        assert_eq!(base_name("/tmp/report.pdf"), "report.pdf");
        assert_eq!(base_name("C:\\Users\\x\\report.pdf"), "report.pdf");
    }
}
