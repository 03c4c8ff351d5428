/// Image upload and serving
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::response::success;
use crate::services::AssetStore;
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::stream::StreamExt;

/// Multipart upload; the `file` field is stored under a generated name
pub async fn upload_image(
    state: web::Data<AppState>,
    user: AuthUser,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    let max_bytes = state.assets.max_upload_bytes();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?;

        let (is_file_field, original_name) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name() == Some("file"),
                cd.get_filename().map(str::to_string),
            ),
            None => (false, None),
        };

        if !is_file_field {
            // Drain unrelated fields
            while let Some(chunk) = field.next().await {
                chunk.map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?;
            }
            continue;
        }

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?;
            if bytes.len() + chunk.len() > max_bytes {
                return Err(AppError::BadRequest(format!(
                    "upload exceeds {} bytes",
                    max_bytes
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        let filename = AssetStore::generate_filename(original_name.as_deref());
        state.assets.save(&filename, &bytes).await?;

        tracing::info!(user_id = %user.id, %filename, size = bytes.len(), "image uploaded");
        return Ok(success(serde_json::json!({ "filename": filename }), "Upload Success"));
    }

    Err(AppError::BadRequest("file field is required".to_string()))
}

/// Serve a stored image
pub async fn serve_image(
    state: web::Data<AppState>,
    filename: web::Path<String>,
) -> Result<HttpResponse> {
    let bytes = state.assets.read(&filename).await?;

    let content_type = content_type_for(&filename);
    Ok(HttpResponse::Ok().content_type(content_type).body(bytes))
}

fn content_type_for(filename: &str) -> mime::Mime {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "png" => mime::IMAGE_PNG,
        "gif" => mime::IMAGE_GIF,
        "bmp" => mime::IMAGE_BMP,
        "svg" => mime::IMAGE_SVG,
        "webp" => "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
