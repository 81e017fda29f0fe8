use crate::auth::Principal;
use crate::error::{AppError, Result};
use crate::models::{Designation, GalleryCategory};
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde_json::{json, Value};

const ASSET_ROLES: [Designation; 2] = [Designation::President, Designation::Secretary];

struct UploadedFile {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

struct UploadForm {
    file: Option<UploadedFile>,
    caption: Option<String>,
    category: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm> {
    let mut form = UploadForm {
        file: None,
        caption: None,
        category: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed form data: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload.bin").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {e}")))?
                    .to_vec();
                form.file = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            Some("caption") => {
                form.caption = field.text().await.ok();
            }
            Some("category") => {
                form.category = field.text().await.ok();
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Public gallery listing, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>> {
    let images = state.gallery_service.list_all().await?;
    Ok(Json(json!({ "success": true, "data": images })))
}

/// Photo upload, open to any authenticated member: bytes go to object
/// storage, then the metadata row is written with an uploader snapshot.
pub async fn upload(
    State(state): State<AppState>,
    principal: Principal,
    multipart: Multipart,
) -> Result<Json<Value>> {
    let member = principal.require_member(&state).await?;

    let form = read_form(multipart).await?;
    let file = form
        .file
        .ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    // Validated before the bytes leave the process.
    let category = match form.category.as_deref() {
        None => GalleryCategory::default(),
        Some(label) => label
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Unknown gallery category '{label}'")))?,
    };

    let stored = state
        .storage
        .upload("gallery", &file.file_name, &file.content_type, file.bytes)
        .await?;

    let image = state
        .gallery_service
        .create(
            &stored.url,
            &stored.key,
            form.caption.as_deref().unwrap_or(""),
            category,
            member.id,
            &member.full_name,
        )
        .await?;

    Ok(Json(json!({ "success": true, "data": image })))
}

/// Generic asset upload (event banners). Only the roles that manage events
/// can feed it.
pub async fn upload_asset(
    State(state): State<AppState>,
    principal: Principal,
    multipart: Multipart,
) -> Result<Json<Value>> {
    principal.authorize(&state, &ASSET_ROLES).await?;

    let form = read_form(multipart).await?;
    let file = form
        .file
        .ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    let stored = state
        .storage
        .upload("assets", &file.file_name, &file.content_type, file.bytes)
        .await?;

    Ok(Json(json!({ "success": true, "url": stored.url })))
}
