use axum::{
    extract::{Multipart, Path, Request, State},
    response::{IntoResponse, Response},
    Json,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::info;

use crate::{
    error::{AppError, Result},
    AppState,
};

/// One level of entry names, files and subdirectories alike, in directory
/// read order.
pub async fn list_files(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let names = state.store.list().await?;
    Ok(Json(names))
}

pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<String> {
    let mut stored: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            let filename = field
                .file_name()
                .ok_or_else(|| AppError::BadRequest("Missing filename".to_string()))?
                .to_string();

            let data = field.bytes().await.map_err(|e| {
                AppError::BadRequest(format!("Failed to read file data: {}", e))
            })?;

            state.store.save(&filename, &data).await?;
            stored = Some(filename);
            break;
        }
    }

    let filename = stored.ok_or_else(|| {
        AppError::BadRequest("No file found in request".to_string())
    })?;

    info!(filename = %filename, "file uploaded");
    Ok(format!("Uploaded {}", filename))
}

/// Serves the file via `ServeFile`, which covers ranges, content type, and
/// not-modified handling; a missing file comes back as 404.
pub async fn download_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
    request: Request,
) -> Result<Response> {
    let path = state.store.resolve(&name)?;

    match ServeFile::new(path).oneshot(request).await {
        Ok(response) => Ok(response.into_response()),
        Err(infallible) => match infallible {},
    }
}

pub async fn delete_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<String> {
    state.store.remove(&name).await?;

    info!(filename = %name, "file deleted");
    Ok(format!("Deleted {}", name))
}
