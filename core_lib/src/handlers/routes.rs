//! HTTP route table for the file store surface

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::{config::AppConfig, AppState};

use super::{disk, files};

pub fn create_routes(config: &AppConfig) -> Router<AppState> {
    let mut router = Router::new()
        .route("/files", get(files::list_files))
        .route(
            "/upload",
            post(files::upload_file)
                .layer(DefaultBodyLimit::max(config.storage.max_upload_bytes)),
        )
        .route("/download/:name", get(files::download_file))
        .route("/files/:name", delete(files::delete_file));

    if config.disk_usage.enabled {
        router = router.route("/disk-usage", get(disk::disk_usage));
    }

    router
}
