use axum::{extract::State, Json};

use crate::{error::Result, monitoring::DiskUsageSnapshot, AppState};

pub async fn disk_usage(State(state): State<AppState>) -> Result<Json<DiskUsageSnapshot>> {
    let snapshot = state.disk_probe.snapshot()?;
    Ok(Json(snapshot))
}
