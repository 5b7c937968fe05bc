// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Catalog administration endpoints.

use crate::error::ApiError;
use crate::AppState;
use axum::{extract::State, Json};
use reno_lite_matching::CacheStats;
use serde::Serialize;

/// Reload response: counters from the rebuilt descriptor cache.
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub stats: CacheStats,
}

/// POST /api/v1/catalog/reload - Rebuild the catalog snapshot from its
/// archive and swap it in atomically.
pub async fn reload(State(state): State<AppState>) -> Result<Json<ReloadResponse>, ApiError> {
    let store = state.catalog.clone();
    let stats = tokio::task::spawn_blocking(move || store.reload()).await??;
    Ok(Json(ReloadResponse { stats }))
}
