// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Proposal endpoints: match a building and rescale the nearest catalog
//! proposal.

use crate::error::ApiError;
use crate::services::pdf::render_proposal;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use reno_lite_matching::{make_proposal, CatalogKey, Proposal, ProposalOutcome};
use serde::{Deserialize, Serialize};

/// Proposal request body.
#[derive(Debug, Deserialize)]
pub struct ProposalRequest {
    pub building_id: String,
}

/// Proposal response: the rescaled document plus match metadata.
#[derive(Debug, Serialize)]
pub struct ProposalResponse {
    pub building_id: String,
    pub matched_key: CatalogKey,
    pub distance: f64,
    pub scale_index: f64,
    pub proposal: Proposal,
}

/// POST /api/v1/proposal - Match and rescale.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<ProposalRequest>,
) -> Result<Json<ProposalResponse>, ApiError> {
    let building_id = request.building_id.trim().to_string();
    if building_id.is_empty() {
        return Err(ApiError::BadRequest("building_id must not be empty".into()));
    }

    let outcome = run_pipeline(&state, &building_id).await?;
    Ok(Json(ProposalResponse {
        building_id,
        matched_key: outcome.matched_key,
        distance: outcome.distance,
        scale_index: outcome.scale_index,
        proposal: outcome.proposal,
    }))
}

/// GET /api/v1/proposal/:building_id/pdf - Rendered quote document.
pub async fn pdf(
    State(state): State<AppState>,
    Path(building_id): Path<String>,
) -> Result<Response, ApiError> {
    let outcome = run_pipeline(&state, &building_id).await?;
    let bytes = render_proposal(&outcome.proposal, &building_id)?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"Renovation_Proposal_{building_id}.pdf\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}

/// Fetch the building geometry, then run the synchronous pipeline against
/// the current catalog snapshot.
async fn run_pipeline(state: &AppState, building_id: &str) -> Result<ProposalOutcome, ApiError> {
    let raw_mesh = state.particles.fetch_particles(building_id).await?;
    tracing::info!(
        building_id = %building_id,
        particles = raw_mesh.triangle_count(),
        "Fetched building geometry"
    );

    // Each request keeps the snapshot it started with; reloads swap in a new
    // Arc and never touch a running match.
    let snapshot = state.catalog.snapshot();

    // CPU-bound; keep it off the async workers.
    let outcome = tokio::task::spawn_blocking(move || {
        make_proposal(&snapshot.catalog, &snapshot.cache, &raw_mesh)
    })
    .await??;

    tracing::info!(
        building_id = %building_id,
        matched_key = %outcome.matched_key,
        scale_index = outcome.scale_index,
        "Proposal ready"
    );
    Ok(outcome)
}
