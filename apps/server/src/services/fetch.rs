// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the 3D-twin particles API.

use reno_lite_geometry::Mesh;
use reno_lite_matching::ModelRecord;
use reqwest::header::ACCEPT;
use thiserror::Error;

/// Failures fetching a building's geometry. All fatal; no retries.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("no model records returned for building {0}")]
    Empty(String),
}

/// Client for the remote particles endpoint.
pub struct ParticlesClient {
    base_url: String,
    http: reqwest::Client,
}

impl ParticlesClient {
    /// Create a new particles client.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Fetch the raw triangle mesh for one building identifier.
    ///
    /// POSTs a single-element JSON array with the identifier; the response
    /// has the mesh-document shape, and only the first model record's
    /// particle list is consumed.
    pub async fn fetch_particles(&self, building_id: &str) -> Result<Mesh, FetchError> {
        let resp = self
            .http
            .post(&self.base_url)
            .header(ACCEPT, "application/json")
            .json(&[building_id])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(building_id = %building_id, status = %status, "Particles fetch failed");
            return Err(FetchError::Status(status));
        }

        let records: Vec<ModelRecord> = resp.json().await?;
        records
            .into_iter()
            .next()
            .map(|record| record.particles)
            .ok_or_else(|| FetchError::Empty(building_id.to_string()))
    }
}
