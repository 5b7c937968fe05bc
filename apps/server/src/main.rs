// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reno-Lite Server - renovation cost proposal service.
//!
//! Matches a building's 3D-twin geometry against a catalog of completed
//! renovation proposals and rescales the nearest proposal's cost items to
//! the building's volume.
//!
//! # Endpoints
//!
//! - `GET /api/v1/health` - Health check
//! - `POST /api/v1/proposal` - Match and rescale (JSON)
//! - `GET /api/v1/proposal/:building_id/pdf` - Rendered quote document
//! - `POST /api/v1/catalog/reload` - Rebuild the catalog snapshot

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

mod config;
mod error;
mod routes;
mod services;

use config::Config;
use services::{CatalogStore, ParticlesClient};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub particles: Arc<ParticlesClient>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,tower_http=debug,reno_lite_server=debug".into()),
        )
        .pretty()
        .init();

    let config = Config::from_env();

    tracing::info!(
        port = config.port,
        catalog_archive = %config.catalog_archive,
        catalog_dir = %config.catalog_dir,
        particles_api = %config.particles_api_url,
        worker_threads = config.worker_threads,
        "Starting Reno-Lite Server"
    );

    // Initialize rayon thread pool
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads)
        .build_global()
        .expect("Failed to initialize rayon thread pool");

    // Discover the catalog and build the descriptor cache once, up front.
    // Requests share this snapshot read-only until an explicit reload.
    let catalog = match CatalogStore::load(&config) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(error = %e, "Catalog initialization failed");
            std::process::exit(1);
        }
    };

    let particles = Arc::new(ParticlesClient::new(&config.particles_api_url));

    let state = AppState {
        catalog,
        particles,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = Router::new()
        // Root endpoint - API information
        .route("/", get(routes::health::info))
        // Health check
        .route("/api/v1/health", get(routes::health::check))
        // Proposal endpoints
        .route("/api/v1/proposal", post(routes::proposal::create))
        .route(
            "/api/v1/proposal/:building_id/pdf",
            get(routes::proposal::pdf),
        )
        // Catalog administration
        .route("/api/v1/catalog/reload", post(routes::catalog::reload))
        // Middleware
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
