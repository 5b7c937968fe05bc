// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// Path to the delivered catalog archive (zip of proposal bundles).
    pub catalog_archive: String,
    /// Working directory the archive is extracted into.
    pub catalog_dir: String,
    /// Endpoint of the 3D-twin particles API.
    pub particles_api_url: String,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Number of worker threads for parallel catalog indexing.
    pub worker_threads: usize,
    /// Allowed CORS origins (comma-separated, or "*" for all in development).
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .unwrap_or(8080),
            catalog_archive: std::env::var("CATALOG_ARCHIVE")
                .unwrap_or_else(|_| "./catalog.zip".into()),
            catalog_dir: std::env::var("CATALOG_DIR").unwrap_or_else(|_| {
                // Absolute path for local development to avoid cwd surprises
                std::env::current_dir()
                    .ok()
                    .and_then(|dir| dir.join(".catalog").to_str().map(|s| s.to_string()))
                    .unwrap_or_else(|| "./.catalog".into())
            }),
            particles_api_url: std::env::var("PARTICLES_API_URL").unwrap_or_else(|_| {
                "https://livekluster.ehr.ee/api/3dtwin/v1/rest-api/particles".into()
            }),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "300".into())
                .parse()
                .unwrap_or(300),
            worker_threads: std::env::var("WORKER_THREADS")
                .unwrap_or_else(|_| num_cpus::get().to_string())
                .parse()
                .unwrap_or_else(|_| num_cpus::get()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| {
                    "http://localhost:3000,http://localhost:5173,http://127.0.0.1:3000,http://127.0.0.1:5173".into()
                })
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        for var in [
            "PORT",
            "CATALOG_ARCHIVE",
            "PARTICLES_API_URL",
            "REQUEST_TIMEOUT_SECS",
        ] {
            std::env::remove_var(var);
        }

        let config = Config::from_env();
        assert_eq!(config.port, 8080);
        assert_eq!(config.catalog_archive, "./catalog.zip");
        assert!(config.particles_api_url.ends_with("/particles"));
        assert_eq!(config.request_timeout_secs, 300);
        assert!(!config.cors_origins.is_empty());
    }
}
