// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Catalog discovery: archive extraction and proposal-document mapping.
//!
//! The catalog arrives as one delivery archive containing a zip per proposal
//! bundle. Each bundle holds `PROPOSAL<n>` documents: `*.3D.json` carries the
//! building mesh, the plain `*.json` the cost proposal.

use regex::Regex;
use reno_lite_matching::{Catalog, CatalogKey};
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors during archive extraction and mapping.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Extract the delivery archive and map every proposal bundle.
///
/// Bundle zips get group indices 1, 2, ... in sorted walk order, so keys are
/// stable for an unchanged archive. Returns the `CatalogKey -> CatalogEntry`
/// mapping the pipeline consumes.
pub fn load_catalog(archive_path: &Path, extract_to: &Path) -> Result<Catalog, DiscoveryError> {
    std::fs::create_dir_all(extract_to)?;
    unzip(archive_path, extract_to)?;

    let mut bundles: Vec<PathBuf> = WalkDir::new(extract_to)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file()
                && e.path().extension().is_some_and(|ext| ext == "zip")
        })
        .map(|e| e.into_path())
        .collect();
    bundles.sort();

    let pattern = Regex::new(r"^PROPOSAL(\d+)").expect("static pattern");
    let mut catalog = Catalog::default();

    for (index, bundle) in bundles.iter().enumerate() {
        let group = index as u64 + 1;
        // Bundle contents land in a sibling directory named after the stem.
        let dest = bundle.with_extension("");
        std::fs::create_dir_all(&dest)?;
        unzip(bundle, &dest)?;
        map_bundle(group, &dest, &pattern, &mut catalog);
    }

    tracing::info!(
        bundles = bundles.len(),
        entries = catalog.len(),
        "Catalog discovery complete"
    );
    Ok(catalog)
}

fn unzip(archive_path: &Path, dest: &Path) -> Result<(), DiscoveryError> {
    let mut archive = zip::ZipArchive::new(File::open(archive_path)?)?;
    archive.extract(dest)?;
    Ok(())
}

/// Collect `PROPOSAL<n>` documents under one extracted bundle.
fn map_bundle(group: u64, dir: &Path, pattern: &Regex, catalog: &mut Catalog) {
    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        let Some(caps) = pattern.captures(&name) else {
            continue;
        };
        let Ok(number) = caps[1].parse::<u64>() else {
            continue;
        };

        let key = CatalogKey::compose(group, number);
        let slot = catalog.entry(key).or_default();
        if name.ends_with(".3D.json") {
            slot.mesh_document = Some(entry.into_path());
        } else if name.ends_with(".json") {
            slot.cost_document = Some(entry.into_path());
        }
    }
}
