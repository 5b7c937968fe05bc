// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Service modules for catalog management, geometry fetching and rendering.

pub mod catalog;
pub mod discovery;
pub mod fetch;
pub mod pdf;

pub use catalog::CatalogStore;
pub use discovery::load_catalog;
pub use fetch::ParticlesClient;
pub use pdf::render_proposal;
