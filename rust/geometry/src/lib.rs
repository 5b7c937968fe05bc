//! Reno-Lite Geometry
//!
//! Triangle-soup mesh types plus the two geometric reductions the proposal
//! pipeline is built on: canonical-frame normalization and fixed-size
//! descriptor extraction.

pub mod descriptor;
pub mod error;
pub mod mesh;
pub mod normalize;
pub mod volume;

// Re-export nalgebra types for convenience
pub use nalgebra::Point3;

pub use descriptor::GeometryDescriptor;
pub use error::{Error, Result};
pub use mesh::{Mesh, Triangle};
pub use normalize::normalize;
pub use volume::rescale_volume_proxy;
