use crate::catalog::CatalogKey;
use thiserror::Error;

/// Result type for matching and rescaling operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal pipeline errors.
///
/// Per-entry catalog problems are NOT represented here: during cache
/// construction they are typed skip reasons (see [`crate::cache`]) and never
/// abort the pipeline. Everything below does.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] reno_lite_geometry::Error),

    #[error("no usable catalog entry to match against")]
    NoCatalogMatch,

    #[error("catalog building volume is zero, cannot derive a scale index")]
    DivisionByZero,

    #[error("catalog documents for matched entry {key}: {reason}")]
    CatalogLoad { key: CatalogKey, reason: String },
}
