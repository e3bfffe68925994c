use std::path::PathBuf;

use thiserror::Error;

pub mod block;
pub mod color;
pub mod config;
pub mod migration;
pub mod pipeline;
pub mod scan;
pub mod texture;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid hex color: {0:?}")]
    InvalidHexColor(String),
    #[error("Color list cannot be empty")]
    EmptyColorList,
    #[error("Migration target {target:?} for alias {alias:?} has no color")]
    UnresolvedMigration { alias: String, target: String },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
    #[error(transparent)]
    ImageError(#[from] image::ImageError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// Re-Exports
pub use image;
pub use indexmap;
pub use palette;
pub use serde;
pub use serde_json;
