use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::{LightFloor, Rect};

/// Errors raised while building or loading level geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// A solid rectangle has a negative width or height.
    #[error("solid rect #{index} has a negative size: {rect:?}")]
    NegativeSize { index: usize, rect: Rect },

    /// A light floor whose right end lies left of its left end.
    #[error("light floor #{index} is inverted (right < left): {floor:?}")]
    InvertedLightFloor { index: usize, floor: LightFloor },

    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse level: {0}")]
    Parse(#[from] toml::de::Error),
}
