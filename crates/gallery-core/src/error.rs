use thiserror::Error;

/// Errors raised while assembling the gallery.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GalleryError {
    #[error("catalog lists are misaligned: {images} images, {titles} titles, {artists} artists")]
    CatalogMisaligned {
        images: usize,
        titles: usize,
        artists: usize,
    },
}

/// Why a single artwork image could not be turned into a texture.
///
/// These never abort the gallery; the affected panel falls back to an
/// untextured material.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("empty image reference")]
    EmptyReference,
    #[error("fetch of {reference} failed: {reason}")]
    Fetch { reference: String, reason: String },
    #[error("decode of {reference} failed: {reason}")]
    Decode { reference: String, reason: String },
}
