pub mod builder;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod gallery;
pub mod label;
pub mod navigation;
pub mod picking;
pub mod router;
pub mod scene;
pub mod state;
pub mod texture;
pub mod tween;

pub static GALLERY_WGSL: &str = include_str!("../shaders/gallery.wgsl");

pub use builder::{GalleryRing, PanelSlot};
pub use catalog::{Catalog, CatalogEntry};
pub use config::{GalleryConfig, Mode};
pub use constants::*;
pub use error::{AssetError, GalleryError};
pub use gallery::Gallery;
pub use label::{LabelEvent, LabelState};
pub use navigation::{Direction, NavigateOutcome, NavigationIntent, NavigationState};
pub use scene::{DrawItem, Geometry, Glyph, NodeId, Scene, TextureId};
pub use state::*;
pub use texture::{decode_image, DecodedImage, TextureState};
