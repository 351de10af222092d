use crate::constants::MAX_TEXTURE_EDGE;
use crate::error::AssetError;
use image::imageops::FilterType;
use crate::scene::TextureId;
use std::rc::Rc;

/// Decoded RGBA8 pixels ready for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Load state of one artwork texture.
#[derive(Clone, Debug)]
pub enum TextureState {
    Pending,
    Loaded(Rc<DecodedImage>),
    Failed(AssetError),
}

impl TextureState {
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, TextureState::Pending)
    }

    #[inline]
    pub fn image(&self) -> Option<&Rc<DecodedImage>> {
        match self {
            TextureState::Loaded(img) => Some(img),
            _ => None,
        }
    }
}

/// Decode an encoded image (JPEG/PNG) into RGBA8.
///
/// Images with an edge longer than [`MAX_TEXTURE_EDGE`] are downscaled to fit,
/// keeping their aspect ratio.
pub fn decode_image(reference: &str, bytes: &[u8]) -> Result<DecodedImage, AssetError> {
    let mut img = image::load_from_memory(bytes).map_err(|e| AssetError::Decode {
        reference: reference.to_string(),
        reason: e.to_string(),
    })?;
    if img.width() > MAX_TEXTURE_EDGE || img.height() > MAX_TEXTURE_EDGE {
        log::info!(
            "[assets] {} is {}x{}, downscaling to fit {}",
            reference,
            img.width(),
            img.height(),
            MAX_TEXTURE_EDGE
        );
        img = img.resize(MAX_TEXTURE_EDGE, MAX_TEXTURE_EDGE, FilterType::Triangle);
    }
    let rgba = img.to_rgba8();
    Ok(DecodedImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

/// One texture slot per catalog entry, resolved asynchronously.
#[derive(Debug, Default)]
pub struct TextureSlots {
    slots: Vec<TextureState>,
    // Bumped on every resolution so renderers can skip unchanged frames.
    generation: u64,
}

impl TextureSlots {
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![TextureState::Pending; count],
            generation: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, id: TextureId) -> Option<&TextureState> {
        self.slots.get(id.0)
    }

    /// Record the outcome of a load. Failures are logged, never raised.
    pub fn resolve(&mut self, id: TextureId, reference: &str, result: Result<DecodedImage, AssetError>) {
        let Some(slot) = self.slots.get_mut(id.0) else {
            log::warn!("[assets] ignoring result for unknown texture slot {}", id.0);
            return;
        };
        *slot = match result {
            Ok(img) => {
                log::info!("[assets] loaded {} ({}x{})", reference, img.width, img.height);
                TextureState::Loaded(Rc::new(img))
            }
            Err(e) => {
                log::error!("[assets] error while loading {}: {}", reference, e);
                TextureState::Failed(e)
            }
        };
        self.generation += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = (TextureId, &TextureState)> {
        self.slots.iter().enumerate().map(|(i, s)| (TextureId(i), s))
    }
}
