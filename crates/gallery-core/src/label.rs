use crate::catalog::CatalogEntry;

/// Title/artist caption shown over the canvas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelState {
    pub title: String,
    pub artist: String,
    pub opacity: f32,
}

/// Label mutations for the DOM layer to mirror, in the order they happened.
#[derive(Clone, Debug, PartialEq)]
pub enum LabelEvent {
    Hide,
    Reveal { title: String, artist: String },
}

impl LabelState {
    pub fn showing(entry: &CatalogEntry) -> Self {
        Self {
            title: entry.title.clone(),
            artist: entry.artist.clone(),
            opacity: 1.0,
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    pub fn hide(&mut self) -> LabelEvent {
        self.opacity = 0.0;
        LabelEvent::Hide
    }

    /// Swap in the entry's text, then show it.
    pub fn reveal(&mut self, entry: &CatalogEntry) -> LabelEvent {
        self.title = entry.title.clone();
        self.artist = entry.artist.clone();
        self.opacity = 1.0;
        LabelEvent::Reveal {
            title: self.title.clone(),
            artist: self.artist.clone(),
        }
    }
}
