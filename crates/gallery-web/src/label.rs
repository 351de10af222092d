use crate::dom;
use gallery_core::LabelEvent;
use web_sys as web;

/// The `#title` / `#artist` caption elements over the canvas.
pub struct LabelElements {
    title: Option<web::HtmlElement>,
    artist: Option<web::HtmlElement>,
}

impl LabelElements {
    pub fn find(document: &web::Document) -> Self {
        let title = dom::html_element(document, "title");
        let artist = dom::html_element(document, "artist");
        if title.is_none() || artist.is_none() {
            log::warn!("[label] missing #title or #artist; caption updates are skipped");
        }
        Self { title, artist }
    }

    /// Mirror one label change into the DOM.
    pub fn apply(&self, event: &LabelEvent) {
        match event {
            LabelEvent::Hide => self.set_opacity("0"),
            LabelEvent::Reveal { title, artist } => {
                if let Some(el) = &self.title {
                    el.set_text_content(Some(title));
                }
                if let Some(el) = &self.artist {
                    el.set_text_content(Some(artist));
                }
                self.set_opacity("1");
            }
        }
    }

    fn set_opacity(&self, value: &str) {
        for el in [&self.title, &self.artist].into_iter().flatten() {
            let _ = el.style().set_property("opacity", value);
        }
    }
}
