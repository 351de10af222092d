use crate::error::GalleryError;

/// One artwork shown on the ring.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub image_ref: String,
    pub title: String,
    pub artist: String,
}

pub const DEFAULT_IMAGES: &[&str] = &[
    "/socrates.jpg",
    "/stars.jpg",
    "/wave.jpg",
    "/spring.jpg",
    "/mountain.jpg",
    "/sunday.jpg",
];

pub const DEFAULT_TITLES: &[&str] = &[
    "The Death of Socrates",
    "Starry Night",
    "The Great Wave off Kanagawa",
    "Effect of Spring, Giverny",
    "Mount Corcoran",
    "A Sunday on La Grande Jatte",
];

pub const DEFAULT_ARTISTS: &[&str] = &[
    "Jacques-Louis David",
    "Vincent Van Gogh",
    "Katsushika Hokusai",
    "Claude Monet",
    "Albert Bierstadt",
    "George Seurat",
];

/// Ordered, immutable list of artworks. Index `i` is slot `i` on the ring.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Zip three index-aligned lists into a catalog.
    pub fn from_parallel<S: AsRef<str>>(
        images: &[S],
        titles: &[S],
        artists: &[S],
    ) -> Result<Self, GalleryError> {
        if images.len() != titles.len() || images.len() != artists.len() {
            return Err(GalleryError::CatalogMisaligned {
                images: images.len(),
                titles: titles.len(),
                artists: artists.len(),
            });
        }
        let entries = images
            .iter()
            .zip(titles)
            .zip(artists)
            .map(|((image, title), artist)| CatalogEntry {
                image_ref: image.as_ref().to_string(),
                title: title.as_ref().to_string(),
                artist: artist.as_ref().to_string(),
            })
            .collect();
        Ok(Self { entries })
    }

    /// The six paintings the gallery ships with.
    pub fn default_collection() -> Self {
        // The default lists are compile-time constants of equal length.
        let entries = DEFAULT_IMAGES
            .iter()
            .zip(DEFAULT_TITLES)
            .zip(DEFAULT_ARTISTS)
            .map(|((image, title), artist)| CatalogEntry {
                image_ref: image.to_string(),
                title: title.to_string(),
                artist: artist.to_string(),
            })
            .collect();
        Self { entries }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    /// Entry lookup for indices that are guaranteed by ring construction.
    ///
    /// Panics on an out-of-range index; that can only happen if an arrow
    /// payload was built wrong.
    #[inline]
    pub fn entry(&self, index: usize) -> &CatalogEntry {
        assert!(
            index < self.entries.len(),
            "catalog index {} out of range (len {})",
            index,
            self.entries.len()
        );
        &self.entries[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }
}
