//! Album data provider.
//!
//! Albums come from a TOML catalog file, from scanning album directories, or
//! both. Lookup is by slug and is purely in-process.

mod load;
mod model;
mod scan;

pub use model::*;
pub use scan::{scan_album_dir, scan_music_dir};

use tracing::warn;

use crate::error::CatalogError;

/// An ordered, slug-unique set of albums.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    albums: Vec<Album>,
}

impl Catalog {
    /// Add an album, rejecting duplicate slugs.
    pub fn insert(&mut self, album: Album) -> Result<(), CatalogError> {
        if self.find(&album.slug).is_some() {
            return Err(CatalogError::DuplicateSlug(album.slug));
        }
        self.albums.push(album);
        Ok(())
    }

    /// Merge `other` into this catalog. Albums whose slug is already present
    /// are skipped; the first source wins.
    pub fn merge(&mut self, other: Catalog) {
        for album in other.albums {
            if self.find(&album.slug).is_some() {
                warn!(slug = %album.slug, title = %album.title, "skipping album with duplicate slug");
                continue;
            }
            self.albums.push(album);
        }
    }

    pub fn find(&self, slug: &str) -> Option<&Album> {
        self.albums.iter().find(|a| a.slug == slug)
    }

    pub fn first(&self) -> Option<&Album> {
        self.albums.first()
    }

    pub fn slugs(&self) -> Vec<&str> {
        self.albums.iter().map(|a| a.slug.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.albums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }
}

impl FromIterator<Album> for Catalog {
    /// Collect albums, keeping the first of any duplicated slug.
    fn from_iter<I: IntoIterator<Item = Album>>(iter: I) -> Self {
        let mut catalog = Catalog::default();
        catalog.merge(Catalog {
            albums: iter.into_iter().collect(),
        });
        catalog
    }
}

/// Slug used when a name has no alphanumerics at all.
pub const FALLBACK_SLUG: &str = "untitled";

/// Lowercase alphanumerics (any script) joined by single dashes. Never empty.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if out.is_empty() {
        out.push_str(FALLBACK_SLUG);
    }
    out
}

#[cfg(test)]
mod tests;
