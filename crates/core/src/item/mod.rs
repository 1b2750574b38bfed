use std::{collections::HashSet, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{CarouselError, Result};

/// A single entry supplied by the playlist data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CarouselItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artist: None,
            album: None,
            image_url: None,
        }
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// Loads a JSON array of items, rejecting duplicate ids.
pub fn load_items(path: impl AsRef<Path>) -> Result<Vec<CarouselItem>> {
    let raw = fs::read_to_string(path)?;
    let items: Vec<CarouselItem> = serde_json::from_str(&raw)?;
    ensure_unique_ids(&items)?;
    Ok(items)
}

/// Item ids identify the logical item behind every clone, so they must be unique.
pub fn ensure_unique_ids(items: &[CarouselItem]) -> Result<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(CarouselError::msg(format!(
                "duplicate item id `{}` in carousel items",
                item.id
            )));
        }
    }
    Ok(())
}
