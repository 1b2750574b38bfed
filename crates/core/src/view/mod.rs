//! Presentation model: what a renderer needs to draw each card.

use crate::{config::EmphasisConfig, sequence::ExtendedItem, CarouselItem};

/// Role of the scroll container.
pub const CAROUSEL_ROLE: &str = "carousel";
/// Role of every card.
pub const SLIDE_ROLE: &str = "group";
pub const SLIDE_ROLE_DESCRIPTION: &str = "slide";

/// Accessibility attributes for one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideAria {
    pub role: &'static str,
    pub role_description: &'static str,
    pub label: String,
    /// Clones duplicate a real card and are hidden from assistive technology.
    pub hidden: bool,
    pub selected: bool,
}

/// One card of the strip with its emphasis styling resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideView<'a> {
    pub item: &'a CarouselItem,
    pub display_index: usize,
    pub source_index: usize,
    pub is_clone: bool,
    pub is_active: bool,
    pub scale: f32,
    pub opacity: f32,
    pub aria: SlideAria,
}

impl<'a> SlideView<'a> {
    pub fn new(
        extended: ExtendedItem<'a>,
        item_count: usize,
        active_display_index: usize,
        emphasis: &EmphasisConfig,
    ) -> Self {
        let is_active = extended.display_index == active_display_index;
        let (scale, opacity) = if is_active {
            (emphasis.active_scale, emphasis.active_opacity)
        } else {
            (emphasis.inactive_scale, emphasis.inactive_opacity)
        };

        Self {
            item: extended.item,
            display_index: extended.display_index,
            source_index: extended.source_index,
            is_clone: extended.is_clone,
            is_active,
            scale,
            opacity,
            aria: SlideAria {
                role: SLIDE_ROLE,
                role_description: SLIDE_ROLE_DESCRIPTION,
                label: slide_label(extended.item, extended.source_index, item_count),
                hidden: extended.is_clone,
                selected: is_active,
            },
        }
    }
}

/// "2 of 5: Song by Artist"
pub fn slide_label(item: &CarouselItem, source_index: usize, item_count: usize) -> String {
    let position = source_index + 1;
    match &item.artist {
        Some(artist) => format!("{position} of {item_count}: {} by {artist}", item.name),
        None => format!("{position} of {item_count}: {}", item.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::extend_items;

    #[test]
    fn active_card_is_emphasised() {
        let items = vec![
            CarouselItem::new("a", "Intro").with_artist("Band"),
            CarouselItem::new("b", "Outro"),
        ];
        let emphasis = EmphasisConfig::default();
        let slides: Vec<SlideView<'_>> = extend_items(&items, 3)
            .into_iter()
            .map(|e| SlideView::new(e, items.len(), 3, &emphasis))
            .collect();

        let active = &slides[3];
        assert!(active.is_active && !active.is_clone);
        assert_eq!(active.scale, emphasis.active_scale);
        assert_eq!(active.aria.label, "1 of 2: Intro by Band");
        assert!(active.aria.selected);

        let clone = &slides[1];
        assert!(clone.aria.hidden);
        assert_eq!(clone.opacity, emphasis.inactive_opacity);
        assert_eq!(clone.aria.label, "1 of 2: Intro by Band");
        assert_eq!(slides[4].aria.label, "2 of 2: Outro");
    }
}
