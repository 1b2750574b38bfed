//! Boundary cloning: how many clones the strip needs and which item sits at
//! each display index of the extended sequence.

use std::ops::Range;

use crate::{config::LayoutConfig, CarouselItem};

/// Number of clones rendered on each side of the real items.
///
/// Enough clones to cover one viewport on either side, plus slack for
/// partially visible cards, never fewer than `min_clones`.
pub fn clone_count(container_width: f64, layout: &LayoutConfig) -> usize {
    let width = if container_width.is_finite() {
        container_width.max(0.0)
    } else {
        0.0
    };
    let pitch = layout.card_width + layout.gap;
    let fitting = if pitch > 0.0 {
        ((width + layout.gap) / pitch).floor() as usize
    } else {
        0
    };
    (fitting + layout.clone_slack).max(layout.min_clones)
}

/// One displayed card: the logical item plus where it sits in the strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtendedItem<'a> {
    pub item: &'a CarouselItem,
    pub display_index: usize,
    /// Position of `item` in the original list.
    pub source_index: usize,
    pub is_clone: bool,
}

/// Index arithmetic for `clones + items + clones`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtendedSequence {
    item_count: usize,
    clone_count: usize,
}

impl ExtendedSequence {
    pub fn new(item_count: usize, clone_count: usize) -> Self {
        Self {
            item_count,
            clone_count,
        }
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn clone_count(&self) -> usize {
        self.clone_count
    }

    /// Total displayed cards; zero when there are no items.
    pub fn len(&self) -> usize {
        if self.item_count == 0 {
            0
        } else {
            self.item_count + 2 * self.clone_count
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Display indices occupied by the real (non-clone) items.
    pub fn real_range(&self) -> Range<usize> {
        if self.item_count == 0 {
            0..0
        } else {
            self.clone_count..self.clone_count + self.item_count
        }
    }

    pub fn is_clone(&self, display_index: usize) -> bool {
        display_index < self.len() && !self.real_range().contains(&display_index)
    }

    /// Maps a display index back to the original list, wrapping through clones.
    pub fn source_index(&self, display_index: usize) -> Option<usize> {
        if display_index >= self.len() {
            return None;
        }
        let shifted = display_index as isize - self.clone_count as isize;
        Some(shifted.rem_euclid(self.item_count as isize) as usize)
    }

    /// Display index of the real copy of `source_index`.
    pub fn display_index_of(&self, source_index: usize) -> Option<usize> {
        (source_index < self.item_count).then(|| self.clone_count + source_index)
    }

    /// Resolves every display slot against `items`.
    pub fn build<'a>(&self, items: &'a [CarouselItem]) -> Vec<ExtendedItem<'a>> {
        debug_assert_eq!(items.len(), self.item_count);
        (0..self.len())
            .filter_map(|display_index| {
                let source_index = self.source_index(display_index)?;
                Some(ExtendedItem {
                    item: items.get(source_index)?,
                    display_index,
                    source_index,
                    is_clone: self.is_clone(display_index),
                })
            })
            .collect()
    }
}

/// Convenience wrapper building the extended sequence in one call.
pub fn extend_items(items: &[CarouselItem], clone_count: usize) -> Vec<ExtendedItem<'_>> {
    ExtendedSequence::new(items.len(), clone_count).build(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(names: &[&str]) -> Vec<CarouselItem> {
        names
            .iter()
            .map(|name| CarouselItem::new(*name, *name))
            .collect()
    }

    fn ids(extended: &[ExtendedItem<'_>]) -> Vec<String> {
        extended.iter().map(|e| e.item.id.clone()).collect()
    }

    #[test]
    fn clone_count_covers_viewport_with_slack() {
        let layout = LayoutConfig::default();

        assert_eq!(clone_count(0.0, &layout), 3);
        assert_eq!(clone_count(240.0, &layout), 3);
        // (1000 + 16) / 256 = 3.97 -> 3 cards fit, plus one for slack.
        assert_eq!(clone_count(1000.0, &layout), 4);
        assert_eq!(clone_count(2544.0, &layout), 11);
    }

    #[test]
    fn clone_count_ignores_unmeasurable_widths() {
        let layout = LayoutConfig::default();
        assert_eq!(clone_count(f64::NAN, &layout), 3);
        assert_eq!(clone_count(-50.0, &layout), 3);
    }

    #[test]
    fn three_items_three_clones() {
        let list = items(&["A", "B", "C"]);
        let extended = extend_items(&list, 3);

        assert_eq!(
            ids(&extended),
            ["A", "B", "C", "A", "B", "C", "A", "B", "C"]
        );
        assert!(extended[2].is_clone);
        assert!(!extended[3].is_clone);
        assert!(extended[6].is_clone);
    }

    #[test]
    fn wraps_when_clones_exceed_items() {
        let list = items(&["A", "B"]);
        let extended = extend_items(&list, 3);

        assert_eq!(ids(&extended), ["B", "A", "B", "A", "B", "A", "B", "A"]);
        assert_eq!(ExtendedSequence::new(2, 3).real_range(), 3..5);
    }

    #[test]
    fn middle_matches_original_for_many_shapes() {
        for n in 1..=9 {
            let list: Vec<CarouselItem> = (0..n)
                .map(|i| CarouselItem::new(i.to_string(), format!("item {i}")))
                .collect();
            for c in 3..=8 {
                let sequence = ExtendedSequence::new(n, c);
                let extended = sequence.build(&list);

                assert_eq!(extended.len(), n + 2 * c);
                let middle: Vec<&CarouselItem> = extended[sequence.real_range()]
                    .iter()
                    .map(|e| e.item)
                    .collect();
                assert_eq!(middle, list.iter().collect::<Vec<_>>());
                // Leading clones continue the list, trailing clones precede it.
                assert_eq!(extended[c + n].item, &list[0]);
                assert_eq!(extended[c - 1].item, &list[n - 1]);
            }
        }
    }

    #[test]
    fn empty_items_render_nothing() {
        let sequence = ExtendedSequence::new(0, 3);
        assert!(sequence.is_empty());
        assert!(sequence.build(&[]).is_empty());
        assert_eq!(sequence.source_index(0), None);
        assert_eq!(sequence.display_index_of(0), None);
    }
}
