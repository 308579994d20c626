//! Wall-of-love grid selection.

use std::sync::Arc;

use pouch_testimonials::{TestimonialCollection, TestimonialRecord};

/// Featured image while nothing is hovered.
pub const DEFAULT_WALL_IMAGE: &str = "/imgs/testimonials/pouch-hover/morlife.webp";

/// Hover and click state for the testimonial grid.
#[derive(Debug, Clone)]
pub struct WallOfLove {
    records: Arc<TestimonialCollection>,
    hovered: Option<usize>,
    active: Option<usize>,
}

impl WallOfLove {
    pub fn new(records: Arc<TestimonialCollection>) -> Self {
        Self {
            records,
            hovered: None,
            active: None,
        }
    }

    /// Pointer entered a tile. Unknown positions are ignored.
    pub fn hover(&mut self, index: usize) {
        if index < self.records.len() {
            self.hovered = Some(index);
        }
    }

    pub fn leave(&mut self) {
        self.hovered = None;
    }

    /// Open the detail popup for a tile.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.records.len() {
            return false;
        }
        self.active = Some(index);
        true
    }

    pub fn close(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<&TestimonialRecord> {
        self.active.and_then(|i| self.records.get(i))
    }

    /// Pouch image of the hovered record, or the default.
    pub fn featured_image(&self) -> &str {
        self.hovered
            .and_then(|i| self.records.get(i))
            .and_then(|r| r.pouch_image.as_deref())
            .unwrap_or(DEFAULT_WALL_IMAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> WallOfLove {
        let collection = TestimonialCollection::from_json(
            r#"[
                {"id":"a","name":"A","ownerImage":"/a.png","pouchImage":"/pouch/a.webp"},
                {"id":"b","name":"B","ownerImage":"/b.png"}
            ]"#,
        )
        .unwrap();
        WallOfLove::new(Arc::new(collection))
    }

    #[test]
    fn hover_swaps_featured_image() {
        let mut w = wall();
        assert_eq!(w.featured_image(), DEFAULT_WALL_IMAGE);
        w.hover(0);
        assert_eq!(w.featured_image(), "/pouch/a.webp");
        w.hover(1);
        assert_eq!(w.featured_image(), DEFAULT_WALL_IMAGE);
        w.leave();
        assert_eq!(w.featured_image(), DEFAULT_WALL_IMAGE);
    }

    #[test]
    fn select_and_close() {
        let mut w = wall();
        assert!(!w.select(5));
        assert!(w.active().is_none());
        assert!(w.select(1));
        assert_eq!(w.active().unwrap().id, "b");
        w.close();
        assert!(w.active().is_none());
    }
}
