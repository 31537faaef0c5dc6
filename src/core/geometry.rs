use serde::{Deserialize, Serialize};

/// Pixel rectangle locating the physical card on its source image.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardGeometry {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl CardGeometry {
    pub fn new(top: i32, left: i32, right: i32, bottom: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Horizontal extent; widened so any pair of `i32` edges fits.
    pub fn width(&self) -> i64 {
        i64::from(self.right) - i64::from(self.left)
    }

    pub fn height(&self) -> i64 {
        i64::from(self.bottom) - i64::from(self.top)
    }

    /// True when the rectangle has no area and therefore no cells.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_extent() {
        let geometry = CardGeometry::new(10, 20, 220, 110);
        assert_eq!(geometry.width(), 200);
        assert_eq!(geometry.height(), 100);
        assert!(!geometry.is_degenerate());
    }

    #[test]
    fn zeroed_and_inverted_rectangles_are_degenerate() {
        assert!(CardGeometry::default().is_degenerate());
        assert!(CardGeometry::new(0, 50, 10, 40).is_degenerate());
        assert!(CardGeometry::new(40, 0, 10, 20).is_degenerate());
    }

    #[test]
    fn extreme_edges_do_not_overflow() {
        let wide = CardGeometry::new(i32::MIN, -10, i32::MAX, i32::MAX);
        assert_eq!(wide.width(), i64::from(i32::MAX) + 10);
        assert_eq!(wide.height(), u32::MAX as i64);
        assert!(!wide.is_degenerate());

        let inverted = CardGeometry::new(i32::MAX, i32::MAX, i32::MIN, i32::MIN);
        assert!(inverted.width() < 0);
        assert!(inverted.is_degenerate());
    }
}
