//! Vertical geometry in viewport coordinates.
//!
//! Offsets within scrollable content are unsigned rows; once projected
//! into viewport coordinates a link scrolled past the top has a
//! negative edge, so viewport rects are signed.

/// Vertical extent of an element in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub top: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(top: i32, bottom: i32) -> Self {
        Self { top, bottom }
    }

    /// Build from a top edge and a height in rows
    pub fn from_top_height(top: i32, height: u16) -> Self {
        Self {
            top,
            bottom: top + height as i32,
        }
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// True when `inner` is fully inside this rect vertically
    #[inline]
    pub fn contains(&self, inner: &Rect) -> bool {
        inner.top >= self.top && inner.bottom <= self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_fully_visible() {
        let container = Rect::new(0, 500);
        let link = Rect::new(50, 90);
        assert!(container.contains(&link));
    }

    #[test]
    fn test_contains_edges_inclusive() {
        let container = Rect::new(0, 500);
        assert!(container.contains(&Rect::new(0, 500)));
    }

    #[test]
    fn test_not_contains_above() {
        let container = Rect::new(0, 500);
        assert!(!container.contains(&Rect::new(-10, 30)));
    }

    #[test]
    fn test_not_contains_below() {
        let container = Rect::new(0, 500);
        assert!(!container.contains(&Rect::new(480, 520)));
    }

    #[test]
    fn test_from_top_height() {
        let rect = Rect::from_top_height(-5, 3);
        assert_eq!(rect.top, -5);
        assert_eq!(rect.bottom, -2);
        assert_eq!(rect.height(), 3);
    }
}
