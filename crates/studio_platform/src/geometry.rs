//! Geometry primitives in viewport coordinates

/// Axis-aligned rectangle
///
/// Coordinates are relative to the top-left corner of the viewport, so a
/// rect scrolled above the visible area has a negative `y`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Check if this rect intersects with another
    ///
    /// Returns true if the two rects overlap at any point. Touching edges
    /// do not count as overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Check if the vertical span of this rect touches the band `[top, bottom]`
    ///
    /// Both ends are inclusive, so a zero-height rect sitting exactly on a
    /// band edge still counts.
    pub fn overlaps_band(&self, top: f32, bottom: f32) -> bool {
        self.top() <= bottom && self.bottom() >= top
    }

    /// Grow the rect by `margin` above and below
    pub fn expand_vertical(&self, margin: f32) -> Self {
        Self {
            x: self.x,
            y: self.y - margin,
            width: self.width,
            height: self.height + 2.0 * margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.right(), 40.0);
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(a.intersects(&Rect::new(50.0, 50.0, 100.0, 100.0)));
        assert!(!a.intersects(&Rect::new(0.0, 100.0, 100.0, 100.0)));
    }

    #[test]
    fn test_band_is_inclusive() {
        let r = Rect::new(0.0, 100.0, 10.0, 50.0);
        assert!(r.overlaps_band(0.0, 100.0));
        assert!(r.overlaps_band(150.0, 300.0));
        assert!(!r.overlaps_band(0.0, 99.9));
        assert!(!r.overlaps_band(150.1, 300.0));

        let flat = Rect::new(0.0, 100.0, 10.0, 0.0);
        assert!(flat.overlaps_band(100.0, 200.0));
        assert!(!flat.overlaps_band(100.5, 200.0));
    }

    #[test]
    fn test_expand_vertical() {
        let r = Rect::new(0.0, 100.0, 10.0, 50.0).expand_vertical(100.0);
        assert_eq!(r.top(), 0.0);
        assert_eq!(r.bottom(), 250.0);
        assert_eq!(r.width, 10.0);
    }
}
