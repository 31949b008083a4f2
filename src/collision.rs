//! Axis-aligned bounding boxes.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Strict overlap test: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x && self.y < other.bottom() && self.bottom() > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_boxes_collide_both_ways() {
        let a = Rect::new(100.0, 420.0, 80.0, 80.0);
        let b = Rect::new(150.0, 440.0, 40.0, 60.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn shared_edges_do_not_collide() {
        let player = Rect::new(100.0, 420.0, 80.0, 80.0);
        // obstacle.x == player.x + player.width
        let right = Rect::new(180.0, 440.0, 40.0, 60.0);
        assert!(!player.overlaps(&right));
        assert!(!right.overlaps(&player));
        // sitting exactly on top
        let above = Rect::new(120.0, 390.0, 30.0, 30.0);
        assert!(!player.overlaps(&above));
    }

    #[test]
    fn one_pixel_in_collides() {
        let player = Rect::new(100.0, 420.0, 80.0, 80.0);
        assert!(player.overlaps(&Rect::new(179.0, 440.0, 40.0, 60.0)));
    }

    #[test]
    fn disjoint_on_one_axis_is_enough() {
        let player = Rect::new(100.0, 420.0, 80.0, 80.0);
        // x overlaps, y far above
        assert!(!player.overlaps(&Rect::new(110.0, 100.0, 30.0, 30.0)));
    }
}
