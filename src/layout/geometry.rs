//! Plain geometry records produced by a layout pass.

/// A point in canvas coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned node box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Half-open containment: left/top edges inside, right/bottom outside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// Horizontal interval `[left, right)` allocated to a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Band {
    pub left: f64,
    pub right: f64,
}

impl Band {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn center(&self) -> f64 {
        self.left + self.width() / 2.0
    }
}

/// Line from the bottom centre of a parent box to the top centre of a child box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Connector {
    pub from: Point,
    pub to: Point,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_rect_then_edges_are_exclusive_on_far_side() {
        let r = Rect {
            x: 10.0,
            y: 20.0,
            width: 5.0,
            height: 5.0,
        };
        assert!(r.contains(Point::new(10.0, 20.0)));
        assert!(r.contains(Point::new(14.9, 24.9)));
        assert!(!r.contains(Point::new(15.0, 22.0)));
        assert!(!r.contains(Point::new(12.0, 25.0)));
        assert_eq!(r.center_x(), 12.5);
    }
}
