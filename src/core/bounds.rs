use crate::core::geo::{Point, Size};
use crate::traits::PointMath;
use serde::{Deserialize, Serialize};

/// Represents an axis-aligned box in pixel coordinates (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Creates new bounds from two points
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// Creates bounds from a top-left corner and a size
    pub fn from_origin_and_size(origin: Point, size: Size) -> Self {
        Self::new(
            origin,
            Point::new(origin.x + size.width, origin.y + size.height),
        )
    }

    /// Gets the width of the bounds
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Gets the height of the bounds
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Gets the size of the bounds
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Gets the top-left corner
    pub fn origin(&self) -> Point {
        self.min
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Checks if the bounds contain a point (edges inclusive)
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Returns the bounds shifted by the given offset
    pub fn translated(&self, offset: &Point) -> Bounds {
        Bounds::new(self.min.add(offset), self.max.add(offset))
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(Point::new(0.0, 0.0), Point::new(0.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_creation() {
        let bounds = Bounds::from_origin_and_size(Point::new(10.0, 20.0), Size::new(20.0, 20.0));
        assert_eq!(bounds.width(), 20.0);
        assert_eq!(bounds.height(), 20.0);
        assert_eq!(bounds.center(), Point::new(20.0, 30.0));
        assert_eq!(bounds.max, Point::new(30.0, 40.0));
    }

    #[test]
    fn test_bounds_contains_edges() {
        let bounds = Bounds::from_coords(10.0, 20.0, 30.0, 40.0);
        assert!(bounds.contains(&Point::new(15.0, 25.0)));
        assert!(bounds.contains(&Point::new(10.0, 40.0)));
        assert!(!bounds.contains(&Point::new(5.0, 25.0)));
    }

    #[test]
    fn test_bounds_translated() {
        let bounds = Bounds::from_coords(0.0, 0.0, 10.0, 10.0);
        let moved = bounds.translated(&Point::new(-5.0, 5.0));
        assert_eq!(moved, Bounds::from_coords(-5.0, 5.0, 5.0, 15.0));
    }
}
