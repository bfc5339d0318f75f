//! Mapping between the caller-facing relative coordinate space and content
//! pixels.
//!
//! Relative space is described by four edges. By default it is the unit
//! square, `left = top = 0` and `right = bottom = 1`, but callers may define
//! any non-degenerate rectangle, including inverted axes (for example a
//! latitude range where `top > bottom`). Pixel space is the full-resolution
//! content at scale 1.0, with the origin in the top-left corner.
//!
//! Values outside the declared bounds are extrapolated linearly; overlays are
//! allowed to sit off the content.

use crate::{
    core::geo::{Point, Size},
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// Edges of the relative coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeBounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl RelativeBounds {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    fn validate(&self) -> Result<()> {
        let edges = [self.left, self.top, self.right, self.bottom];
        if edges.iter().any(|edge| !edge.is_finite()) {
            return Err(MapError::InvalidBounds(format!(
                "edges must be finite, got {self:?}"
            )));
        }
        if self.width() == 0.0 || self.height() == 0.0 {
            return Err(MapError::InvalidBounds(format!(
                "bounds must span a non-zero width and height, got {self:?}"
            )));
        }
        Ok(())
    }
}

impl Default for RelativeBounds {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}

/// Stateless-per-call translation between relative and pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateTranslater {
    bounds: RelativeBounds,
    content_size: Size,
}

impl CoordinateTranslater {
    /// Creates a translater over the unit square for the given content size
    pub fn new(content_size: Size) -> Result<Self> {
        Self::with_bounds(content_size, RelativeBounds::default())
    }

    /// Creates a translater with custom relative bounds
    pub fn with_bounds(content_size: Size, bounds: RelativeBounds) -> Result<Self> {
        validate_content_size(content_size)?;
        bounds.validate()?;
        Ok(Self {
            bounds,
            content_size,
        })
    }

    /// Redefines the relative coordinate space
    pub fn define_bounds(&mut self, left: f64, top: f64, right: f64, bottom: f64) -> Result<()> {
        let bounds = RelativeBounds::new(left, top, right, bottom);
        bounds.validate()?;
        self.bounds = bounds;
        Ok(())
    }

    /// Restores the unit square
    pub fn undefine_bounds(&mut self) {
        self.bounds = RelativeBounds::default();
    }

    pub fn set_content_size(&mut self, content_size: Size) -> Result<()> {
        validate_content_size(content_size)?;
        self.content_size = content_size;
        Ok(())
    }

    pub fn bounds(&self) -> RelativeBounds {
        self.bounds
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Whether a relative point lies inside the declared bounds
    pub fn contains(&self, relative: &Point) -> bool {
        let (min_x, max_x) = ordered(self.bounds.left, self.bounds.right);
        let (min_y, max_y) = ordered(self.bounds.top, self.bounds.bottom);
        relative.x >= min_x && relative.x <= max_x && relative.y >= min_y && relative.y <= max_y
    }

    pub fn translate_x(&self, relative_x: f64) -> f64 {
        self.translate_and_scale_x(relative_x, 1.0)
    }

    pub fn translate_y(&self, relative_y: f64) -> f64 {
        self.translate_and_scale_y(relative_y, 1.0)
    }

    pub fn translate_and_scale_x(&self, relative_x: f64, scale: f64) -> f64 {
        let factor = (relative_x - self.bounds.left) / self.bounds.width();
        factor * self.content_size.width * scale
    }

    pub fn translate_and_scale_y(&self, relative_y: f64, scale: f64) -> f64 {
        let factor = (relative_y - self.bounds.top) / self.bounds.height();
        factor * self.content_size.height * scale
    }

    pub fn untranslate_x(&self, pixel_x: f64) -> f64 {
        self.untranslate_and_scale_x(pixel_x, 1.0)
    }

    pub fn untranslate_y(&self, pixel_y: f64) -> f64 {
        self.untranslate_and_scale_y(pixel_y, 1.0)
    }

    /// Inverse of [`Self::translate_and_scale_x`]. `scale` must be positive.
    pub fn untranslate_and_scale_x(&self, pixel_x: f64, scale: f64) -> f64 {
        let factor = pixel_x / (self.content_size.width * scale);
        self.bounds.left + factor * self.bounds.width()
    }

    /// Inverse of [`Self::translate_and_scale_y`]. `scale` must be positive.
    pub fn untranslate_and_scale_y(&self, pixel_y: f64, scale: f64) -> f64 {
        let factor = pixel_y / (self.content_size.height * scale);
        self.bounds.top + factor * self.bounds.height()
    }

    /// Relative point to content pixels at the given scale
    pub fn translate(&self, relative: &Point, scale: f64) -> Point {
        Point::new(
            self.translate_and_scale_x(relative.x, scale),
            self.translate_and_scale_y(relative.y, scale),
        )
    }

    /// Content pixels at the given scale back to a relative point
    pub fn untranslate(&self, pixel: &Point, scale: f64) -> Point {
        Point::new(
            self.untranslate_and_scale_x(pixel.x, scale),
            self.untranslate_and_scale_y(pixel.y, scale),
        )
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn validate_content_size(size: Size) -> Result<()> {
    if size.is_positive() {
        Ok(())
    } else {
        Err(MapError::InvalidSize(format!(
            "content size must be positive and finite, got {}x{}",
            size.width, size.height
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_unit_square_translation() {
        let translater = CoordinateTranslater::new(Size::new(1000.0, 500.0)).unwrap();
        assert_eq!(translater.translate_x(0.5), 500.0);
        assert_eq!(translater.translate_y(0.5), 250.0);
        assert_eq!(translater.translate_and_scale_x(0.5, 2.0), 1000.0);
        assert_eq!(translater.translate_and_scale_y(1.0, 0.5), 250.0);
    }

    #[test]
    fn test_custom_bounds_with_inverted_axis() {
        let mut translater = CoordinateTranslater::new(Size::new(1000.0, 1000.0)).unwrap();
        // north is up: top latitude is larger than bottom latitude
        translater.define_bounds(-10.0, 50.0, 10.0, 40.0).unwrap();

        assert_eq!(translater.translate_x(-10.0), 0.0);
        assert_eq!(translater.translate_x(0.0), 500.0);
        assert_eq!(translater.translate_y(50.0), 0.0);
        assert_eq!(translater.translate_y(40.0), 1000.0);
        assert!(translater.contains(&Point::new(5.0, 45.0)));
        assert!(!translater.contains(&Point::new(5.0, 55.0)));
    }

    #[test]
    fn test_out_of_bounds_extrapolates() {
        let translater = CoordinateTranslater::new(Size::new(100.0, 100.0)).unwrap();
        assert_eq!(translater.translate_x(-0.5), -50.0);
        assert_eq!(translater.translate_y(2.0), 200.0);
        assert!(!translater.contains(&Point::new(2.0, 0.5)));
    }

    #[test]
    fn test_round_trip_across_scales() {
        let mut translater = CoordinateTranslater::new(Size::new(4096.0, 2048.0)).unwrap();
        translater.define_bounds(-180.0, 85.0, 180.0, -85.0).unwrap();

        for &scale in &[0.0625, 0.3, 1.0, 1.7, 4.0] {
            for &(x, y) in &[(-180.0, 85.0), (12.5, -33.3), (179.9, 0.0), (0.0, -85.0)] {
                let px = translater.translate_and_scale_x(x, scale);
                let py = translater.translate_and_scale_y(y, scale);
                assert_close(translater.untranslate_and_scale_x(px, scale), x);
                assert_close(translater.untranslate_and_scale_y(py, scale), y);
            }
        }
    }

    #[test]
    fn test_degenerate_bounds_rejected() {
        let mut translater = CoordinateTranslater::new(Size::new(100.0, 100.0)).unwrap();
        assert!(matches!(
            translater.define_bounds(1.0, 0.0, 1.0, 1.0),
            Err(MapError::InvalidBounds(_))
        ));
        assert!(matches!(
            translater.define_bounds(0.0, f64::NAN, 1.0, 1.0),
            Err(MapError::InvalidBounds(_))
        ));
        // the previous bounds stay in effect
        assert_eq!(translater.bounds(), RelativeBounds::default());
    }

    #[test]
    fn test_invalid_content_size_rejected() {
        assert!(matches!(
            CoordinateTranslater::new(Size::new(0.0, 100.0)),
            Err(MapError::InvalidSize(_))
        ));
    }
}
