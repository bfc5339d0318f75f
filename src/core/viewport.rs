use crate::core::{
    constants::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE},
    geo::{Point, Size},
};
use crate::traits::PointMath;
use serde::{Deserialize, Serialize};

/// Manages the current view of the map: scroll offset, scale and dimensions
///
/// `scroll` is the top-left corner of the visible window, in content pixels
/// at the current scale. `content_size` is measured at scale 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Top-left of the visible window in scaled content pixels
    pub scroll: Point,
    /// The current scale factor (1.0 = native resolution)
    pub scale: f64,
    /// Full content size at scale 1.0
    pub content_size: Size,
    /// Size of the visible window in pixels
    pub visible_size: Size,
    /// The minimum allowed scale
    pub min_scale: f64,
    /// The maximum allowed scale
    pub max_scale: f64,
}

impl ViewportState {
    /// Creates a new viewport at scale 1.0 scrolled to the origin
    pub fn new(content_size: Size, visible_size: Size) -> Self {
        Self {
            scroll: Point::default(),
            scale: 1.0,
            content_size,
            visible_size,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
        }
    }

    /// Sets the scale, clamping to the configured range
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = self.clamp_scale(scale);
    }

    /// Sets the scale limits and re-clamps the current scale
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.scale = self.clamp_scale(self.scale);
    }

    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// Content size at the current scale
    pub fn scaled_content_size(&self) -> Size {
        self.content_size.scaled(self.scale)
    }

    /// Scroll offset that puts the given scaled content pixel in the middle
    pub fn scroll_for_center(&self, center: &Point) -> Point {
        center.subtract(&self.visible_size.half())
    }

    /// Scaled content pixel currently in the middle of the viewport
    pub fn center(&self) -> Point {
        self.scroll.add(&self.visible_size.half())
    }

    /// Clamps a scroll offset so the visible window stays on the content.
    /// When the content is smaller than the window on an axis, that axis
    /// is pinned to zero.
    pub fn constrain_scroll(&self, scroll: Point) -> Point {
        let content = self.scaled_content_size();
        let max_x = (content.width - self.visible_size.width).max(0.0);
        let max_y = (content.height - self.visible_size.height).max(0.0);
        Point::new(scroll.x.clamp(0.0, max_x), scroll.y.clamp(0.0, max_y))
    }

    /// Converts a viewport pixel to a scaled content pixel
    pub fn viewport_to_content(&self, pixel: &Point) -> Point {
        pixel.add(&self.scroll)
    }

    /// Scroll offset that keeps `focus` (a viewport pixel) over the same
    /// content while the scale changes to `new_scale`
    pub fn scroll_for_focus(&self, focus: &Point, new_scale: f64) -> Point {
        let content_focus = self.viewport_to_content(focus);
        let ratio = new_scale / self.scale;
        content_focus.multiply(ratio).subtract(focus)
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(Size::new(1.0, 1.0), Size::new(800.0, 600.0))
    }
}
