//! Shared trait abstractions for common patterns
//!
//! This module provides the seams between the overlay core and its hosting
//! environment, plus the small math traits reused across the crate.

use crate::core::{
    bounds::Bounds,
    geo::{Point, Size},
    viewport::ViewportState,
};

/// Capability interface implemented by whatever hosts overlay elements.
///
/// The core never looks inside an element. It only asks the host for a
/// natural ("wrap") size and tells it where the element's box lands in
/// viewport pixels. `attach` is called on every frame of an animation for
/// every overlay, so it must be cheap and idempotent: attaching an element
/// that is already attached simply moves it.
pub trait OverlayHost {
    /// Opaque element type hosted by the container
    type Element;

    /// Measure the element at its natural size
    fn measure(&mut self, element: &Self::Element) -> Size;

    /// Place (or re-place) the element at the given box in viewport pixels
    fn attach(&mut self, element: &Self::Element, frame: Bounds);

    /// Remove the element from the container
    fn detach(&mut self, element: &Self::Element);
}

/// Trait for viewport-aware components
pub trait ViewportAware {
    /// Handle viewport changes
    fn on_viewport_changed(&mut self, viewport: &ViewportState);
}

/// Point math operations trait to consolidate point calculations
pub trait PointMath {
    /// Add two points
    fn add(&self, other: &Self) -> Self;

    /// Subtract two points
    fn subtract(&self, other: &Self) -> Self;

    /// Multiply by scalar
    fn multiply(&self, scalar: f64) -> Self;
}

impl PointMath for Point {
    fn add(&self, other: &Self) -> Self {
        Point::new(self.x + other.x, self.y + other.y)
    }

    fn subtract(&self, other: &Self) -> Self {
        Point::new(self.x - other.x, self.y - other.y)
    }

    fn multiply(&self, scalar: f64) -> Self {
        Point::new(self.x * scalar, self.y * scalar)
    }
}

/// Unified interpolation trait that consolidates all Lerp implementations
pub trait Lerp {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Point {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Point::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }
}
