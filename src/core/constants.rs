//! Core constants shared by the viewport, the layout and the animator.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Smallest scale a viewport accepts unless configured otherwise.
pub const DEFAULT_MIN_SCALE: f64 = 0.0625;

/// Largest scale a viewport accepts unless configured otherwise.
pub const DEFAULT_MAX_SCALE: f64 = 4.0;

/// Duration of a slide (pan/zoom) animation in milliseconds.
pub const DEFAULT_SLIDE_DURATION_MS: u64 = 400;

/// Default relative anchor: horizontally centred on the coordinate.
pub const DEFAULT_RELATIVE_ANCHOR_LEFT: f64 = -0.5;

/// Default relative anchor: bottom edge sits on the coordinate.
pub const DEFAULT_RELATIVE_ANCHOR_TOP: f64 = -1.0;

/// Tolerance used when comparing scales and positions.
pub const EPSILON: f64 = 1e-9;
