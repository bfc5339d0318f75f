//! # TileView
//!
//! Overlay placement for pannable, zoomable tile maps.
//!
//! Markers and callouts are registered at resolution-independent relative
//! coordinates. As the viewport scrolls and scales, every overlay is
//! re-derived into pixel space and handed back to the hosting container, so
//! overlays track the map without drift and stay hit-testable at any scale.

pub mod animation;
pub mod core;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod spatial;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    bounds::Bounds,
    builder::MapViewBuilder,
    config::{MapViewConfig, MapViewProfile, SlideConfig},
    geo::{Point, Size},
    map::MapView,
    translater::{CoordinateTranslater, RelativeBounds},
    viewport::ViewportState,
};

pub use layers::{
    marker::{AnchorSpec, OverlayHandle, OverlayKind, OverlayState},
    marker_layout::MarkerLayout,
};

pub use input::{
    events::{EventHandled, InputEvent, MapEvent},
    tap::{ListenerId, OverlayTap, TapDispatcher},
};

pub use animation::{easing::EasingType, slide::SlideAnimation};

pub use spatial::index::SpatialIndex;

pub use traits::OverlayHost;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Marker not found: {0}")]
    MarkerNotFound(OverlayHandle),

    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("Invalid scale: {0}")]
    InvalidScale(f64),

    #[error("Invalid size: {0}")]
    InvalidSize(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not initialized: {0}")]
    NotInitialized(String),

    #[error("Listener error: {0}")]
    Listener(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs an `env_logger` backend for the `log` facade.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
