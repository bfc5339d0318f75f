use crate::{
    core::geo::{Point, Size},
    layers::marker::{OverlayHandle, OverlayKind},
};
use serde::{Deserialize, Serialize};

/// Input forwarded by the host's gesture layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Single tap, in viewport pixels
    Tap { position: Point },
    /// Drag by a pixel delta (positive moves the content with the finger)
    Pan { delta: Point },
    /// Pinch/wheel zoom to an absolute scale around a viewport pixel
    Scale { scale: f64, focus: Point },
    /// Viewport/window resize
    Resize { size: Size },
}

/// Whether an event was consumed. Tap observation never consumes, so
/// gesture recognition on the same touch stream keeps working.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

/// Map event types emitted by the map view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    /// Scroll or scale changed
    ViewChanged { scroll: Point, scale: f64 },
    /// Scale changed (also accompanied by `ViewChanged`)
    ScaleChanged { scale: f64 },
    /// A slide started towards the given state
    SlideStart { scroll: Point, scale: f64 },
    /// A slide ended; `completed` is false when it was cancelled or superseded
    SlideEnd { completed: bool },
    OverlayAdded { handle: OverlayHandle, kind: OverlayKind },
    OverlayRemoved { handle: OverlayHandle, kind: OverlayKind },
}

impl MapEvent {
    pub fn name(&self) -> &'static str {
        match self {
            MapEvent::ViewChanged { .. } => "viewchanged",
            MapEvent::ScaleChanged { .. } => "scalechanged",
            MapEvent::SlideStart { .. } => "slidestart",
            MapEvent::SlideEnd { .. } => "slideend",
            MapEvent::OverlayAdded { .. } => "overlayadd",
            MapEvent::OverlayRemoved { .. } => "overlayremove",
        }
    }
}
