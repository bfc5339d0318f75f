use crate::{
    core::{
        bounds::Bounds,
        constants::{DEFAULT_RELATIVE_ANCHOR_LEFT, DEFAULT_RELATIVE_ANCHOR_TOP},
        geo::{Point, Size},
        translater::CoordinateTranslater,
    },
    traits::PointMath,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a registered overlay. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverlayHandle(pub(crate) u64);

impl OverlayHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OverlayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverlayKind {
    Marker,
    Callout,
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayKind::Marker => write!(f, "marker"),
            OverlayKind::Callout => write!(f, "callout"),
        }
    }
}

/// Lifecycle of an overlay. `Removed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayState {
    Registered,
    Positioned,
    Removed,
}

/// Where an overlay's top-left corner lands relative to its coordinate.
///
/// The offset is `relative * measured size + absolute`. The default places
/// the bottom-centre of the element on the coordinate, the usual pin shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorSpec {
    pub relative_anchor_left: f64,
    pub relative_anchor_top: f64,
    pub absolute_anchor_left: f64,
    pub absolute_anchor_top: f64,
}

impl AnchorSpec {
    pub fn new(
        relative_anchor_left: f64,
        relative_anchor_top: f64,
        absolute_anchor_left: f64,
        absolute_anchor_top: f64,
    ) -> Self {
        Self {
            relative_anchor_left,
            relative_anchor_top,
            absolute_anchor_left,
            absolute_anchor_top,
        }
    }

    /// Top-left corner on the coordinate, no offset
    pub fn top_left() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Element centred on the coordinate
    pub fn centered() -> Self {
        Self::new(-0.5, -0.5, 0.0, 0.0)
    }

    pub fn with_relative(mut self, left: f64, top: f64) -> Self {
        self.relative_anchor_left = left;
        self.relative_anchor_top = top;
        self
    }

    pub fn with_absolute(mut self, left: f64, top: f64) -> Self {
        self.absolute_anchor_left = left;
        self.absolute_anchor_top = top;
        self
    }

    /// Offset from the coordinate to the element's top-left corner
    pub fn offset(&self, measured: Size) -> Point {
        Point::new(
            self.relative_anchor_left * measured.width + self.absolute_anchor_left,
            self.relative_anchor_top * measured.height + self.absolute_anchor_top,
        )
    }
}

impl Default for AnchorSpec {
    fn default() -> Self {
        Self::new(
            DEFAULT_RELATIVE_ANCHOR_LEFT,
            DEFAULT_RELATIVE_ANCHOR_TOP,
            0.0,
            0.0,
        )
    }
}

/// A marker or callout owned by the layout
#[derive(Debug, Clone)]
pub struct Overlay<E> {
    pub(crate) handle: OverlayHandle,
    pub(crate) element: E,
    pub(crate) relative: Point,
    pub(crate) anchor: AnchorSpec,
    pub(crate) kind: OverlayKind,
    pub(crate) measured: Size,
    pub(crate) state: OverlayState,
    /// Box in scaled content pixels, as of the last layout pass
    pub(crate) content_bounds: Bounds,
}

impl<E> Overlay<E> {
    pub(crate) fn new(
        handle: OverlayHandle,
        element: E,
        relative: Point,
        anchor: AnchorSpec,
        kind: OverlayKind,
        measured: Size,
    ) -> Self {
        Self {
            handle,
            element,
            relative,
            anchor,
            kind,
            measured,
            state: OverlayState::Registered,
            content_bounds: Bounds::default(),
        }
    }

    pub fn handle(&self) -> OverlayHandle {
        self.handle
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn relative_position(&self) -> Point {
        self.relative
    }

    pub fn anchor(&self) -> AnchorSpec {
        self.anchor
    }

    pub fn kind(&self) -> OverlayKind {
        self.kind
    }

    pub fn measured_size(&self) -> Size {
        self.measured
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// The coordinate itself in content pixels at `scale`, before anchoring
    pub fn anchor_point(&self, translater: &CoordinateTranslater, scale: f64) -> Point {
        translater.translate(&self.relative, scale)
    }

    /// The element's box in content pixels at `scale`
    pub fn layout_bounds(&self, translater: &CoordinateTranslater, scale: f64) -> Bounds {
        let origin = self
            .anchor_point(translater, scale)
            .add(&self.anchor.offset(self.measured));
        Bounds::from_origin_and_size(origin, self.measured)
    }
}
