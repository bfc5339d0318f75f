//! Prelude module for common tileview types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use tileview::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    builder::MapViewBuilder,
    config::{MapViewConfig, MapViewProfile, SlideConfig},
    geo::{Point, Size},
    map::MapView,
    translater::{CoordinateTranslater, RelativeBounds},
    viewport::ViewportState,
};

pub use crate::layers::{
    marker::{AnchorSpec, Overlay, OverlayHandle, OverlayKind, OverlayState},
    marker_layout::MarkerLayout,
};

pub use crate::input::{
    events::{EventHandled, InputEvent, MapEvent},
    tap::{ListenerId, OverlayTap, TapDispatcher},
};

pub use crate::animation::{easing::EasingType, slide::SlideAnimation};

pub use crate::spatial::index::{SpatialIndex, SpatialItem};

pub use crate::traits::{Lerp, OverlayHost, PointMath, ViewportAware};

pub use crate::{Error as MapError, Result};

pub use std::{collections::VecDeque, time::Duration};

pub use fxhash::FxHashMap as HashMap;
