//! Map view builder for fluent configuration
//!
//! The builder collects content geometry, the relative coordinate bounds,
//! the configuration profile and the overlay host, and validates all of them
//! together in `build()`.

use crate::{
    core::{
        config::{MapViewConfig, MapViewProfile, SlideConfig},
        geo::{Point, Size},
        map::MapView,
        translater::{CoordinateTranslater, RelativeBounds},
        viewport::ViewportState,
    },
    traits::OverlayHost,
    MapError, Result,
};

/// Builder for creating and configuring `MapView` instances
pub struct MapViewBuilder<H: OverlayHost> {
    content_size: Size,
    visible_size: Size,
    bounds: Option<RelativeBounds>,
    profile: MapViewProfile,
    host: Option<H>,
    scale: Option<f64>,
    scroll: Option<Point>,
}

impl<H: OverlayHost> MapViewBuilder<H> {
    /// Content size is the full-resolution size at scale 1.0
    pub fn new(content_size: Size, visible_size: Size) -> Self {
        Self {
            content_size,
            visible_size,
            bounds: None,
            profile: MapViewProfile::default(),
            host: None,
            scale: None,
            scroll: None,
        }
    }

    /// Set the container that displays overlays (required)
    pub fn with_host(mut self, host: H) -> Self {
        self.host = Some(host);
        self
    }

    pub fn with_visible_size(mut self, size: Size) -> Self {
        self.visible_size = size;
        self
    }

    /// Define the relative coordinate space by its edge values
    pub fn with_bounds(mut self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        self.bounds = Some(RelativeBounds {
            left,
            top,
            right,
            bottom,
        });
        self
    }

    pub fn with_profile(mut self, profile: MapViewProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_config(mut self, config: MapViewConfig) -> Self {
        self.profile = MapViewProfile::Custom(config);
        self
    }

    pub fn with_slide_config(mut self, slide: SlideConfig) -> Self {
        let config = MapViewConfig {
            slide,
            ..self.profile.resolve()
        };
        self.profile = MapViewProfile::Custom(config);
        self
    }

    pub fn with_scale_limits(mut self, min_scale: f64, max_scale: f64) -> Self {
        let config = MapViewConfig {
            min_scale,
            max_scale,
            ..self.profile.resolve()
        };
        self.profile = MapViewProfile::Custom(config);
        self
    }

    pub fn with_constrained_scroll(mut self, enabled: bool) -> Self {
        let mut config = self.profile.resolve();
        config.constrain_scroll = enabled;
        self.profile = MapViewProfile::Custom(config);
        self
    }

    /// Initial scale, clamped to the configured limits
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Initial scroll offset in content pixels at the initial scale
    pub fn with_scroll(mut self, scroll: Point) -> Self {
        self.scroll = Some(scroll);
        self
    }

    /// Build the map view with the configured options
    pub fn build(self) -> Result<MapView<H>> {
        let host = self
            .host
            .ok_or_else(|| MapError::NotInitialized("no overlay host specified".to_string()))?;

        let config = self.profile.resolve();
        config.validate()?;

        if !self.visible_size.is_positive() {
            return Err(MapError::InvalidSize(format!(
                "visible size must be positive and finite, got {}x{}",
                self.visible_size.width, self.visible_size.height
            )));
        }

        let mut translater = CoordinateTranslater::new(self.content_size)?;
        if let Some(bounds) = self.bounds {
            translater.define_bounds(bounds.left, bounds.top, bounds.right, bounds.bottom)?;
        }

        let mut viewport = ViewportState::new(self.content_size, self.visible_size);
        viewport.set_scale_limits(config.min_scale, config.max_scale);
        if let Some(scale) = self.scale {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(MapError::InvalidScale(scale));
            }
            viewport.set_scale(scale);
        }
        if let Some(scroll) = self.scroll {
            viewport.scroll = scroll;
        }

        log::debug!(
            "building map view: content {}x{}, visible {}x{}, scale {:.4}",
            self.content_size.width,
            self.content_size.height,
            self.visible_size.width,
            self.visible_size.height,
            viewport.scale
        );

        Ok(MapView::from_parts(host, translater, viewport, config))
    }
}
