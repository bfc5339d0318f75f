//! The map view facade: single owner of scroll and scale.
//!
//! Every mutation of the viewport goes through here and ends with one
//! repositioning pass over the marker layout, so overlays never show a stale
//! position. Slides are advanced by the caller's frame clock; each frame is
//! applied atomically. Starting a new slide, or scrolling/scaling directly,
//! drops the previous slide before anything else happens.

use crate::{
    animation::slide::{SlideAnimation, SlideTarget},
    core::{
        config::MapViewConfig,
        constants::EPSILON,
        geo::{Point, Size},
        translater::CoordinateTranslater,
        viewport::ViewportState,
    },
    input::{
        events::{EventHandled, InputEvent, MapEvent},
        tap::{ListenerId, OverlayTap, TapDispatcher},
    },
    layers::{
        marker::{AnchorSpec, OverlayHandle, OverlayKind},
        marker_layout::MarkerLayout,
    },
    prelude::VecDeque,
    traits::{OverlayHost, PointMath, ViewportAware},
    MapError, Result,
};
use instant::Instant;
use std::time::Duration;

pub struct MapView<H: OverlayHost> {
    viewport: ViewportState,
    translater: CoordinateTranslater,
    config: MapViewConfig,
    layout: MarkerLayout<H>,
    taps: TapDispatcher,
    slide: Option<SlideAnimation>,
    last_frame: Option<Instant>,
    events: VecDeque<MapEvent>,
}

impl<H: OverlayHost> MapView<H> {
    /// Use [`crate::core::builder::MapViewBuilder`] to construct a view
    pub(crate) fn from_parts(
        host: H,
        translater: CoordinateTranslater,
        mut viewport: ViewportState,
        config: MapViewConfig,
    ) -> Self {
        viewport.set_scale_limits(config.min_scale, config.max_scale);
        if config.constrain_scroll {
            viewport.scroll = viewport.constrain_scroll(viewport.scroll);
        }
        Self {
            layout: MarkerLayout::new(host, translater, viewport),
            viewport,
            translater,
            config,
            taps: TapDispatcher::new(),
            slide: None,
            last_frame: None,
            events: VecDeque::new(),
        }
    }

    // --- overlays -------------------------------------------------------------------------------

    pub fn add_marker(
        &mut self,
        element: H::Element,
        relative_x: f64,
        relative_y: f64,
        anchor: AnchorSpec,
    ) -> OverlayHandle {
        let handle = self.layout.add_marker(element, relative_x, relative_y, anchor);
        self.emit(MapEvent::OverlayAdded {
            handle,
            kind: OverlayKind::Marker,
        });
        handle
    }

    pub fn add_callout(
        &mut self,
        element: H::Element,
        relative_x: f64,
        relative_y: f64,
        anchor: AnchorSpec,
    ) -> OverlayHandle {
        let handle = self.layout.add_callout(element, relative_x, relative_y, anchor);
        self.emit(MapEvent::OverlayAdded {
            handle,
            kind: OverlayKind::Callout,
        });
        handle
    }

    /// Returns false when `handle` is not a live marker
    pub fn move_marker(&mut self, handle: OverlayHandle, relative_x: f64, relative_y: f64) -> bool {
        self.layout.move_marker(handle, relative_x, relative_y)
    }

    /// Returns false when `handle` is not a live callout
    pub fn move_callout(&mut self, handle: OverlayHandle, relative_x: f64, relative_y: f64) -> bool {
        self.layout.move_callout(handle, relative_x, relative_y)
    }

    /// Idempotent: unknown or already removed handles are ignored
    pub fn remove_marker(&mut self, handle: OverlayHandle) -> Option<H::Element> {
        let element = self.layout.remove_marker(handle)?;
        self.emit(MapEvent::OverlayRemoved {
            handle,
            kind: OverlayKind::Marker,
        });
        Some(element)
    }

    /// Idempotent: unknown or already removed handles are ignored
    pub fn remove_callout(&mut self, handle: OverlayHandle) -> Option<H::Element> {
        let element = self.layout.remove_callout(handle)?;
        self.emit(MapEvent::OverlayRemoved {
            handle,
            kind: OverlayKind::Callout,
        });
        Some(element)
    }

    /// Topmost overlay under a viewport pixel
    pub fn get_marker_from_position(&mut self, pixel_x: f64, pixel_y: f64) -> Option<OverlayHandle> {
        self.layout.get_view_from_tap(pixel_x, pixel_y)
    }

    /// Replaces all tap listeners with `listener`
    pub fn set_marker_tap_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&OverlayTap) -> Result<()> + 'static,
    {
        self.taps.set_listener(listener)
    }

    pub fn add_marker_tap_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&OverlayTap) -> Result<()> + 'static,
    {
        self.taps.add_listener(listener)
    }

    pub fn remove_marker_tap_listener(&mut self, id: ListenerId) -> bool {
        self.taps.remove_listener(id)
    }

    // --- input ----------------------------------------------------------------------------------

    /// Feeds a gesture-layer event. Taps are observed, never consumed; pans
    /// and scale gestures drive the viewport and are reported as handled.
    pub fn handle_input(&mut self, event: &InputEvent) -> Result<EventHandled> {
        match event {
            InputEvent::Tap { .. } => Ok(self.taps.dispatch(&mut self.layout, event)),
            InputEvent::Pan { delta } => {
                let scroll = self.viewport.scroll.subtract(delta);
                self.scroll_to(scroll.x, scroll.y);
                Ok(EventHandled::Handled)
            }
            InputEvent::Scale { scale, focus } => {
                self.zoom_to(*scale, Some(*focus))?;
                Ok(EventHandled::Handled)
            }
            InputEvent::Resize { size } => {
                self.set_visible_size(*size)?;
                Ok(EventHandled::Handled)
            }
        }
    }

    // --- scroll & scale -------------------------------------------------------------------------

    /// Scrolls so that the given scaled content pixel is the top-left corner
    pub fn scroll_to(&mut self, x: f64, y: f64) {
        self.cancel_slide();
        self.apply_view(Point::new(x, y), self.viewport.scale);
    }

    /// Scrolls so that the given scaled content pixel is in the middle
    pub fn scroll_to_and_center(&mut self, x: f64, y: f64) {
        let scroll = self.viewport.scroll_for_center(&Point::new(x, y));
        self.scroll_to(scroll.x, scroll.y);
    }

    /// Sets the scale, clamped to the configured limits. The scroll offset
    /// is left as is.
    pub fn set_scale(&mut self, scale: f64) -> Result<()> {
        validate_scale(scale)?;
        self.cancel_slide();
        self.apply_view(self.viewport.scroll, scale);
        Ok(())
    }

    /// Sets the scale while keeping the middle of the viewport fixed
    pub fn set_scale_from_center(&mut self, scale: f64) -> Result<()> {
        let center = self.viewport.visible_size.half();
        self.zoom_to(scale, Some(center))
    }

    /// Sets the scale while keeping `focus` (a viewport pixel) over the
    /// same content. Without a focus this is [`Self::set_scale`].
    pub fn zoom_to(&mut self, scale: f64, focus: Option<Point>) -> Result<()> {
        validate_scale(scale)?;
        let Some(focus) = focus else {
            return self.set_scale(scale);
        };
        self.cancel_slide();
        let scale = self.viewport.clamp_scale(scale);
        let scroll = self.viewport.scroll_for_focus(&focus, scale);
        self.apply_view(scroll, scale);
        Ok(())
    }

    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) -> Result<()> {
        let config = MapViewConfig {
            min_scale,
            max_scale,
            ..self.config.clone()
        };
        config.validate()?;
        self.config = config;
        self.viewport.set_scale_limits(min_scale, max_scale);
        if let Some(slide) = self.slide.as_mut() {
            slide.clamp_scales(min_scale, max_scale);
        }
        self.apply_view(self.viewport.scroll, self.viewport.scale);
        Ok(())
    }

    // --- slides ---------------------------------------------------------------------------------

    /// Animates the scroll offset to (x, y) at the current scale
    pub fn slide_to(&mut self, x: f64, y: f64) {
        self.start_slide(Point::new(x, y), self.viewport.scale);
    }

    /// Animates so that the given scaled content pixel ends up centred
    pub fn slide_to_and_center(&mut self, x: f64, y: f64) {
        let scroll = self.viewport.scroll_for_center(&Point::new(x, y));
        self.start_slide(scroll, self.viewport.scale);
    }

    /// Animates to `dest_scale` with the given pixel (in content pixels at
    /// `dest_scale`) centred
    pub fn slide_to_and_center_with_scale(&mut self, x: f64, y: f64, dest_scale: f64) -> Result<()> {
        validate_scale(dest_scale)?;
        let scale = self.viewport.clamp_scale(dest_scale);
        // re-express the target if the requested scale was clamped
        let center = Point::new(x, y).multiply(scale / dest_scale);
        let scroll = self.viewport.scroll_for_center(&center);
        self.start_slide(scroll, scale);
        Ok(())
    }

    /// Stops the running slide where it is. No further frames from it will
    /// be applied.
    pub fn cancel_slide(&mut self) -> bool {
        match self.slide.take() {
            Some(_) => {
                self.last_frame = None;
                log::debug!("slide cancelled");
                self.emit(MapEvent::SlideEnd { completed: false });
                true
            }
            None => false,
        }
    }

    pub fn is_sliding(&self) -> bool {
        self.slide.is_some()
    }

    /// Target of the running slide, if any
    pub fn slide_target(&self) -> Option<SlideTarget> {
        self.slide.as_ref().map(|slide| slide.target())
    }

    /// Advances the running slide by `delta` and applies the resulting
    /// frame. Returns true while the slide is still in flight.
    pub fn advance(&mut self, delta: Duration) -> bool {
        let Some(slide) = self.slide.as_mut() else {
            return false;
        };
        let frame = slide.advance(delta);
        log::trace!(
            "slide frame {:.3}: scroll ({:.1}, {:.1}) scale {:.4}",
            frame.progress,
            frame.scroll.x,
            frame.scroll.y,
            frame.scale
        );
        self.apply_view(frame.scroll, frame.scale);

        if frame.finished {
            self.slide = None;
            self.last_frame = None;
            log::debug!("slide finished");
            self.emit(MapEvent::SlideEnd { completed: true });
            return false;
        }
        true
    }

    /// Frame-clock driven variant of [`Self::advance`]: measures the time
    /// since the previous tick. The first tick of a slide only starts its
    /// clock.
    pub fn tick(&mut self) -> bool {
        if self.slide.is_none() {
            self.last_frame = None;
            return false;
        }
        let now = Instant::now();
        let delta = self
            .last_frame
            .map(|last| now.duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last_frame = Some(now);
        self.advance(delta)
    }

    // --- markers as navigation targets ----------------------------------------------------------

    /// Centres the view on a marker at the current scale
    pub fn move_to_marker(&mut self, handle: OverlayHandle, should_animate: bool) -> Result<()> {
        self.move_to_marker_with_scale(handle, self.viewport.scale, should_animate)
    }

    /// Centres the view on a marker while moving to `destination_scale`.
    /// Fails with `MarkerNotFound` when `handle` is not a registered marker.
    pub fn move_to_marker_with_scale(
        &mut self,
        handle: OverlayHandle,
        destination_scale: f64,
        should_animate: bool,
    ) -> Result<()> {
        if !self.layout.is_marker(handle) {
            return Err(MapError::MarkerNotFound(handle));
        }
        validate_scale(destination_scale)?;
        let scale = self.viewport.clamp_scale(destination_scale);
        let target = self
            .layout
            .anchor_point_of(handle, scale)
            .ok_or(MapError::MarkerNotFound(handle))?;

        if should_animate {
            self.slide_to_and_center_with_scale(target.x, target.y, scale)
        } else {
            self.cancel_slide();
            let scroll = self.viewport.scroll_for_center(&target);
            self.apply_view(scroll, scale);
            Ok(())
        }
    }

    // --- geometry -------------------------------------------------------------------------------

    /// Redefines the relative coordinate space and re-places every overlay
    pub fn define_bounds(&mut self, left: f64, top: f64, right: f64, bottom: f64) -> Result<()> {
        self.translater.define_bounds(left, top, right, bottom)?;
        self.layout.set_translater(self.translater);
        Ok(())
    }

    pub fn undefine_bounds(&mut self) {
        self.translater.undefine_bounds();
        self.layout.set_translater(self.translater);
    }

    /// Changes the full-resolution content size and re-places every overlay
    pub fn set_content_size(&mut self, size: Size) -> Result<()> {
        self.translater.set_content_size(size)?;
        self.viewport.content_size = size;
        self.layout.replace_translater(self.translater);
        self.apply_view(self.viewport.scroll, self.viewport.scale);
        Ok(())
    }

    /// The host resized the visible window
    pub fn set_visible_size(&mut self, size: Size) -> Result<()> {
        if !size.is_positive() {
            return Err(MapError::InvalidSize(format!(
                "visible size must be positive and finite, got {}x{}",
                size.width, size.height
            )));
        }
        self.viewport.visible_size = size;
        if let Some(slide) = self.slide.as_mut() {
            slide.set_visible_size(size);
        }
        self.apply_view(self.viewport.scroll, self.viewport.scale);
        Ok(())
    }

    // --- accessors ------------------------------------------------------------------------------

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn scroll(&self) -> Point {
        self.viewport.scroll
    }

    pub fn scale(&self) -> f64 {
        self.viewport.scale
    }

    pub fn translater(&self) -> &CoordinateTranslater {
        &self.translater
    }

    pub fn config(&self) -> &MapViewConfig {
        &self.config
    }

    pub fn layout(&self) -> &MarkerLayout<H> {
        &self.layout
    }

    /// Mutable layout access for overlay-level operations (anchors,
    /// remeasuring). Viewport state stays owned by the view.
    pub fn layout_mut(&mut self) -> &mut MarkerLayout<H> {
        &mut self.layout
    }

    pub fn host(&self) -> &H {
        self.layout.host()
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.layout.host_mut()
    }

    /// Takes every queued map event
    pub fn drain_events(&mut self) -> Vec<MapEvent> {
        self.events.drain(..).collect()
    }

    // --- internals ------------------------------------------------------------------------------

    fn start_slide(&mut self, scroll: Point, scale: f64) {
        self.cancel_slide();
        let scroll = self.constrain(scroll, scale);
        let from = SlideTarget::new(self.viewport.scroll, self.viewport.scale);
        let to = SlideTarget::new(scroll, scale);
        let slide = SlideAnimation::new(
            from,
            to,
            self.viewport.visible_size,
            self.config.slide.duration(),
            self.config.slide.easing,
        );

        log::debug!(
            "slide from ({:.1}, {:.1}) @ {:.4} to ({:.1}, {:.1}) @ {:.4} over {:?}",
            from.scroll.x,
            from.scroll.y,
            from.scale,
            to.scroll.x,
            to.scroll.y,
            to.scale,
            slide.duration()
        );
        self.emit(MapEvent::SlideStart { scroll, scale });
        self.slide = Some(slide);

        // transitions disabled: land on the target right away
        if self.config.slide.duration().is_zero() {
            self.advance(Duration::ZERO);
        }
    }

    /// Writes the viewport and runs one repositioning pass
    fn apply_view(&mut self, scroll: Point, scale: f64) {
        let previous_scale = self.viewport.scale;
        self.viewport.set_scale(scale);
        self.viewport.scroll = self.constrain(scroll, self.viewport.scale);

        self.layout.on_viewport_changed(&self.viewport);

        if (self.viewport.scale - previous_scale).abs() > EPSILON {
            self.emit(MapEvent::ScaleChanged {
                scale: self.viewport.scale,
            });
        }
        self.emit(MapEvent::ViewChanged {
            scroll: self.viewport.scroll,
            scale: self.viewport.scale,
        });
    }

    fn constrain(&self, scroll: Point, scale: f64) -> Point {
        if !self.config.constrain_scroll {
            return scroll;
        }
        let mut viewport = self.viewport;
        viewport.set_scale(scale);
        viewport.constrain_scroll(scroll)
    }

    fn emit(&mut self, event: MapEvent) {
        self.events.push_back(event);
    }
}

fn validate_scale(scale: f64) -> Result<()> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(MapError::InvalidScale(scale))
    }
}
