//! Registry and placement of markers and callouts.
//!
//! Overlays are stored by relative coordinate. Their boxes are derived in
//! scaled content pixels (which only change with scale) and handed to the
//! host shifted by the scroll offset. Hit-testing runs against an R-tree of
//! the content-space boxes; the tree is rebuilt lazily the first time it is
//! queried after a scale change, and kept up to date incrementally while the
//! scale stays put. Scroll-only changes never touch it.

use crate::{
    core::{
        bounds::Bounds,
        geo::Point,
        translater::CoordinateTranslater,
        viewport::ViewportState,
    },
    layers::marker::{AnchorSpec, Overlay, OverlayHandle, OverlayKind, OverlayState},
    prelude::HashMap,
    spatial::index::{SpatialIndex, SpatialItem},
    traits::{OverlayHost, PointMath, ViewportAware},
};

/// Owns every overlay and keeps the host's placement in sync with the viewport
pub struct MarkerLayout<H: OverlayHost> {
    host: H,
    overlays: HashMap<OverlayHandle, Overlay<H::Element>>,
    translater: CoordinateTranslater,
    viewport: ViewportState,
    /// Hit-test index; payload is the overlay handle id (insertion order)
    index: SpatialIndex<u64>,
    /// Scale the index was built for, `None` when it must be rebuilt
    indexed_scale: Option<f64>,
    next_id: u64,
}

impl<H: OverlayHost> MarkerLayout<H> {
    pub fn new(host: H, translater: CoordinateTranslater, viewport: ViewportState) -> Self {
        Self {
            host,
            overlays: HashMap::default(),
            translater,
            viewport,
            index: SpatialIndex::new(),
            indexed_scale: None,
            next_id: 1,
        }
    }

    /// Registers a marker and places it immediately
    pub fn add_marker(
        &mut self,
        element: H::Element,
        relative_x: f64,
        relative_y: f64,
        anchor: AnchorSpec,
    ) -> OverlayHandle {
        self.add_overlay(element, Point::new(relative_x, relative_y), anchor, OverlayKind::Marker)
    }

    /// Registers a callout and places it immediately
    pub fn add_callout(
        &mut self,
        element: H::Element,
        relative_x: f64,
        relative_y: f64,
        anchor: AnchorSpec,
    ) -> OverlayHandle {
        self.add_overlay(element, Point::new(relative_x, relative_y), anchor, OverlayKind::Callout)
    }

    /// Moves a marker. Unknown, removed or callout handles are ignored.
    pub fn move_marker(&mut self, handle: OverlayHandle, relative_x: f64, relative_y: f64) -> bool {
        self.move_overlay(handle, OverlayKind::Marker, Point::new(relative_x, relative_y))
    }

    /// Moves a callout. Unknown, removed or marker handles are ignored.
    pub fn move_callout(&mut self, handle: OverlayHandle, relative_x: f64, relative_y: f64) -> bool {
        self.move_overlay(handle, OverlayKind::Callout, Point::new(relative_x, relative_y))
    }

    /// Detaches and forgets a marker, handing the element back.
    /// Removing an unknown or already removed handle is a no-op.
    pub fn remove_marker(&mut self, handle: OverlayHandle) -> Option<H::Element> {
        self.remove_overlay(handle, OverlayKind::Marker)
    }

    /// Detaches and forgets a callout, handing the element back.
    /// Removing an unknown or already removed handle is a no-op.
    pub fn remove_callout(&mut self, handle: OverlayHandle) -> Option<H::Element> {
        self.remove_overlay(handle, OverlayKind::Callout)
    }

    /// Removes every callout
    pub fn clear_callouts(&mut self) -> usize {
        let callouts = self.callouts();
        let count = callouts.len();
        for handle in callouts {
            self.remove_callout(handle);
        }
        count
    }

    /// Replaces the anchor of an overlay and re-places it
    pub fn set_anchor(&mut self, handle: OverlayHandle, anchor: AnchorSpec) -> bool {
        self.update_overlay(handle, |overlay, _| overlay.anchor = anchor)
    }

    /// Asks the host for a fresh natural size, e.g. after the element's
    /// content changed, and re-places the overlay
    pub fn remeasure(&mut self, handle: OverlayHandle) -> bool {
        self.update_overlay(handle, |overlay, host| {
            overlay.measured = host.measure(&overlay.element)
        })
    }

    /// Topmost overlay under a viewport pixel. Later additions sit on top.
    pub fn get_view_from_tap(&mut self, pixel_x: f64, pixel_y: f64) -> Option<OverlayHandle> {
        self.ensure_index();
        let content_point = self
            .viewport
            .viewport_to_content(&Point::new(pixel_x, pixel_y));

        self.index
            .query_point(&content_point)
            .into_iter()
            .max_by_key(|item| item.data)
            .map(|item| item.id)
    }

    /// Full repositioning pass. Idempotent; elements are only re-attached.
    pub fn reposition_all(&mut self) {
        let scale = self.viewport.scale;
        if self.indexed_scale != Some(scale) {
            self.indexed_scale = None;
        }

        let translater = self.translater;
        let scroll = self.viewport.scroll;
        for overlay in self.overlays.values_mut() {
            overlay.content_bounds = overlay.layout_bounds(&translater, scale);
            self.host
                .attach(&overlay.element, overlay.content_bounds.translated(&negate(&scroll)));
            overlay.state = OverlayState::Positioned;
        }
        log::trace!(
            "repositioned {} overlays at scale {:.4}, scroll ({:.1}, {:.1})",
            self.overlays.len(),
            scale,
            scroll.x,
            scroll.y
        );
    }

    /// Switches to a new coordinate space or content size and re-places
    /// everything
    pub fn set_translater(&mut self, translater: CoordinateTranslater) {
        self.replace_translater(translater);
        self.reposition_all();
    }

    /// Swaps the translater without a pass; the caller must follow up with
    /// one (e.g. through `on_viewport_changed`)
    pub(crate) fn replace_translater(&mut self, translater: CoordinateTranslater) {
        self.translater = translater;
        self.indexed_scale = None;
    }

    /// Displayed top-left corner of an overlay, in viewport pixels
    pub fn position_of(&self, handle: OverlayHandle) -> Option<Point> {
        self.bounds_of(handle).map(|bounds| bounds.origin())
    }

    /// Displayed box of an overlay, in viewport pixels
    pub fn bounds_of(&self, handle: OverlayHandle) -> Option<Bounds> {
        self.overlays
            .get(&handle)
            .map(|overlay| self.viewport_bounds(overlay))
    }

    /// The overlay's coordinate in content pixels at `scale`, before anchoring
    pub fn anchor_point_of(&self, handle: OverlayHandle, scale: f64) -> Option<Point> {
        self.overlays
            .get(&handle)
            .map(|overlay| overlay.anchor_point(&self.translater, scale))
    }

    pub fn relative_position_of(&self, handle: OverlayHandle) -> Option<Point> {
        self.overlays.get(&handle).map(|overlay| overlay.relative)
    }

    /// Lifecycle state. `None` for handles this layout never issued.
    pub fn state_of(&self, handle: OverlayHandle) -> Option<OverlayState> {
        match self.overlays.get(&handle) {
            Some(overlay) => Some(overlay.state),
            None if handle.0 > 0 && handle.0 < self.next_id => Some(OverlayState::Removed),
            None => None,
        }
    }

    pub fn kind_of(&self, handle: OverlayHandle) -> Option<OverlayKind> {
        self.overlays.get(&handle).map(|overlay| overlay.kind)
    }

    pub fn overlay(&self, handle: OverlayHandle) -> Option<&Overlay<H::Element>> {
        self.overlays.get(&handle)
    }

    pub fn element(&self, handle: OverlayHandle) -> Option<&H::Element> {
        self.overlays.get(&handle).map(|overlay| &overlay.element)
    }

    pub fn is_marker(&self, handle: OverlayHandle) -> bool {
        self.kind_of(handle) == Some(OverlayKind::Marker)
    }

    /// Marker handles in insertion order
    pub fn markers(&self) -> Vec<OverlayHandle> {
        self.handles_of_kind(OverlayKind::Marker)
    }

    /// Callout handles in insertion order
    pub fn callouts(&self) -> Vec<OverlayHandle> {
        self.handles_of_kind(OverlayKind::Callout)
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn translater(&self) -> &CoordinateTranslater {
        &self.translater
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    fn add_overlay(
        &mut self,
        element: H::Element,
        relative: Point,
        anchor: AnchorSpec,
        kind: OverlayKind,
    ) -> OverlayHandle {
        let handle = OverlayHandle(self.next_id);
        self.next_id += 1;

        // measure first: the anchor offset depends on the natural size
        let measured = self.host.measure(&element);
        let mut overlay = Overlay::new(handle, element, relative, anchor, kind, measured);
        self.place(&mut overlay);

        if self.index_is_current() {
            self.index
                .insert(SpatialItem::new(handle, overlay.content_bounds, handle.0));
        }

        log::debug!(
            "added {kind} {handle} at ({:.4}, {:.4}), size {:.0}x{:.0}",
            relative.x,
            relative.y,
            measured.width,
            measured.height
        );
        self.overlays.insert(handle, overlay);
        handle
    }

    fn move_overlay(&mut self, handle: OverlayHandle, kind: OverlayKind, relative: Point) -> bool {
        if self.kind_of(handle) != Some(kind) {
            log::trace!("ignoring move of unknown {kind} {handle}");
            return false;
        }
        self.update_overlay(handle, |overlay, _| overlay.relative = relative)
    }

    fn remove_overlay(&mut self, handle: OverlayHandle, kind: OverlayKind) -> Option<H::Element> {
        if self.kind_of(handle) != Some(kind) {
            log::trace!("ignoring removal of unknown {kind} {handle}");
            return None;
        }
        let mut overlay = self.overlays.remove(&handle)?;

        if self.index_is_current() {
            self.index.remove(handle, overlay.content_bounds);
        }
        self.host.detach(&overlay.element);
        overlay.state = OverlayState::Removed;

        log::debug!("removed {kind} {handle}");
        Some(overlay.element)
    }

    /// Applies a change to one overlay and re-places only that overlay
    fn update_overlay<F>(&mut self, handle: OverlayHandle, change: F) -> bool
    where
        F: FnOnce(&mut Overlay<H::Element>, &mut H),
    {
        let Some(mut overlay) = self.overlays.remove(&handle) else {
            return false;
        };
        let previous_bounds = overlay.content_bounds;

        change(&mut overlay, &mut self.host);
        self.place(&mut overlay);

        if self.index_is_current() {
            self.index.remove(handle, previous_bounds);
            self.index
                .insert(SpatialItem::new(handle, overlay.content_bounds, handle.0));
        }
        self.overlays.insert(handle, overlay);
        true
    }

    /// Computes one overlay's box and pushes it to the host
    fn place(&mut self, overlay: &mut Overlay<H::Element>) {
        overlay.content_bounds = overlay.layout_bounds(&self.translater, self.viewport.scale);
        let frame = self.viewport_bounds(overlay);
        self.host.attach(&overlay.element, frame);
        overlay.state = OverlayState::Positioned;
    }

    fn viewport_bounds(&self, overlay: &Overlay<H::Element>) -> Bounds {
        overlay
            .content_bounds
            .translated(&negate(&self.viewport.scroll))
    }

    fn index_is_current(&self) -> bool {
        self.indexed_scale == Some(self.viewport.scale)
    }

    fn ensure_index(&mut self) {
        if self.index_is_current() {
            return;
        }
        let items = self
            .overlays
            .values()
            .map(|overlay| SpatialItem::new(overlay.handle, overlay.content_bounds, overlay.handle.0))
            .collect();
        self.index.rebuild(items);
        self.indexed_scale = Some(self.viewport.scale);
        log::trace!("rebuilt hit-test index for scale {:.4}", self.viewport.scale);
    }

    fn handles_of_kind(&self, kind: OverlayKind) -> Vec<OverlayHandle> {
        let mut handles: Vec<OverlayHandle> = self
            .overlays
            .values()
            .filter(|overlay| overlay.kind == kind)
            .map(|overlay| overlay.handle)
            .collect();
        handles.sort_unstable();
        handles
    }
}

impl<H: OverlayHost> ViewportAware for MarkerLayout<H> {
    fn on_viewport_changed(&mut self, viewport: &ViewportState) {
        self.viewport = *viewport;
        self.reposition_all();
    }
}

fn negate(point: &Point) -> Point {
    Point::new(0.0, 0.0).subtract(point)
}
