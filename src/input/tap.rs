//! Tap observation for overlays.
//!
//! A tap is resolved to at most one overlay and reported to every listener
//! in registration order. The dispatcher never consumes the event.

use crate::{
    core::geo::Point,
    input::events::{EventHandled, InputEvent},
    layers::{
        marker::{OverlayHandle, OverlayKind},
        marker_layout::MarkerLayout,
    },
    traits::OverlayHost,
    Result,
};
use std::panic::{self, AssertUnwindSafe};

/// Callback invoked with every resolved overlay tap
pub type TapListener = Box<dyn FnMut(&OverlayTap) -> Result<()>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// An overlay hit by a tap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayTap {
    pub handle: OverlayHandle,
    pub kind: OverlayKind,
    /// Tap position in viewport pixels
    pub pixel: Point,
    /// Tap position in relative coordinates
    pub relative: Point,
}

#[derive(Default)]
pub struct TapDispatcher {
    listeners: Vec<(ListenerId, TapListener)>,
    next_id: u64,
}

impl TapDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener; listeners run in registration order
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&OverlayTap) -> Result<()> + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Replaces every listener with a single one
    pub fn set_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&OverlayTap) -> Result<()> + 'static,
    {
        self.listeners.clear();
        self.add_listener(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Resolves a tap event and notifies listeners. Always `NotHandled`.
    pub fn dispatch<H: OverlayHost>(
        &mut self,
        layout: &mut MarkerLayout<H>,
        event: &InputEvent,
    ) -> EventHandled {
        if let InputEvent::Tap { position } = event {
            if let Some(tap) = Self::resolve(layout, *position) {
                self.notify(&tap);
            }
        }
        EventHandled::NotHandled
    }

    /// Finds the overlay under a viewport pixel
    pub fn resolve<H: OverlayHost>(
        layout: &mut MarkerLayout<H>,
        pixel: Point,
    ) -> Option<OverlayTap> {
        let handle = layout.get_view_from_tap(pixel.x, pixel.y)?;
        let kind = layout.kind_of(handle)?;
        let viewport = layout.viewport();
        let content = viewport.viewport_to_content(&pixel);
        let relative = layout.translater().untranslate(&content, viewport.scale);

        Some(OverlayTap {
            handle,
            kind,
            pixel,
            relative,
        })
    }

    /// Runs every listener. A failing or panicking listener is logged and
    /// skipped. Returns how many listeners succeeded.
    pub fn notify(&mut self, tap: &OverlayTap) -> usize {
        let mut succeeded = 0;
        for (id, listener) in self.listeners.iter_mut() {
            match panic::catch_unwind(AssertUnwindSafe(|| listener(tap))) {
                Ok(Ok(())) => succeeded += 1,
                Ok(Err(e)) => {
                    log::warn!("tap listener {:?} failed for {}: {}", id, tap.handle, e);
                }
                Err(payload) => {
                    let message = payload
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| payload.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "unknown panic".to_string());
                    log::warn!("tap listener {:?} panicked for {}: {}", id, tap.handle, message);
                }
            }
        }
        succeeded
    }
}
