//! Shared fixtures for integration tests

use std::collections::HashMap;
use tileview::{Bounds, MapView, MapViewBuilder, OverlayHost, Size};

/// Element handed to the host: an id plus its natural size
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub id: u32,
    pub width: f64,
    pub height: f64,
}

impl Pin {
    pub fn new(id: u32, width: f64, height: f64) -> Self {
        Self { id, width, height }
    }
}

/// Host that records every frame it is asked to display
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub frames: HashMap<u32, Bounds>,
    pub attached: usize,
    pub detached: Vec<u32>,
}

impl OverlayHost for RecordingHost {
    type Element = Pin;

    fn measure(&mut self, element: &Pin) -> Size {
        Size::new(element.width, element.height)
    }

    fn attach(&mut self, element: &Pin, frame: Bounds) {
        self.attached += 1;
        self.frames.insert(element.id, frame);
    }

    fn detach(&mut self, element: &Pin) {
        self.frames.remove(&element.id);
        self.detached.push(element.id);
    }
}

/// 1000x1000 content in a 400x300 window, unit relative bounds
pub fn map_view() -> MapView<RecordingHost> {
    MapViewBuilder::new(Size::new(1000.0, 1000.0), Size::new(400.0, 300.0))
        .with_host(RecordingHost::default())
        .build()
        .expect("valid test map")
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
