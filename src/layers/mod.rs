pub mod marker;
pub mod marker_layout;

pub use marker::{AnchorSpec, Overlay, OverlayHandle, OverlayKind, OverlayState};
pub use marker_layout::MarkerLayout;
