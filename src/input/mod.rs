pub mod events;
pub mod tap;

// Re-export the essential types
pub use events::{EventHandled, InputEvent, MapEvent};
pub use tap::{ListenerId, OverlayTap, TapDispatcher, TapListener};
