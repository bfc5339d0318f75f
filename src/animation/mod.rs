pub mod easing;
pub mod slide;

// Re-export commonly used types and functions for convenience
pub use easing::EasingType;
pub use slide::{SlideAnimation, SlideFrame, SlideTarget};
