//! Frame-driven scroll/scale transitions.
//!
//! A slide interpolates the viewport centre in unscaled content space and the
//! scale factor independently, then derives the scroll offset for each frame.
//! Interpolating the centre rather than the raw scroll keeps the target under
//! the middle of the viewport for the whole transition when the scale changes
//! along the way. The final frame always reports the exact requested target.

use crate::{
    animation::easing::EasingType,
    core::geo::{Point, Size},
    traits::{Lerp, PointMath},
};
use std::time::Duration;

/// Viewport state a slide starts from or heads to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideTarget {
    /// Scroll offset in content pixels at `scale`
    pub scroll: Point,
    pub scale: f64,
}

impl SlideTarget {
    pub fn new(scroll: Point, scale: f64) -> Self {
        Self { scroll, scale }
    }

    /// Viewport centre expressed in content pixels at scale 1.0
    fn unscaled_center(&self, visible_size: Size) -> Point {
        self.scroll
            .add(&visible_size.half())
            .multiply(1.0 / self.scale)
    }
}

/// One interpolated step of a slide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideFrame {
    pub scroll: Point,
    pub scale: f64,
    /// Linear progress through the duration, 0.0 to 1.0
    pub progress: f64,
    pub finished: bool,
}

/// An in-flight slide. Dropping the value cancels it.
#[derive(Debug, Clone)]
pub struct SlideAnimation {
    from: SlideTarget,
    to: SlideTarget,
    from_center: Point,
    to_center: Point,
    visible_size: Size,
    duration: Duration,
    elapsed: Duration,
    easing: EasingType,
}

impl SlideAnimation {
    pub fn new(
        from: SlideTarget,
        to: SlideTarget,
        visible_size: Size,
        duration: Duration,
        easing: EasingType,
    ) -> Self {
        Self {
            from,
            to,
            from_center: from.unscaled_center(visible_size),
            to_center: to.unscaled_center(visible_size),
            visible_size,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    pub fn origin(&self) -> SlideTarget {
        self.from
    }

    pub fn target(&self) -> SlideTarget {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Linear progress in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// The window was resized mid-flight. Both endpoint centres are kept and
    /// their scroll offsets re-derived for the new size.
    pub fn set_visible_size(&mut self, visible_size: Size) {
        self.visible_size = visible_size;
        self.refresh_scrolls();
    }

    /// Clamps both endpoint scales into new limits, keeping their centres
    pub fn clamp_scales(&mut self, min_scale: f64, max_scale: f64) {
        self.from.scale = self.from.scale.clamp(min_scale, max_scale);
        self.to.scale = self.to.scale.clamp(min_scale, max_scale);
        self.refresh_scrolls();
    }

    /// Moves the animation clock forward and returns the frame to display
    pub fn advance(&mut self, delta: Duration) -> SlideFrame {
        self.elapsed = (self.elapsed + delta).min(self.duration);
        self.current_frame()
    }

    /// Frame for the current clock position without advancing it
    pub fn current_frame(&self) -> SlideFrame {
        let progress = self.progress();
        if progress >= 1.0 {
            return SlideFrame {
                scroll: self.to.scroll,
                scale: self.to.scale,
                progress: 1.0,
                finished: true,
            };
        }

        let eased = self.easing.apply(progress);
        let scale = self.from.scale.lerp(&self.to.scale, eased);
        let center = self.from_center.lerp(&self.to_center, eased);
        let scroll = center
            .multiply(scale)
            .subtract(&self.visible_size.half());

        SlideFrame {
            scroll,
            scale,
            progress,
            finished: false,
        }
    }

    fn refresh_scrolls(&mut self) {
        let half = self.visible_size.half();
        self.from.scroll = self.from_center.multiply(self.from.scale).subtract(&half);
        self.to.scroll = self.to_center.multiply(self.to.scale).subtract(&half);
    }
}
