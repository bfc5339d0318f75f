use serde::{Deserialize, Serialize};

/// Easing curves available to slide animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EasingType {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Smooth,
    UltraSmooth,
}

impl EasingType {
    /// Apply easing function to a normalized time value (0.0 to 1.0)
    ///
    /// Every curve maps 0 to 0 and 1 to 1 exactly, so a finished slide
    /// lands on its target without residual error.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::EaseIn => t * t * t,
            EasingType::EaseOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            EasingType::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            EasingType::Smooth => {
                // Smooth step (3t^2 - 2t^3)
                t * t * (3.0 - 2.0 * t)
            }
            EasingType::UltraSmooth => {
                // Ultra smooth step (6t^5 - 15t^4 + 10t^3)
                t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
            }
        }
    }
}

impl Default for EasingType {
    fn default() -> Self {
        Self::EaseInOut
    }
}
