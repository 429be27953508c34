//! Easing curves and timed transitions.
//!
//! Everything here is driven by explicit timestamps (milliseconds) instead of
//! reading a wall clock, so the same code runs under a real frame loop and a
//! simulated one.

mod animatable;
mod state;
mod timing;

pub use animatable::Animatable;
pub use state::AnimationState;
pub use timing::TimingFunction;

/// Configuration for how a property should animate when it changes
#[derive(Clone, Debug)]
pub struct Transition {
    /// Duration of the animation in milliseconds
    pub duration_ms: f32,
    /// Timing function controlling the animation curve
    pub timing: TimingFunction,
}

impl Transition {
    /// Create a new transition with the given duration and timing function
    pub fn new(duration_ms: f32, timing: TimingFunction) -> Self {
        Self {
            duration_ms,
            timing,
        }
    }

    /// Set the duration of the animation
    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the timing function
    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    /// Normalized progress in `[0, 1]` after `elapsed_ms`.
    /// A zero or negative duration completes immediately.
    pub fn progress(&self, elapsed_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms.max(0.0) / self.duration_ms as f64).min(1.0) as f32
    }
}

impl Default for Transition {
    /// Short ease-out, the same feel as `transform 0.1s ease-out`
    fn default() -> Self {
        Self::new(100.0, TimingFunction::EaseOut)
    }
}
