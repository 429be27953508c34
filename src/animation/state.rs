use crate::animation::{Animatable, Transition};

/// Timestamp-driven tween between two values.
///
/// The state never reads a clock; callers pass the frame timestamp in
/// milliseconds, and sampling is a pure function of that timestamp.
#[derive(Debug, Clone)]
pub struct AnimationState<T: Animatable> {
    /// Value when the animation started
    start: T,
    /// Value being animated towards
    target: T,
    /// Timestamp of `animate_to`
    start_ms: f64,
    transition: Transition,
}

impl<T: Animatable> AnimationState<T> {
    /// New state resting at `initial_value`
    pub fn new(initial_value: T, transition: Transition) -> Self {
        Self {
            start: initial_value.clone(),
            target: initial_value,
            start_ms: f64::NEG_INFINITY,
            transition,
        }
    }

    /// Start animating to a new target value at `now_ms`.
    ///
    /// Retargeting mid-flight continues from the currently sampled value.
    pub fn animate_to(&mut self, new_target: T, now_ms: f64) {
        let transition = self.transition.clone();
        self.animate_to_with(new_target, now_ms, &transition);
    }

    /// Like [`animate_to`](Self::animate_to) but with a new transition.
    pub fn animate_to_with(&mut self, new_target: T, now_ms: f64, transition: &Transition) {
        // Don't restart if we're already animating to this target
        if new_target == self.target {
            return;
        }
        self.start = self.sample(now_ms);
        self.target = new_target;
        self.start_ms = now_ms;
        self.transition = transition.clone();
    }

    /// Interpolated value at `now_ms`
    pub fn sample(&self, now_ms: f64) -> T {
        let t = self.transition.progress(now_ms - self.start_ms);
        if t >= 1.0 {
            return self.target.clone();
        }
        T::lerp(&self.start, &self.target, self.transition.timing.evaluate(t))
    }

    /// Check if animation is still running at `now_ms`
    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.transition.progress(now_ms - self.start_ms) < 1.0
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}
