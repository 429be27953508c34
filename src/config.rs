use crate::animation::{TimingFunction, Transition};
use crate::input::Key;
use crate::scroll::MAX_DECELERATION;

/// Character keys the launcher listens to, matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    /// Flips press mode on and off
    pub toggle: char,
    /// Nudges velocity towards the start of the strip
    pub left: char,
    /// Nudges velocity towards the end of the strip
    pub right: char,
}

/// What a recognised key asks the carousel to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    TogglePressMode,
    Nudge(Direction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Sign applied to the scroll step
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

impl KeyBindings {
    pub fn action_for(&self, key: &Key) -> Option<KeyAction> {
        if key.matches_char(self.toggle) {
            Some(KeyAction::TogglePressMode)
        } else if key.matches_char(self.left) {
            Some(KeyAction::Nudge(Direction::Left))
        } else if key.matches_char(self.right) {
            Some(KeyAction::Nudge(Direction::Right))
        } else {
            None
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle: 'j',
            left: 'a',
            right: 'd',
        }
    }
}

/// Tuning for the carousel physics and animations.
#[derive(Debug, Clone)]
pub struct CarouselConfig {
    /// Velocity added per directional key press
    pub scroll_step: f32,
    /// Per-frame multiplicative velocity decay, in `(0, 1)`. Values above
    /// [`MAX_DECELERATION`] are capped when integrating.
    pub deceleration: f32,
    /// Below this speed momentum stops and the snap begins
    pub snap_threshold: f32,
    /// Scale of an item sitting exactly on the viewport center
    pub max_scale: f32,
    /// Length of the snap-to-center animation
    pub snap_duration_ms: f32,
    pub snap_timing: TimingFunction,
    /// Fraction of the viewport width over which scale falls off to 1
    pub scale_window: f32,
    /// Snap distances smaller than this are treated as already centered
    pub center_tolerance: f32,
    /// Smoothing applied to every scale change
    pub scale_transition: Transition,
    /// Frame period for schedulers backed by a timer
    pub frame_interval_ms: u64,
    pub keys: KeyBindings,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            scroll_step: 10.0,
            deceleration: 0.92,
            snap_threshold: 1.5,
            max_scale: 1.8,
            snap_duration_ms: 300.0,
            snap_timing: TimingFunction::EaseInOutCubic,
            scale_window: 1.0 / 3.0,
            center_tolerance: 1.0,
            scale_transition: Transition::new(100.0, TimingFunction::EaseOut),
            frame_interval_ms: 16,
            keys: KeyBindings::default(),
        }
    }
}

impl CarouselConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_step(mut self, step: f32) -> Self {
        self.scroll_step = step;
        self
    }

    /// Set the decay factor. Values outside `(0, 1)` would never settle and
    /// are clamped.
    pub fn deceleration(mut self, factor: f32) -> Self {
        let clamped = factor.clamp(0.0, MAX_DECELERATION);
        if clamped != factor {
            log::warn!("Deceleration {} out of range, using {}", factor, clamped);
        }
        self.deceleration = clamped;
        self
    }

    /// Set the stop threshold. Must be positive or momentum never ends.
    pub fn snap_threshold(mut self, threshold: f32) -> Self {
        let clamped = threshold.max(f32::EPSILON);
        if clamped != threshold {
            log::warn!("Snap threshold {} must be positive, using {}", threshold, clamped);
        }
        self.snap_threshold = clamped;
        self
    }

    pub fn max_scale(mut self, scale: f32) -> Self {
        self.max_scale = scale;
        self
    }

    pub fn snap_duration_ms(mut self, duration_ms: f32) -> Self {
        self.snap_duration_ms = duration_ms;
        self
    }

    pub fn snap_timing(mut self, timing: TimingFunction) -> Self {
        self.snap_timing = timing;
        self
    }

    pub fn scale_window(mut self, fraction: f32) -> Self {
        self.scale_window = fraction;
        self
    }

    pub fn center_tolerance(mut self, tolerance: f32) -> Self {
        self.center_tolerance = tolerance;
        self
    }

    pub fn scale_transition(mut self, transition: Transition) -> Self {
        self.scale_transition = transition;
        self
    }

    pub fn frame_interval_ms(mut self, interval_ms: u64) -> Self {
        self.frame_interval_ms = interval_ms.max(1);
        self
    }

    pub fn keys(mut self, keys: KeyBindings) -> Self {
        self.keys = keys;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(
            keys.action_for(&Key::Char('J')),
            Some(KeyAction::TogglePressMode)
        );
        assert_eq!(
            keys.action_for(&Key::Char('a')),
            Some(KeyAction::Nudge(Direction::Left))
        );
        assert_eq!(
            keys.action_for(&Key::Char('D')),
            Some(KeyAction::Nudge(Direction::Right))
        );
        assert_eq!(keys.action_for(&Key::Char('w')), None);
        assert_eq!(keys.action_for(&Key::Left), None);
    }

    #[test]
    fn test_deceleration_is_clamped() {
        assert_eq!(CarouselConfig::new().deceleration(1.2).deceleration, 0.999);
        assert_eq!(CarouselConfig::new().deceleration(0.5).deceleration, 0.5);
    }

    #[test]
    fn test_threshold_must_be_positive() {
        let config = CarouselConfig::new().snap_threshold(0.0);
        assert!(config.snap_threshold > 0.0);
    }

    #[test]
    fn test_defaults() {
        let config = CarouselConfig::default();
        assert_eq!(config.scroll_step, 10.0);
        assert_eq!(config.deceleration, 0.92);
        assert_eq!(config.snap_threshold, 1.5);
        assert_eq!(config.max_scale, 1.8);
        assert_eq!(config.snap_duration_ms, 300.0);
    }
}
