//! Velocity state for momentum scrolling.

use bitflags::bitflags;

/// Largest decay factor that still settles in a bounded number of frames
pub const MAX_DECELERATION: f32 = 0.999;

bitflags! {
    /// Mode bits of the carousel's scroll state
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct ScrollFlags: u8 {
        /// Press mode: directional keys are live
        const INPUT_ENABLED = 0b01;
        /// Momentum integration is running
        const ANIMATING     = 0b10;
    }
}

/// Outcome of one integrator step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MomentumStep {
    /// Velocity fell under the threshold and was zeroed
    Settled,
    /// Velocity (already decayed) to add to the offset this frame
    Moved(f32),
}

/// Velocity and mode flags. The offset itself lives in the scroll surface.
#[derive(Debug, Default)]
pub struct ScrollState {
    /// Signed velocity in offset units per frame
    pub velocity: f32,
    pub flags: ScrollFlags,
}

impl ScrollState {
    pub fn is_input_enabled(&self) -> bool {
        self.flags.contains(ScrollFlags::INPUT_ENABLED)
    }

    pub fn is_animating(&self) -> bool {
        self.flags.contains(ScrollFlags::ANIMATING)
    }

    /// Flip press mode, returning the new state
    pub fn toggle_input(&mut self) -> bool {
        self.flags.toggle(ScrollFlags::INPUT_ENABLED);
        self.is_input_enabled()
    }

    /// Add an impulse. Velocity is deliberately uncapped: held keys keep
    /// accumulating until decay catches up.
    pub fn push(&mut self, delta: f32) {
        self.velocity += delta;
        self.flags.insert(ScrollFlags::ANIMATING);
    }

    /// Advance kinetic scrolling by one frame.
    ///
    /// `deceleration` is capped at [`MAX_DECELERATION`] so momentum always
    /// ends.
    pub fn advance_momentum(&mut self, deceleration: f32, threshold: f32) -> MomentumStep {
        // Negated so a NaN velocity settles too
        if !(self.velocity.abs() >= threshold) {
            self.stop();
            return MomentumStep::Settled;
        }

        self.velocity *= deceleration.clamp(0.0, MAX_DECELERATION);
        MomentumStep::Moved(self.velocity)
    }

    /// Zero the velocity and leave momentum mode
    pub fn stop(&mut self) {
        self.velocity = 0.0;
        self.flags.remove(ScrollFlags::ANIMATING);
    }

    /// Reset everything, including press mode
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Number of decay steps before `initial` drops below `threshold`:
/// `ceil(ln(threshold / |v|) / ln(deceleration))`, zero if already below.
pub fn frames_to_settle(initial: f32, deceleration: f32, threshold: f32) -> u32 {
    let speed = initial.abs() as f64;
    let threshold = threshold as f64;
    if speed < threshold {
        return 0;
    }
    let deceleration = deceleration.clamp(0.0, MAX_DECELERATION) as f64;
    let steps = (threshold / speed).ln() / deceleration.ln();
    // Exact powers land on the threshold itself, which still moves once more
    let whole = steps.ceil();
    if whole == steps {
        whole as u32 + 1
    } else {
        whole as u32
    }
}
