//! Input events and the sources that produce them.

use std::collections::VecDeque;

/// Keyboard modifier state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub logo: bool,
}

/// Named keys for special keyboard keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Left,
    Right,
    Up,
    Down,
    /// Character input
    Char(char),
}

impl Key {
    /// Case-insensitive match against a character binding.
    pub fn matches_char(&self, binding: char) -> bool {
        match self {
            Key::Char(c) => c.to_lowercase().eq(binding.to_lowercase()),
            _ => false,
        }
    }
}

/// Scroll source - discrete (mouse wheel) or smooth (touchpad/touchscreen)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollSource {
    /// Mouse wheel - discrete steps (converted to pixels)
    Wheel,
    /// Touchpad/touchscreen - smooth pixel-based scrolling
    Finger,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Key pressed (also delivered for OS key repeat)
    KeyDown { key: Key, modifiers: Modifiers },
    /// Key released
    KeyUp { key: Key, modifiers: Modifiers },
    /// Pointer scroll (wheel, touchpad, or touchscreen)
    Scroll {
        /// Horizontal scroll delta in pixels (positive = right)
        delta_x: f32,
        /// Vertical scroll delta in pixels (positive = down)
        delta_y: f32,
        source: ScrollSource,
    },
}

impl Event {
    /// Key-down event with no modifiers held
    pub fn key_down(key: Key) -> Self {
        Event::KeyDown {
            key,
            modifiers: Modifiers::default(),
        }
    }

    /// Shorthand for pressing a character key
    pub fn char(c: char) -> Self {
        Self::key_down(Key::Char(c))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Ignored,
    Handled,
}

/// Anything that can hand the carousel a stream of input events.
///
/// The window system owns the real keyboard; the carousel only ever pulls
/// from a source, so tests can feed it synthetic events.
pub trait InputSource {
    /// Next pending event, or `None` once the source is drained for now.
    fn poll_event(&mut self) -> Option<Event>;
}

/// Queue-backed input source for scripted sessions and tests.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    queue: VecDeque<Event>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event to be returned by the next poll
    pub fn push(&mut self, event: Event) -> &mut Self {
        self.queue.push_back(event);
        self
    }

    /// Queue a key-down for every character of `keys`
    pub fn type_keys(&mut self, keys: &str) -> &mut Self {
        for c in keys.chars() {
            self.queue.push_back(Event::char(c));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll_event(&mut self) -> Option<Event> {
        self.queue.pop_front()
    }
}

impl<I: InputSource + ?Sized> InputSource for &mut I {
    fn poll_event(&mut self) -> Option<Event> {
        (**self).poll_event()
    }
}
