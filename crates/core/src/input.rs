//! Input module - per-key press and hold tracking in frames
//!
//! Each logical key records whether it is down and for how many frames it has
//! been held. The counter is 0 on the frame a key goes down and advances once
//! per [`InputState::step`], which the engine calls once per tick after
//! reading the state. Auto-repeat and first-press detection are derived from it.

use crate::types::KeyKind;

/// Anything that accepts logical key transitions.
///
/// Implemented by [`InputState`] and by the engine so input producers do not
/// need to know which one they feed.
pub trait KeySink {
    fn key_down(&mut self, key: KeyKind);
    fn key_up(&mut self, key: KeyKind);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KeyState {
    down: bool,
    /// Frames held, or -1 when released.
    held_frames: i32,
}

impl Default for KeyState {
    fn default() -> Self {
        Self {
            down: false,
            held_frames: -1,
        }
    }
}

/// Press/hold state of all logical keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    keys: [KeyState; KeyKind::ALL.len()],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press. Repeated presses of a key that is already down (OS key
    /// repeat) are ignored so the hold counter keeps running.
    pub fn key_down(&mut self, key: KeyKind) {
        let st = &mut self.keys[key.index()];
        if !st.down {
            st.down = true;
            st.held_frames = 0;
        }
    }

    pub fn key_up(&mut self, key: KeyKind) {
        self.keys[key.index()] = KeyState::default();
    }

    /// Advance one frame.
    pub fn step(&mut self) {
        for st in &mut self.keys {
            if st.down {
                st.held_frames += 1;
            } else {
                st.held_frames = 0;
            }
        }
    }

    pub fn is_held(&self, key: KeyKind) -> bool {
        self.keys[key.index()].down
    }

    /// True only on the first frame a key is down.
    pub fn is_just_pressed(&self, key: KeyKind) -> bool {
        let st = self.keys[key.index()];
        st.down && st.held_frames == 0
    }

    /// Frames the key has been held; only meaningful while it is down.
    pub fn frames_held(&self, key: KeyKind) -> i32 {
        self.keys[key.index()].held_frames
    }

    /// Release every key.
    pub fn reset(&mut self) {
        self.keys = Default::default();
    }
}

impl KeySink for InputState {
    fn key_down(&mut self, key: KeyKind) {
        InputState::key_down(self, key);
    }

    fn key_up(&mut self, key: KeyKind) {
        InputState::key_up(self, key);
    }
}
