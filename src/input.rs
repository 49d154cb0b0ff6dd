//! Keyboard state tracking and the per-frame control snapshot.
//!
//! Force-generating code never polls a shared input manager. The embedder
//! feeds key events into a [`KeyboardState`], takes one [`ControlInput`]
//! snapshot per frame and hands it to the world driver.

use alloc::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Keys the physics core reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    Num1,
    Num2,
}

/// Level and rising-edge key tracker.
#[derive(Clone, Debug, Default)]
pub struct KeyboardState {
    status: BTreeMap<Key, bool>,
    rising_edge: BTreeMap<Key, bool>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` pressed. Auto-repeat while held does not re-arm the edge.
    pub fn set_key_down(&mut self, key: Key) {
        if !self.is_key_down(key) {
            self.rising_edge.insert(key, true);
        }
        self.status.insert(key, true);
    }

    pub fn set_key_up(&mut self, key: Key) {
        self.status.insert(key, false);
        self.rising_edge.insert(key, false);
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.status.get(&key).copied().unwrap_or(false)
    }

    /// True at most once per press; later calls return false until the key
    /// is released and pressed again.
    pub fn consume_rising_edge(&mut self, key: Key) -> bool {
        match self.rising_edge.get_mut(&key) {
            Some(edge) if *edge => {
                *edge = false;
                true
            }
            _ => false,
        }
    }

    pub fn dir_up(&self) -> bool { self.is_key_down(Key::Up) || self.is_key_down(Key::W) }
    pub fn dir_down(&self) -> bool { self.is_key_down(Key::Down) || self.is_key_down(Key::S) }
    pub fn dir_left(&self) -> bool { self.is_key_down(Key::Left) || self.is_key_down(Key::A) }
    pub fn dir_right(&self) -> bool { self.is_key_down(Key::Right) || self.is_key_down(Key::D) }

    /// Capture the current controls, consuming the rope-toggle edges.
    pub fn snapshot(&mut self) -> ControlInput {
        ControlInput {
            up: self.dir_up(),
            down: self.dir_down(),
            left: self.dir_left(),
            right: self.dir_right(),
            toggle_left_weight: self.consume_rising_edge(Key::Num1),
            toggle_right_weight: self.consume_rising_edge(Key::Num2),
        }
    }
}

/// Immutable controls for one frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlInput {
    /// Burner on: heat the envelope.
    pub up: bool,
    /// Valve open: cool the envelope.
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Edge: break or reattach the left weight's rope.
    pub toggle_left_weight: bool,
    /// Edge: break or reattach the right weight's rope.
    pub toggle_right_weight: bool,
}

impl ControlInput {
    /// Same levels with the edge flags cleared, for every sub-step after the first.
    pub fn without_edges(self) -> Self {
        ControlInput {
            toggle_left_weight: false,
            toggle_right_weight: false,
            ..self
        }
    }

    /// Levels from `self`, with edges set in either snapshot.
    pub fn merge_edges(self, earlier: ControlInput) -> Self {
        ControlInput {
            toggle_left_weight: self.toggle_left_weight || earlier.toggle_left_weight,
            toggle_right_weight: self.toggle_right_weight || earlier.toggle_right_weight,
            ..self
        }
    }

    pub fn has_edges(&self) -> bool {
        self.toggle_left_weight || self.toggle_right_weight
    }
}
