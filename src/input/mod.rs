//! # Input Module
//!
//! The key-state capability the hero consumes, and its implementations.
//!
//! The core never talks to the windowing layer directly: the hero's update
//! asks an [`InputState`] "is this control held right now". The live game
//! answers from macroquad key state; tests script a [`KeySet`].

use macroquad::prelude::{is_key_down, KeyCode};
use std::collections::HashSet;

/// The game's logical controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    North,
    South,
    West,
    East,
    Interact,
    Attack,
}

/// Capability answering "is control `c` currently held?".
///
/// Queried once per tick by the hero's update; implementations must be
/// level-triggered (report the held state, not key events).
pub trait InputState {
    fn is_down(&self, control: Control) -> bool;
}

/// Live keyboard state via macroquad.
///
/// Movement binds to both WASD and the arrow keys, interact to E/Enter,
/// attack to Space.
#[derive(Debug, Default)]
pub struct Keyboard;

impl Keyboard {
    pub fn new() -> Self {
        Self
    }
}

impl InputState for Keyboard {
    fn is_down(&self, control: Control) -> bool {
        let codes: &[KeyCode] = match control {
            Control::North => &[KeyCode::W, KeyCode::Up],
            Control::South => &[KeyCode::S, KeyCode::Down],
            Control::West => &[KeyCode::A, KeyCode::Left],
            Control::East => &[KeyCode::D, KeyCode::Right],
            Control::Interact => &[KeyCode::E, KeyCode::Enter],
            Control::Attack => &[KeyCode::Space],
        };
        codes.iter().any(|&code| is_key_down(code))
    }
}

/// Scriptable key state for tests and replays.
///
/// # Examples
///
/// ```
/// use delve::{Control, InputState, KeySet};
///
/// let mut keys = KeySet::new();
/// keys.press(Control::East);
/// assert!(keys.is_down(Control::East));
/// keys.release(Control::East);
/// assert!(!keys.is_down(Control::East));
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    held: HashSet<Control>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, control: Control) {
        self.held.insert(control);
    }

    pub fn release(&mut self, control: Control) {
        self.held.remove(&control);
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

impl InputState for KeySet {
    fn is_down(&self, control: Control) -> bool {
        self.held.contains(&control)
    }
}
