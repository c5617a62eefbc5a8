//! Keyboard sampling
//!
//! Hosts forward raw key-down/key-up events; the simulation reads one
//! `TickInput` per tick.

use crate::sim::TickInput;

/// Logical game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Fire,
    Start,
}

impl Action {
    /// Map a browser `KeyboardEvent.key` value to an action
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Action::MoveLeft),
            "ArrowRight" | "d" | "D" => Some(Action::MoveRight),
            " " | "Spacebar" => Some(Action::Fire),
            "Enter" => Some(Action::Start),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Action),
    Up(Action),
}

/// Held-key state between ticks
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    left: bool,
    right: bool,
    fire: bool,
    start_pressed: bool,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Down(action) => self.set(action, true),
            KeyEvent::Up(action) => self.set(action, false),
        }
    }

    fn set(&mut self, action: Action, held: bool) {
        match action {
            Action::MoveLeft => self.left = held,
            Action::MoveRight => self.right = held,
            Action::Fire => self.fire = held,
            // Start latches on press and is consumed by the next sample
            Action::Start => {
                if held {
                    self.start_pressed = true;
                }
            }
        }
    }

    /// Input for the next tick. Clears the one-shot start request.
    pub fn sample(&mut self) -> TickInput {
        let input = TickInput {
            left: self.left,
            right: self.right,
            fire: self.fire,
            start: self.start_pressed,
        };
        self.start_pressed = false;
        input
    }

    /// Release everything (focus lost)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}
