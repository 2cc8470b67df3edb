//! # Input Manager
//!
//! This module tracks the up/down state of every abstract action between frames
//! and turns it into the press/hold/release transitions the engine consumes.

use std::collections::HashMap;

use super::input_state::{InputAction, ProcessedInputState, RawInputState};

/// Manages the state of all input actions.
#[derive(Debug, Clone)]
pub struct InputManager {
    /// Previous state of all tracked actions
    pub action_inputs_old: HashMap<InputAction, bool>,
    /// Current state of all tracked actions
    pub action_inputs_new: HashMap<InputAction, bool>,

    /// Accumulated mouse movement since the last frame (x, y)
    pub mouse_delta: Option<(f64, f64)>,
}

impl InputManager {
    /// Creates a new InputManager with every action released.
    pub fn new() -> Self {
        let mut action_inputs_old = HashMap::new();
        let mut action_inputs_new = HashMap::new();
        for action in InputAction::ALL {
            action_inputs_old.insert(action, false);
            action_inputs_new.insert(action, false);
        }

        Self {
            action_inputs_old,
            action_inputs_new,
            mouse_delta: None,
        }
    }

    /// Updates the old state with the current state to prepare for the next frame.
    pub fn move_old_states(&mut self) {
        for (action, new_state) in self.action_inputs_new.iter() {
            if let Some(old_state) = self.action_inputs_old.get_mut(action) {
                *old_state = *new_state;
            }
        }
    }

    /// Records whether an action is currently down.
    ///
    /// # Arguments
    /// * `action` - The action whose binding changed
    /// * `pressed` - Whether it is now down
    pub fn intake_action(&mut self, action: InputAction, pressed: bool) {
        if let Some(action_state) = self.action_inputs_new.get_mut(&action) {
            *action_state = pressed;
        }
    }

    /// Adds mouse movement to this frame's delta.
    ///
    /// # Arguments
    /// * `delta` - The (x, y) delta of mouse movement since the last update
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        let (x, y) = self.mouse_delta.unwrap_or((0.0, 0.0));
        self.mouse_delta = Some((x + delta.0, y + delta.1));
    }

    /// Creates a processed input state from the current raw boolean states.
    ///
    /// # Returns
    /// A new `ProcessedInputState` with the transition of every action.
    pub fn create_processed_input_state(&self) -> ProcessedInputState {
        let action_states = self
            .action_inputs_new
            .iter()
            .map(|(action, &new_state)| {
                let old_state = self.action_inputs_old.get(action).copied().unwrap_or(false);
                (*action, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        ProcessedInputState {
            action_states,
            mouse_delta: self.mouse_delta,
        }
    }

    /// Returns the processed input state and resets internal state for the next frame.
    pub fn get_and_reset_processed_input(&mut self) -> ProcessedInputState {
        let processed_input = self.create_processed_input_state();
        self.reset_inputs();
        processed_input
    }

    /// Moves the current states into the old states and clears the mouse delta.
    pub fn reset_inputs(&mut self) {
        self.move_old_states();
        self.mouse_delta = None;
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
