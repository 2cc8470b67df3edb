//! # Input State
//!
//! This module defines the input state types used by the input manager.
//! Inputs are abstract actions rather than physical keys; binding keys to
//! actions is left to the host application.

use std::collections::HashMap;

/// The abstract actions the engine responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Walk forward
    Forward,
    /// Walk backward
    Backward,
    /// Strafe left
    Left,
    /// Strafe right
    Right,
    /// Jump; ascend while flying; double-tap toggles creative flight
    Jump,
    /// Sneak; descend while flying
    Sneak,
    /// Sprint
    Sprint,
    /// Mine the targeted block
    Attack,
    /// Place a block against the targeted face
    Place,
}

impl InputAction {
    /// Every action, in declaration order.
    pub const ALL: [InputAction; 9] = [
        InputAction::Forward,
        InputAction::Backward,
        InputAction::Left,
        InputAction::Right,
        InputAction::Jump,
        InputAction::Sneak,
        InputAction::Sprint,
        InputAction::Attack,
        InputAction::Place,
    ];
}

/// Represents the state of a key or button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawInputState {
    /// Key/button is not pressed
    #[default]
    NotPressed,
    /// Key/button was just pressed this frame
    Pressed,
    /// Key/button has been held down for multiple frames
    Held,
    /// Key/button was just released this frame
    Released,
}

impl RawInputState {
    /// Determines if the input is actively down (either pressed or held)
    pub fn is_active(&self) -> bool {
        matches!(self, RawInputState::Pressed | RawInputState::Held)
    }

    /// Determines if the input was just pressed this frame
    pub fn is_just_pressed(&self) -> bool {
        matches!(self, RawInputState::Pressed)
    }

    /// Determines if the input was just released this frame
    pub fn is_just_released(&self) -> bool {
        matches!(self, RawInputState::Released)
    }

    /// Derives the transition from the previous and current raw states
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => RawInputState::Pressed,
            (true, true) => RawInputState::Held,
            (true, false) => RawInputState::Released,
            (false, false) => RawInputState::NotPressed,
        }
    }
}

/// A snapshot of the processed input states with state transitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedInputState {
    /// Current state of every tracked action
    pub action_states: HashMap<InputAction, RawInputState>,

    /// Mouse movement delta since the last frame (x, y)
    pub mouse_delta: Option<(f64, f64)>,
}

impl ProcessedInputState {
    /// Gets the state of an action
    pub fn get_action_state(&self, action: InputAction) -> RawInputState {
        self.action_states.get(&action).copied().unwrap_or_default()
    }

    /// Gets the mouse movement delta since the last frame
    pub fn get_mouse_delta(&self) -> Option<(f64, f64)> {
        self.mouse_delta
    }

    /// Builds a state where the given actions are held and every other action is idle.
    pub fn holding(actions: &[InputAction]) -> Self {
        let action_states = actions
            .iter()
            .map(|action| (*action, RawInputState::Held))
            .collect();
        ProcessedInputState {
            action_states,
            mouse_delta: None,
        }
    }

    /// Sets the state of one action.
    pub fn with_action(mut self, action: InputAction, state: RawInputState) -> Self {
        self.action_states.insert(action, state);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        assert_eq!(RawInputState::from_raw_states(false, true), RawInputState::Pressed);
        assert_eq!(RawInputState::from_raw_states(true, true), RawInputState::Held);
        assert_eq!(RawInputState::from_raw_states(true, false), RawInputState::Released);
        assert_eq!(RawInputState::from_raw_states(false, false), RawInputState::NotPressed);

        assert!(RawInputState::Pressed.is_active() && RawInputState::Pressed.is_just_pressed());
        assert!(RawInputState::Held.is_active() && !RawInputState::Held.is_just_pressed());
        assert!(!RawInputState::Released.is_active() && RawInputState::Released.is_just_released());
    }

    #[test]
    fn test_untracked_action_is_not_pressed() {
        let input = ProcessedInputState::holding(&[InputAction::Forward]);
        assert_eq!(input.get_action_state(InputAction::Forward), RawInputState::Held);
        assert_eq!(input.get_action_state(InputAction::Jump), RawInputState::NotPressed);

        let input = input.with_action(InputAction::Jump, RawInputState::Pressed);
        assert!(input.get_action_state(InputAction::Jump).is_just_pressed());
    }
}
