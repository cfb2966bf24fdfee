//! Keyboard and gamepad aggregation
//!
//! Every device contributes to the same [`TickInput`]: a direction is held if
//! the keyboard or any connected gamepad holds it. Gamepad fire is edge
//! triggered (a button going down this frame); keyboard fire is level
//! triggered and rate-limited by the player's cooldown.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Held keys this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Space bar
    pub fire: bool,
}

/// Raw state of one connected gamepad
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GamepadState {
    pub id: u32,
    /// Axis values in `-1.0..=1.0`; axis 0 is horizontal, axis 1 vertical
    pub axes: Vec<f32>,
    /// Buttons currently held
    pub pressed: Vec<u32>,
}

impl GamepadState {
    fn axis(&self, index: usize) -> f32 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }
}

/// Everything polled from the devices in one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub keyboard: KeyboardState,
    pub gamepads: Vec<GamepadState>,
}

/// Tracks connected gamepads across frames
#[derive(Debug, Clone, Default)]
pub struct Gamepads {
    /// Buttons held last frame, per connected pad
    held: BTreeMap<u32, Vec<u32>>,
}

impl Gamepads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a frame's snapshot into simulation input.
    ///
    /// `threshold` is the stick deflection that counts as a held direction.
    pub fn aggregate(&mut self, snapshot: &InputSnapshot, threshold: f32) -> TickInput {
        let threshold = threshold.abs().max(f32::EPSILON);
        let kb = snapshot.keyboard;
        let mut input = TickInput {
            up: kb.up,
            down: kb.down,
            left: kb.left,
            right: kb.right,
            fire: kb.fire,
        };

        self.held.retain(|id, _| {
            let still_here = snapshot.gamepads.iter().any(|pad| pad.id == *id);
            if !still_here {
                log::info!("gamepad disconnected: id {}", id);
            }
            still_here
        });

        for pad in &snapshot.gamepads {
            let previous = self.held.entry(pad.id).or_insert_with(|| {
                log::info!("gamepad connected: id {}", pad.id);
                Vec::new()
            });

            let h = pad.axis(0);
            let v = pad.axis(1);
            input.right |= h >= threshold;
            input.left |= h <= -threshold;
            input.down |= v >= threshold;
            input.up |= v <= -threshold;

            if pad.pressed.iter().any(|b| !previous.contains(b)) {
                input.fire = true;
            }
            previous.clone_from(&pad.pressed);
        }

        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad(id: u32, axes: &[f32], pressed: &[u32]) -> GamepadState {
        GamepadState {
            id,
            axes: axes.to_vec(),
            pressed: pressed.to_vec(),
        }
    }

    #[test]
    fn test_keyboard_only() {
        let mut pads = Gamepads::new();
        let snapshot = InputSnapshot {
            keyboard: KeyboardState {
                left: true,
                fire: true,
                ..Default::default()
            },
            gamepads: Vec::new(),
        };
        let input = pads.aggregate(&snapshot, 1.0);
        assert!(input.left && input.fire);
        assert!(!input.right && !input.up && !input.down);
    }

    #[test]
    fn test_full_deflection_maps_to_directions() {
        let mut pads = Gamepads::new();
        let snapshot = InputSnapshot {
            gamepads: vec![pad(0, &[1.0, -1.0], &[])],
            ..Default::default()
        };
        let input = pads.aggregate(&snapshot, 1.0);
        assert!(input.right && input.up);
        assert!(!input.left && !input.down);
    }

    #[test]
    fn test_partial_deflection_respects_threshold() {
        let mut pads = Gamepads::new();
        let snapshot = InputSnapshot {
            gamepads: vec![pad(0, &[0.6, 0.0], &[])],
            ..Default::default()
        };
        assert!(!pads.aggregate(&snapshot, 1.0).right);
        assert!(pads.aggregate(&snapshot, 0.5).right);
    }

    #[test]
    fn test_button_fires_only_on_press() {
        let mut pads = Gamepads::new();
        let down = InputSnapshot {
            gamepads: vec![pad(3, &[], &[0])],
            ..Default::default()
        };
        assert!(pads.aggregate(&down, 1.0).fire);
        // Still held: not newly pressed
        assert!(!pads.aggregate(&down, 1.0).fire);

        let released = InputSnapshot {
            gamepads: vec![pad(3, &[], &[])],
            ..Default::default()
        };
        assert!(!pads.aggregate(&released, 1.0).fire);
        assert!(pads.aggregate(&down, 1.0).fire);
    }

    #[test]
    fn test_devices_are_ored() {
        let mut pads = Gamepads::new();
        let snapshot = InputSnapshot {
            keyboard: KeyboardState {
                up: true,
                ..Default::default()
            },
            gamepads: vec![pad(0, &[-1.0, 0.0], &[]), pad(1, &[0.0, 1.0], &[])],
        };
        let input = pads.aggregate(&snapshot, 1.0);
        assert!(input.up && input.left && input.down);
        assert_eq!(pads.held.len(), 2);
    }

    #[test]
    fn test_disconnect_forgets_pad() {
        let mut pads = Gamepads::new();
        let snapshot = InputSnapshot {
            gamepads: vec![pad(7, &[], &[1])],
            ..Default::default()
        };
        pads.aggregate(&snapshot, 1.0);
        pads.aggregate(&InputSnapshot::default(), 1.0);
        assert_eq!(pads.held.len(), 0);
        // Reconnecting with the button held counts as a fresh press
        assert!(pads.aggregate(&snapshot, 1.0).fire);
    }
}
