//! Per-tick snapshot of the manual control keys.
//!
//! Input capture (the window event loop, key mapping, gamepads) lives
//! outside this subsystem; the simulation tick only ever sees a flat set of
//! booleans describing which control actions are held during that tick.

/// Boolean key states for one simulation tick.
///
/// Aircraft and drone share one snapshot type: the aircraft reads the axis
/// pairs, the drone reads the movement flags. A default snapshot means
/// "hands off the controls".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Increase throttle (aircraft) / move forward (drone).
    pub forward: bool,
    /// Decrease throttle (aircraft) / move backward (drone).
    pub backward: bool,
    /// Roll left (aircraft) / strafe left (drone).
    pub left: bool,
    /// Roll right (aircraft) / strafe right (drone).
    pub right: bool,
    /// Pitch nose down.
    pub pitch_down: bool,
    /// Pitch nose up.
    pub pitch_up: bool,
    /// Yaw left.
    pub yaw_left: bool,
    /// Yaw right.
    pub yaw_right: bool,
    /// Ascend (drone).
    pub up: bool,
    /// Descend (drone).
    pub down: bool,
    /// Speed boost (drone).
    pub boost: bool,
}

impl InputSnapshot {
    /// A snapshot with no keys held.
    pub fn released() -> Self {
        Self::default()
    }

    /// Whether any control key is held this tick.
    pub fn any_held(&self) -> bool {
        *self != Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_is_hands_off() {
        assert!(!InputSnapshot::released().any_held());
    }

    #[test]
    fn test_any_held_detects_single_key() {
        let snapshot = InputSnapshot {
            yaw_left: true,
            ..Default::default()
        };
        assert!(snapshot.any_held());
    }
}
