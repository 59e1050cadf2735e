use serde::{Deserialize, Serialize};

use super::decay::EasingKind;

/// Which movement rules are in force. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MovementState {
    #[default]
    Normal,
    Strike,
    Backstep,
    /// Reserved for hit reactions; nothing enters or leaves it yet.
    Damaged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManeuverKind {
    Strike,
    Backstep,
}

impl ManeuverKind {
    pub fn state(self) -> MovementState {
        match self {
            Self::Strike => MovementState::Strike,
            Self::Backstep => MovementState::Backstep,
        }
    }
}

/// Timing and cost of one maneuver.
///
/// `peak_speed` is applied along the facing direction, so a negative value
/// moves the player backwards. The peak is held for `active_ms`, then eased
/// back to the move speed over `decay_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManeuverSpec {
    pub cost: f32,
    pub peak_speed: f32,
    pub active_ms: f32,
    pub decay_ms: f32,
    pub easing: EasingKind,
}

impl ManeuverSpec {
    pub fn total_ms(&self) -> f32 {
        self.active_ms + self.decay_ms
    }
}

/// Per-kind maneuver table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManeuverTable {
    pub strike: ManeuverSpec,
    pub backstep: ManeuverSpec,
}

impl ManeuverTable {
    pub fn get(&self, kind: ManeuverKind) -> &ManeuverSpec {
        match kind {
            ManeuverKind::Strike => &self.strike,
            ManeuverKind::Backstep => &self.backstep,
        }
    }
}
