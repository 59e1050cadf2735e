use bevy::prelude::*;

use super::controller::PlayerController;
use super::maneuver::MovementState;

// ── Marker components ───────────────────────────────────────────────

#[derive(Component)]
pub struct Player;

/// Marker: tag all gameplay entities for cleanup when leaving the Gameplay phase.
#[derive(Component)]
pub struct InGame;

/// Marker for the child mesh that shows which way the player faces.
#[derive(Component)]
pub struct FacingVisual;

// ── Game phase state ────────────────────────────────────────────────

#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Preload,
    Gameplay,
}

// ── Player runtime state ────────────────────────────────────────────

#[derive(Component)]
pub struct Velocity(pub Vec2);

#[derive(Component)]
pub struct PlayerControl(pub PlayerController);

/// Pre-built material per movement state, swapped onto the player body.
#[derive(Resource)]
pub struct StateTints {
    pub normal: Handle<ColorMaterial>,
    pub strike: Handle<ColorMaterial>,
    pub backstep: Handle<ColorMaterial>,
    pub damaged: Handle<ColorMaterial>,
}

impl StateTints {
    pub fn color_for(state: MovementState) -> Color {
        match state {
            MovementState::Normal => Color::srgb(0.85, 0.85, 0.85),
            MovementState::Strike => Color::srgb(1.0, 0.6, 0.15),
            MovementState::Backstep => Color::srgb(0.3, 0.6, 1.0),
            MovementState::Damaged => Color::srgb(0.9, 0.15, 0.15),
        }
    }

    pub fn handle_for(&self, state: MovementState) -> &Handle<ColorMaterial> {
        match state {
            MovementState::Normal => &self.normal,
            MovementState::Strike => &self.strike,
            MovementState::Backstep => &self.backstep,
            MovementState::Damaged => &self.damaged,
        }
    }
}
