use bevy::prelude::*;

use crate::config::tuning::Tuning;
use crate::game::components::*;
use crate::game::maneuver::MovementState;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GamePhase::Gameplay), setup_ui);
        app.add_systems(
            Update,
            (update_stamina_bar, update_state_display).run_if(in_state(GamePhase::Gameplay)),
        );
    }
}

#[derive(Component)]
struct StaminaBarFill;

#[derive(Component)]
struct StateText;

/// Bar width for a stamina fraction, clamped to the frame.
pub fn stamina_bar_width(fraction: f32, max_width: f32) -> f32 {
    fraction.clamp(0.0, 1.0) * max_width
}

fn setup_ui(mut commands: Commands, tuning: Res<Tuning>) {
    commands
        .spawn((
            InGame,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(tuning.stamina_bar_width_px),
                        height: Val::Px(tuning.stamina_bar_height_px),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.8)),
                ))
                .with_children(|frame| {
                    frame.spawn((
                        StaminaBarFill,
                        Node {
                            width: Val::Px(tuning.stamina_bar_width_px),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.3, 0.9, 0.4)),
                    ));
                });

            parent.spawn((
                StateText,
                Text::new("Arrows to move, Space to strike, X to backstep"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.2)),
            ));
        });
}

fn update_stamina_bar(
    tuning: Res<Tuning>,
    player: Query<&PlayerControl, With<Player>>,
    mut fills: Query<&mut Node, With<StaminaBarFill>>,
) {
    let Some(control) = player.iter().next() else { return };
    let width = stamina_bar_width(control.0.stamina_fraction(), tuning.stamina_bar_width_px);
    for mut node in &mut fills {
        node.width = Val::Px(width);
    }
}

fn update_state_display(
    player: Query<&PlayerControl, (With<Player>, Changed<PlayerControl>)>,
    mut text_query: Query<&mut Text, With<StateText>>,
) {
    let Some(control) = player.iter().next() else { return };
    let state_str = match control.0.state() {
        MovementState::Normal => "Arrows to move, Space to strike, X to backstep",
        MovementState::Strike => "Strike!",
        MovementState::Backstep => "Backstep!",
        MovementState::Damaged => "Hit!",
    };
    for mut text in &mut text_query {
        if text.0 != state_str {
            **text = state_str.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_width_is_proportional_and_clamped() {
        assert_eq!(stamina_bar_width(0.5, 160.0), 80.0);
        assert_eq!(stamina_bar_width(1.0, 160.0), 160.0);
        assert_eq!(stamina_bar_width(0.0, 160.0), 0.0);
        assert_eq!(stamina_bar_width(1.7, 160.0), 160.0);
    }
}
