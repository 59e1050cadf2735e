use bevy::prelude::*;

use crate::config::tuning::Tuning;
use crate::game::{
    components::*,
    controller::{ControllerParams, PlayerController},
    intent::Intent,
    maneuver::MovementState,
    physics,
};

// ── SystemSets (strict FixedUpdate ordering, gameplay-phase only) ───

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FixedGameSet {
    ControlSet,
    PhysicsSet,
}

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GamePhase>();

        app.configure_sets(
            FixedUpdate,
            (
                FixedGameSet::ControlSet.run_if(in_state(GamePhase::Gameplay)),
                FixedGameSet::PhysicsSet.run_if(in_state(GamePhase::Gameplay)),
            )
                .chain(),
        );

        // ControlSet: direction → velocity/maneuver → stamina, all inside the controller step
        app.add_systems(
            FixedUpdate,
            physics::step_player_controllers.in_set(FixedGameSet::ControlSet),
        );

        // PhysicsSet
        app.add_systems(
            FixedUpdate,
            physics::integrate_velocity.in_set(FixedGameSet::PhysicsSet),
        );

        // ── Preload ─────────────────────────────────────────────────────
        app.add_systems(OnEnter(GamePhase::Preload), setup_preload);
        app.add_systems(Update, finish_preload.run_if(in_state(GamePhase::Preload)));

        // ── Gameplay ────────────────────────────────────────────────────
        app.add_systems(OnEnter(GamePhase::Gameplay), spawn_player);
        app.add_systems(OnExit(GamePhase::Gameplay), despawn_gameplay);
        app.add_systems(
            Update,
            (read_player_input, apply_state_tint).run_if(in_state(GamePhase::Gameplay)),
        );

        // ── Always-on ───────────────────────────────────────────────────
        app.add_systems(
            Update,
            (tuning_reload_input, physics::apply_tuning_to_controllers).chain(),
        );
    }
}

// ── Preload ─────────────────────────────────────────────────────────

fn setup_preload(mut commands: Commands) {
    info!("hello, gameplay!");
    commands.spawn(Camera2d);
}

/// Nothing to stream in yet, so move straight on.
fn finish_preload(mut next_state: ResMut<NextState<GamePhase>>) {
    info!("Preload done, entering Gameplay");
    next_state.set(GamePhase::Gameplay);
}

// ── Gameplay ────────────────────────────────────────────────────────

fn spawn_player(
    mut commands: Commands,
    tuning: Res<Tuning>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let tints = StateTints {
        normal: materials.add(StateTints::color_for(MovementState::Normal)),
        strike: materials.add(StateTints::color_for(MovementState::Strike)),
        backstep: materials.add(StateTints::color_for(MovementState::Backstep)),
        damaged: materials.add(StateTints::color_for(MovementState::Damaged)),
    };

    let radius = tuning.player_radius_px;
    let body_mesh = meshes.add(Circle::new(radius));
    let nose_len = radius * 0.75;
    let nose_mesh = meshes.add(Rectangle::new(nose_len, radius * 0.3));
    let spawn = tuning.spawn_world();

    commands
        .spawn((
            Player,
            InGame,
            Mesh2d(body_mesh),
            MeshMaterial2d(tints.normal.clone()),
            Transform::from_translation(spawn.extend(0.0)),
            Velocity(Vec2::ZERO),
            Intent::default(),
            PlayerControl(PlayerController::new(ControllerParams::from_tuning(&tuning))),
        ))
        .with_children(|parent| {
            parent.spawn((
                FacingVisual,
                Mesh2d(nose_mesh),
                MeshMaterial2d(materials.add(Color::srgb(0.1, 0.1, 0.12))),
                Transform::from_translation(Vec3::new(radius - nose_len * 0.5, 0.0, 0.5)),
            ));
        });

    commands.insert_resource(tints);
    info!("Player spawned at ({:.0}, {:.0})", spawn.x, spawn.y);
}

fn despawn_gameplay(mut commands: Commands, query: Query<Entity, With<InGame>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<StateTints>();
}

/// Arrows move, Space strikes, X backsteps.
fn read_player_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut query: Query<&mut Intent, With<Player>>,
) {
    for mut intent in &mut query {
        intent.set_held(
            keyboard.pressed(KeyCode::ArrowUp),
            keyboard.pressed(KeyCode::ArrowDown),
            keyboard.pressed(KeyCode::ArrowLeft),
            keyboard.pressed(KeyCode::ArrowRight),
        );
        if keyboard.just_pressed(KeyCode::Space) {
            intent.press_strike();
        }
        if keyboard.just_pressed(KeyCode::KeyX) {
            intent.press_backstep();
        }
    }
}

fn apply_state_tint(
    tints: Option<Res<StateTints>>,
    mut query: Query<(&PlayerControl, &mut MeshMaterial2d<ColorMaterial>), With<Player>>,
) {
    let Some(tints) = tints else { return };
    for (control, mut material) in &mut query {
        let wanted = tints.handle_for(control.0.state());
        if material.0 != *wanted {
            material.0 = wanted.clone();
        }
    }
}

// ── Always-on ───────────────────────────────────────────────────────

/// Reload tuning with F5.
fn tuning_reload_input(keyboard: Res<ButtonInput<KeyCode>>, mut tuning: ResMut<Tuning>) {
    if keyboard.just_pressed(KeyCode::F5) {
        tuning.reload();
    }
}
