use bevy::prelude::*;

use super::components::*;
use super::controller::ControllerParams;
use super::intent::Intent;
use crate::config::tuning::Tuning;

/// ControlSet: advance each player controller one fixed step.
///
/// Elapsed time comes from the clock driving the schedule (`Time<Fixed>`
/// inside FixedUpdate), never from tuning.
pub fn step_player_controllers(
    time: Res<Time>,
    mut query: Query<
        (&mut PlayerControl, &mut Intent, &mut Velocity, &mut Transform),
        With<Player>,
    >,
) {
    let elapsed_ms = time.delta_secs() * 1000.0;
    for (mut control, mut intent, mut vel, mut transform) in &mut query {
        let input = intent.consume();
        let out = control.0.update(&input, elapsed_ms);
        vel.0 = out.velocity;
        transform.rotation = Quat::from_rotation_z(out.facing);
    }
}

/// PhysicsSet: integrate velocity → position.
pub fn integrate_velocity(time: Res<Time>, mut query: Query<(&mut Transform, &Velocity)>) {
    let dt = time.delta_secs();
    for (mut transform, vel) in &mut query {
        transform.translation.x += vel.0.x * dt;
        transform.translation.y += vel.0.y * dt;
    }
}

/// Keep controller constants and the fixed timestep in sync with
/// hot-reloaded tuning.
pub fn apply_tuning_to_controllers(
    tuning: Res<Tuning>,
    fixed: Option<ResMut<Time<Fixed>>>,
    mut query: Query<&mut PlayerControl>,
) {
    if !tuning.is_changed() {
        return;
    }
    if let Some(mut fixed) = fixed {
        if (fixed.timestep().as_secs_f64() - tuning.dt as f64).abs() > 1e-9 {
            fixed.set_timestep_seconds(tuning.dt as f64);
            info!("Fixed timestep set to {:.4} s", tuning.dt);
        }
    }
    let params = ControllerParams::from_tuning(&tuning);
    for mut control in &mut query {
        if *control.0.params() != params {
            control.0.set_params(params);
        }
    }
}
