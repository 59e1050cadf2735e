//! Engine-agnostic player movement: input direction, burst on starting to
//! move, stamina-gated maneuvers, facing and velocity.
//!
//! [`PlayerController::update`] is called once per simulation step with the
//! polled input and the elapsed milliseconds. Within a step the order is:
//! advance the active speed decay, read direction, handle maneuver edges,
//! check for a burst, blend facing, emit velocity, regenerate stamina.
//!
//! Directions use y-up world coordinates.

use bevy::prelude::*;

use super::angle::angle_lerp;
use super::decay::{DecayStatus, EasingKind, SpeedDecay};
use super::maneuver::{ManeuverKind, ManeuverTable, MovementState};
use super::types::Stamina;
use crate::config::tuning::Tuning;

/// Constants the controller runs on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerParams {
    pub move_speed: f32,
    pub burst_speed: f32,
    pub burst_decay_ms: f32,
    pub turn_blend: f32,
    pub epsilon: f32,
    pub initial_stamina: f32,
    pub stamina_regen_per_ms: f32,
    pub maneuvers: ManeuverTable,
}

impl ControllerParams {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            move_speed: tuning.move_speed,
            burst_speed: tuning.burst_speed,
            burst_decay_ms: tuning.burst_decay_ms,
            turn_blend: tuning.turn_blend,
            epsilon: tuning.epsilon,
            initial_stamina: tuning.initial_stamina,
            stamina_regen_per_ms: tuning.stamina_regen_per_ms,
            maneuvers: ManeuverTable {
                strike: tuning.strike,
                backstep: tuning.backstep,
            },
        }
    }
}

impl Default for ControllerParams {
    fn default() -> Self {
        Self::from_tuning(&Tuning::default())
    }
}

/// Input polled for one step. Direction keys are held state; `strike` and
/// `backstep` are press edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub strike: bool,
    pub backstep: bool,
}

impl ControlInput {
    /// Raw direction with components in {-1, 0, 1}. Right beats left and
    /// down beats up when both are held.
    pub fn raw_direction(&self) -> Vec2 {
        let x = if self.right {
            1.0
        } else if self.left {
            -1.0
        } else {
            0.0
        };
        let y = if self.down {
            -1.0
        } else if self.up {
            1.0
        } else {
            0.0
        };
        Vec2::new(x, y)
    }
}

/// Everything the outside world reads after a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerOutput {
    pub velocity: Vec2,
    pub facing: f32,
    pub state: MovementState,
    pub stamina: f32,
}

/// What a running speed decay belongs to, and so what happens when it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecayOwner {
    Burst,
    Maneuver(ManeuverKind),
}

#[derive(Debug, Clone)]
struct ActiveDecay {
    owner: DecayOwner,
    decay: SpeedDecay,
}

#[derive(Debug, Clone)]
pub struct PlayerController {
    params: ControllerParams,
    state: MovementState,
    prev_direction: Vec2,
    direction: Vec2,
    speed: f32,
    stamina: Stamina,
    facing: f32,
    velocity: Vec2,
    /// The only writer of `speed` besides maneuver activation.
    decay: Option<ActiveDecay>,
}

impl PlayerController {
    pub fn new(params: ControllerParams) -> Self {
        Self {
            state: MovementState::Normal,
            prev_direction: Vec2::ZERO,
            direction: Vec2::ZERO,
            speed: params.move_speed,
            stamina: Stamina::new(params.initial_stamina),
            facing: 0.0,
            velocity: Vec2::ZERO,
            decay: None,
            params,
        }
    }

    /// Swap constants without touching live state. A decay already in
    /// flight still lands on the speed it was started with.
    pub fn set_params(&mut self, params: ControllerParams) {
        self.params = params;
        if self.decay.is_none() {
            self.speed = params.move_speed;
        }
    }

    pub fn params(&self) -> &ControllerParams {
        &self.params
    }

    pub fn state(&self) -> MovementState {
        self.state
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn stamina_fraction(&self) -> f32 {
        self.stamina.fraction()
    }

    pub fn is_bursting(&self) -> bool {
        matches!(
            &self.decay,
            Some(active) if active.owner == DecayOwner::Burst && active.decay.is_active()
        )
    }

    pub fn update(&mut self, input: &ControlInput, elapsed_ms: f32) -> ControllerOutput {
        let elapsed_ms = elapsed_ms.max(0.0);

        self.tick_decay(elapsed_ms);
        self.update_direction(input);

        if input.strike {
            self.activate_maneuver(ManeuverKind::Strike);
        }
        if input.backstep {
            self.activate_maneuver(ManeuverKind::Backstep);
        }

        self.update_burst();
        self.update_facing();
        self.velocity = self.direction * self.speed;
        self.stamina = self
            .stamina
            .regen(self.params.stamina_regen_per_ms * elapsed_ms);

        self.output()
    }

    pub fn output(&self) -> ControllerOutput {
        ControllerOutput {
            velocity: self.velocity,
            facing: self.facing,
            state: self.state,
            stamina: self.stamina.fraction(),
        }
    }

    /// Start a maneuver along the current facing. Returns false (and changes
    /// nothing) if another maneuver is running or stamina is short.
    pub fn activate_maneuver(&mut self, kind: ManeuverKind) -> bool {
        if self.state != MovementState::Normal {
            debug!("{kind:?} ignored while {:?}", self.state);
            return false;
        }

        let spec = *self.params.maneuvers.get(kind);
        if !self.stamina.try_spend(spec.cost) {
            debug!(
                "{kind:?} ignored: stamina {:.2} < cost {:.2}",
                self.stamina.fraction(),
                spec.cost
            );
            return false;
        }

        self.state = kind.state();
        self.speed = spec.peak_speed;
        self.prev_direction = self.direction;
        self.direction = Vec2::from_angle(self.facing);
        self.replace_decay(
            DecayOwner::Maneuver(kind),
            SpeedDecay::start(
                spec.peak_speed,
                self.params.move_speed,
                spec.decay_ms,
                spec.active_ms,
                spec.easing,
            ),
        );

        debug!(
            "{kind:?} started: speed {:.1} for {:.0} ms, stamina left {:.2}",
            self.speed,
            spec.total_ms(),
            self.stamina.fraction()
        );
        true
    }

    fn replace_decay(&mut self, owner: DecayOwner, decay: SpeedDecay) {
        if let Some(mut old) = self.decay.take() {
            old.decay.cancel();
            debug!("{:?} decay cancelled by {owner:?}", old.owner);
        }
        self.decay = Some(ActiveDecay { owner, decay });
    }

    fn tick_decay(&mut self, elapsed_ms: f32) {
        let status = match self.decay.as_mut() {
            Some(active) => active.decay.tick(elapsed_ms, &mut self.speed),
            None => return,
        };
        if status != DecayStatus::Completed {
            return;
        }
        if let Some(finished) = self.decay.take() {
            match finished.owner {
                DecayOwner::Burst => debug!("burst finished"),
                DecayOwner::Maneuver(kind) => {
                    self.state = MovementState::Normal;
                    debug!("{kind:?} finished");
                }
            }
        }
    }

    fn update_direction(&mut self, input: &ControlInput) {
        // Maneuvers keep the direction they were started with.
        if self.state != MovementState::Normal {
            return;
        }
        self.prev_direction = self.direction;
        self.direction = input.raw_direction().normalize_or_zero();
    }

    fn update_burst(&mut self) {
        let prev_sq = self.prev_direction.length_squared();
        let cur_sq = self.direction.length_squared();

        if self.state == MovementState::Normal
            && prev_sq <= self.params.epsilon
            && cur_sq > prev_sq
            && !self.is_bursting()
        {
            self.speed = self.params.burst_speed;
            self.replace_decay(
                DecayOwner::Burst,
                SpeedDecay::start(
                    self.params.burst_speed,
                    self.params.move_speed,
                    self.params.burst_decay_ms,
                    0.0,
                    EasingKind::CubicOut,
                ),
            );
            debug!("burst started");
        }
    }

    fn update_facing(&mut self) {
        if self.direction.length_squared() > self.params.epsilon {
            let target = self.direction.y.atan2(self.direction.x);
            self.facing = angle_lerp(self.facing, target, self.params.turn_blend);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const IDLE: ControlInput = ControlInput {
        up: false,
        down: false,
        left: false,
        right: false,
        strike: false,
        backstep: false,
    };

    const RIGHT: ControlInput = ControlInput {
        right: true,
        ..IDLE
    };

    fn controller_with_stamina(stamina: f32) -> PlayerController {
        PlayerController::new(ControllerParams {
            initial_stamina: stamina,
            ..ControllerParams::default()
        })
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn direction_is_normalized_and_zero_safe() {
        let diagonal = ControlInput {
            up: true,
            left: true,
            ..IDLE
        };
        let dir = diagonal.raw_direction().normalize_or_zero();
        assert!(approx(dir.length(), 1.0));
        assert_eq!(IDLE.raw_direction().normalize_or_zero(), Vec2::ZERO);

        let mut c = PlayerController::new(ControllerParams::default());
        c.update(&IDLE, 16.0);
        assert_eq!(c.direction(), Vec2::ZERO);
        assert!(c.velocity().is_finite());
    }

    #[test]
    fn opposing_keys_resolve_to_right_and_down() {
        let all = ControlInput {
            up: true,
            down: true,
            left: true,
            right: true,
            ..IDLE
        };
        assert_eq!(all.raw_direction(), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn idle_does_not_burst_and_regenerates() {
        let mut c = controller_with_stamina(0.2);
        for _ in 0..10 {
            c.update(&IDLE, 10.0);
        }
        assert!(!c.is_bursting());
        assert_eq!(c.speed(), c.params().move_speed);
        assert!(approx(c.stamina_fraction(), 0.2 + 0.0004 * 100.0));
    }

    #[test]
    fn burst_on_rest_to_motion_then_eases_back() {
        let mut c = PlayerController::new(ControllerParams::default());
        c.update(&IDLE, 100.0);

        let out = c.update(&RIGHT, 10.0);
        assert!(c.is_bursting());
        assert_eq!(c.speed(), 270.0);
        assert_eq!(out.velocity, Vec2::new(270.0, 0.0));

        let mut last = c.speed();
        let mut elapsed = 0.0;
        while c.is_bursting() {
            c.update(&RIGHT, 10.0);
            elapsed += 10.0;
            assert!(c.speed() <= last);
            last = c.speed();
            assert!(elapsed <= 230.0);
        }
        assert_eq!(elapsed, 230.0);
        assert_eq!(c.speed(), 210.0);
        assert_eq!(c.velocity(), Vec2::new(210.0, 0.0));
    }

    #[test]
    fn continuous_motion_never_retriggers_burst() {
        let mut c = PlayerController::new(ControllerParams::default());
        c.update(&RIGHT, 10.0);
        assert!(c.is_bursting());
        for _ in 0..30 {
            c.update(&RIGHT, 10.0);
        }
        assert!(!c.is_bursting());

        // Changing direction without stopping is not a rest→motion edge.
        let up = ControlInput { up: true, ..IDLE };
        c.update(&up, 10.0);
        assert!(!c.is_bursting());
        assert_eq!(c.speed(), 210.0);
    }

    #[test]
    fn burst_is_not_restarted_while_active() {
        let mut c = PlayerController::new(ControllerParams::default());
        c.update(&RIGHT, 10.0);
        c.update(&IDLE, 10.0);
        let before = c.speed();
        // Rest then motion again while the first burst is still decaying.
        c.update(&RIGHT, 10.0);
        assert!(c.speed() < before);
        assert!(c.speed() < 270.0);
    }

    #[test]
    fn maneuver_rejected_without_stamina() {
        let mut c = controller_with_stamina(0.20);
        assert!(!c.activate_maneuver(ManeuverKind::Strike));
        assert_eq!(c.state(), MovementState::Normal);
        assert_eq!(c.stamina_fraction(), 0.20);
        assert_eq!(c.speed(), 210.0);
    }

    #[test]
    fn strike_runs_to_completion() {
        let mut c = controller_with_stamina(0.50);
        assert!(c.activate_maneuver(ManeuverKind::Strike));
        assert!(approx(c.stamina_fraction(), 0.15));
        assert_eq!(c.state(), MovementState::Strike);
        assert_eq!(c.speed(), 600.0);

        let total = c.params().maneuvers.strike.total_ms();
        let steps = (total / 10.0) as usize;
        for _ in 0..steps - 1 {
            c.update(&IDLE, 10.0);
            assert_eq!(c.state(), MovementState::Strike);
        }
        c.update(&IDLE, 10.0);
        assert_eq!(c.state(), MovementState::Normal);
        assert_eq!(c.speed(), 210.0);
    }

    #[test]
    fn maneuver_moves_along_facing_and_ignores_input() {
        let mut c = PlayerController::new(ControllerParams::default());
        let out = c.update(
            &ControlInput {
                backstep: true,
                ..IDLE
            },
            10.0,
        );
        assert_eq!(out.state, MovementState::Backstep);
        // Facing starts at 0 (+x); a backstep moves the other way.
        assert!(approx(out.velocity.x, -420.0));
        assert!(approx(out.velocity.y, 0.0));

        let out = c.update(&ControlInput { up: true, ..IDLE }, 10.0);
        assert!(approx(out.velocity.x, -420.0));
        assert!(approx(out.velocity.y, 0.0));
    }

    #[test]
    fn second_maneuver_rejected_while_active() {
        let mut c = PlayerController::new(ControllerParams::default());
        assert!(c.activate_maneuver(ManeuverKind::Strike));
        let stamina = c.stamina_fraction();
        assert!(!c.activate_maneuver(ManeuverKind::Backstep));
        assert_eq!(c.state(), MovementState::Strike);
        assert_eq!(c.stamina_fraction(), stamina);
    }

    #[test]
    fn maneuver_cancels_burst() {
        let mut c = PlayerController::new(ControllerParams::default());
        c.update(&RIGHT, 10.0);
        assert!(c.is_bursting());

        c.update(
            &ControlInput {
                strike: true,
                ..RIGHT
            },
            10.0,
        );
        assert!(!c.is_bursting());
        assert_eq!(c.state(), MovementState::Strike);

        // Hold phase: nothing from the old burst touches speed.
        for _ in 0..10 {
            c.update(&RIGHT, 10.0);
            assert_eq!(c.speed(), 600.0);
            assert!(!c.is_bursting());
        }
    }

    #[test]
    fn no_burst_when_maneuver_ends() {
        let mut c = PlayerController::new(ControllerParams::default());
        c.activate_maneuver(ManeuverKind::Strike);
        for _ in 0..40 {
            c.update(&RIGHT, 10.0);
        }
        assert_eq!(c.state(), MovementState::Normal);
        assert!(!c.is_bursting());
        assert_eq!(c.speed(), 210.0);
    }

    #[test]
    fn stamina_regenerates_mid_maneuver_and_saturates() {
        let mut c = controller_with_stamina(0.5);
        c.activate_maneuver(ManeuverKind::Backstep);
        let after_cost = c.stamina_fraction();
        c.update(&IDLE, 10.0);
        assert!(c.stamina_fraction() > after_cost);

        let mut last = c.stamina_fraction();
        for _ in 0..10_000 {
            c.update(&IDLE, 16.0);
            assert!(c.stamina_fraction() >= last);
            last = c.stamina_fraction();
        }
        assert_eq!(c.stamina_fraction(), 1.0);
    }

    #[test]
    fn facing_blends_toward_direction() {
        let mut c = PlayerController::new(ControllerParams::default());
        let left = ControlInput { left: true, ..IDLE };
        let first = c.update(&left, 10.0).facing;
        assert!(first.abs() > 0.0);
        assert!(first.abs() < PI);

        for _ in 0..200 {
            c.update(&left, 10.0);
        }
        assert!((c.facing().abs() - PI).abs() < 1e-3);

        // Releasing input keeps the last facing.
        let held = c.facing();
        c.update(&IDLE, 10.0);
        assert_eq!(c.facing(), held);
    }

    #[test]
    fn set_params_keeps_live_state() {
        let mut c = controller_with_stamina(0.6);
        c.update(&IDLE, 10.0);
        let stamina = c.stamina_fraction();
        c.set_params(ControllerParams {
            move_speed: 100.0,
            ..ControllerParams::default()
        });
        assert_eq!(c.stamina_fraction(), stamina);
        assert_eq!(c.speed(), 100.0);

        // The burst now settles on the new move speed.
        c.update(&RIGHT, 10.0);
        assert!(c.is_bursting());
        for _ in 0..30 {
            c.update(&RIGHT, 10.0);
        }
        assert_eq!(c.speed(), 100.0);
    }
}
