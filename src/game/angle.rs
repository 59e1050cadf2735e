use std::f32::consts::{PI, TAU};

/// Signed shortest distance from `a0` to `a1`, in [-PI, PI].
pub fn short_angle_dist(a0: f32, a1: f32) -> f32 {
    let da = (a1 - a0) % TAU;
    (2.0 * da) % TAU - da
}

/// Wrap an angle into [-PI, PI).
pub fn wrap_angle(a: f32) -> f32 {
    (a + PI).rem_euclid(TAU) - PI
}

/// Move `t` of the way from `a0` towards `a1` along the shorter arc.
pub fn angle_lerp(a0: f32, a1: f32, t: f32) -> f32 {
    wrap_angle(a0 + short_angle_dist(a0, a1) * t)
}
