use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::game::decay::EasingKind;
use crate::game::maneuver::ManeuverSpec;

/// All tunable game parameters, loaded from tuning.ron.
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub dt: f32,
    pub window_width: u32,
    pub window_height: u32,
    /// Spawn point in pixels from the top-left corner of the window.
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub player_radius_px: f32,
    /// Steady-state move speed (pixels per second).
    pub move_speed: f32,
    /// Peak speed of the rest→motion burst.
    pub burst_speed: f32,
    pub burst_decay_ms: f32,
    /// Fraction of the remaining turn applied to the facing angle each step.
    pub turn_blend: f32,
    pub epsilon: f32,
    pub initial_stamina: f32,
    pub stamina_regen_per_ms: f32,
    pub strike: ManeuverSpec,
    pub backstep: ManeuverSpec,
    pub stamina_bar_width_px: f32,
    pub stamina_bar_height_px: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            window_width: 640,
            window_height: 480,
            spawn_x: 100.0,
            spawn_y: 100.0,
            player_radius_px: 16.0,
            move_speed: 210.0,
            burst_speed: 270.0,
            burst_decay_ms: 230.0,
            turn_blend: 0.18,
            epsilon: 1e-4,
            initial_stamina: 1.0,
            stamina_regen_per_ms: 0.0004,
            strike: ManeuverSpec {
                cost: 0.35,
                peak_speed: 600.0,
                active_ms: 120.0,
                decay_ms: 180.0,
                easing: EasingKind::CubicIn,
            },
            backstep: ManeuverSpec {
                cost: 0.25,
                peak_speed: -420.0,
                active_ms: 90.0,
                decay_ms: 160.0,
                easing: EasingKind::CubicIn,
            },
            stamina_bar_width_px: 160.0,
            stamina_bar_height_px: 10.0,
        }
    }
}

/// Why a tuning file was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    Parse(String),
    OutOfRange { field: &'static str, value: f32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::OutOfRange { field, value } => write!(f, "{field} out of range: {value}"),
        }
    }
}

impl std::error::Error for TuningError {}

fn check(field: &'static str, value: f32, ok: bool) -> Result<(), TuningError> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::OutOfRange { field, value })
    }
}

impl Tuning {
    /// Get the data directory for tuning files.
    pub fn data_dir() -> PathBuf {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("burst_step")
    }

    /// Path to the tuning file.
    pub fn file_path() -> PathBuf {
        Self::data_dir().join("tuning.ron")
    }

    /// Parse and validate a RON document.
    pub fn parse(contents: &str) -> Result<Self, TuningError> {
        let tuning: Self =
            ron::from_str(contents).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        check("dt", self.dt, self.dt > 0.0)?;
        check("move_speed", self.move_speed, self.move_speed >= 0.0)?;
        check("burst_speed", self.burst_speed, self.burst_speed >= 0.0)?;
        check("burst_decay_ms", self.burst_decay_ms, self.burst_decay_ms >= 0.0)?;
        check("turn_blend", self.turn_blend, (0.0..=1.0).contains(&self.turn_blend))?;
        check("epsilon", self.epsilon, self.epsilon >= 0.0)?;
        check(
            "initial_stamina",
            self.initial_stamina,
            (0.0..=1.0).contains(&self.initial_stamina),
        )?;
        check(
            "stamina_regen_per_ms",
            self.stamina_regen_per_ms,
            self.stamina_regen_per_ms >= 0.0,
        )?;
        for (name, spec) in [("strike", &self.strike), ("backstep", &self.backstep)] {
            check(name, spec.cost, (0.0..=1.0).contains(&spec.cost))?;
            check(name, spec.peak_speed, true)?;
            check(name, spec.active_ms, spec.active_ms >= 0.0)?;
            check(name, spec.decay_ms, spec.decay_ms >= 0.0)?;
        }
        Ok(())
    }

    /// Spawn point in world coordinates (origin at window centre, y up).
    pub fn spawn_world(&self) -> Vec2 {
        Vec2::new(
            self.spawn_x - self.window_width as f32 * 0.5,
            self.window_height as f32 * 0.5 - self.spawn_y,
        )
    }

    /// Load from file, or create default if not found.
    pub fn load_or_default() -> Self {
        Self::load_or_default_from(&Self::file_path())
    }

    /// Load from `path`. A missing file is created with defaults; a file that
    /// fails to read or validate is left untouched and defaults are used.
    pub fn load_or_default_from(path: &Path) -> Self {
        if !path.exists() {
            let tuning = Self::default();
            tuning.save_to(path);
            return tuning;
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(tuning) => tuning,
                Err(e) => {
                    warn!("Rejected tuning.ron: {e}, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read tuning.ron: {e}, using defaults");
                Self::default()
            }
        }
    }

    fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let pretty = ron::ser::PrettyConfig::default();
        match ron::ser::to_string_pretty(self, pretty) {
            Ok(s) => {
                if let Err(e) = std::fs::write(path, s) {
                    warn!("Failed to write tuning.ron: {e}");
                }
            }
            Err(e) => {
                warn!("Failed to serialize tuning: {e}");
            }
        }
    }

    /// Reload from file (called by key press).
    pub fn reload(&mut self) {
        *self = Self::load_or_default();
        info!("Tuning reloaded");
    }
}
