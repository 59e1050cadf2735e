use bevy::math::curve::{easing::EaseFunction, Curve};
use serde::{Deserialize, Serialize};

/// Easing curves a decay can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EasingKind {
    Linear,
    CubicIn,
    CubicOut,
}

impl EasingKind {
    fn function(self) -> EaseFunction {
        match self {
            Self::Linear => EaseFunction::Linear,
            Self::CubicIn => EaseFunction::CubicIn,
            Self::CubicOut => EaseFunction::CubicOut,
        }
    }

    /// Eased progress for linear progress `t` (clamped to [0, 1]).
    pub fn apply(self, t: f32) -> f32 {
        self.function().sample_clamped(t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecayPhase {
    Running,
    Finished,
    Cancelled,
}

/// Result of advancing a decay by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecayStatus {
    Running,
    /// Returned exactly once, on the tick that reaches the target.
    Completed,
    /// Already finished or cancelled; nothing was written.
    Inactive,
}

/// Drives a scalar from `initial` to `target`: hold for `hold_ms`, then ease
/// over `duration_ms`. Time only advances through [`SpeedDecay::tick`].
#[derive(Debug, Clone)]
pub struct SpeedDecay {
    initial: f32,
    target: f32,
    duration_ms: f32,
    hold_ms: f32,
    easing: EasingKind,
    elapsed_ms: f32,
    phase: DecayPhase,
}

impl SpeedDecay {
    pub fn start(
        initial: f32,
        target: f32,
        duration_ms: f32,
        hold_ms: f32,
        easing: EasingKind,
    ) -> Self {
        Self {
            initial,
            target,
            duration_ms: duration_ms.max(0.0),
            hold_ms: hold_ms.max(0.0),
            easing,
            elapsed_ms: 0.0,
            phase: DecayPhase::Running,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == DecayPhase::Running
    }

    /// Stop writing immediately; no completion will be reported.
    pub fn cancel(&mut self) {
        if self.phase == DecayPhase::Running {
            self.phase = DecayPhase::Cancelled;
        }
    }

    /// Advance by `elapsed_ms` and write the current value into `value`.
    pub fn tick(&mut self, elapsed_ms: f32, value: &mut f32) -> DecayStatus {
        if self.phase != DecayPhase::Running {
            return DecayStatus::Inactive;
        }

        self.elapsed_ms += elapsed_ms.max(0.0);
        if self.elapsed_ms < self.hold_ms {
            *value = self.initial;
            return DecayStatus::Running;
        }

        let progress = if self.duration_ms <= 0.0 {
            1.0
        } else {
            ((self.elapsed_ms - self.hold_ms) / self.duration_ms).min(1.0)
        };

        if progress >= 1.0 {
            *value = self.target;
            self.phase = DecayPhase::Finished;
            return DecayStatus::Completed;
        }

        *value = self.initial + (self.target - self.initial) * self.easing.apply(progress);
        DecayStatus::Running
    }
}
