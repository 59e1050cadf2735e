/// Normalized stamina. Always clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Stamina(f32);

impl Stamina {
    pub const FULL: f32 = 1.0;

    pub fn new(v: f32) -> Self {
        debug_assert!(v.is_finite(), "Stamina must be finite");
        Self(v.clamp(0.0, Self::FULL))
    }

    pub fn fraction(self) -> f32 {
        self.0
    }

    /// Add `amount`, saturating at full.
    pub fn regen(self, amount: f32) -> Self {
        let v = (self.0 + amount.max(0.0)).min(Self::FULL);
        debug_assert!(v.is_finite());
        Self(v)
    }

    /// Deduct `cost` only if all of it is available.
    pub fn try_spend(&mut self, cost: f32) -> bool {
        if self.0 < cost {
            return false;
        }
        self.0 = (self.0 - cost).max(0.0);
        true
    }
}
