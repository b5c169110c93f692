//! Skill bonuses and their accumulation.
//!
//! Every skill contribution is a flat amount in the stat's own unit (per-mille
//! for rates, ticks for initiative). A [`BonusStack`] sums them and clamps
//! once, so the resolved value is the same whatever order the skills were
//! checked in.

/// Accumulated bonuses of one stat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BonusStack {
    total: i64,
    count: u32,
}

impl BonusStack {
    pub const fn new() -> Self {
        Self { total: 0, count: 0 }
    }

    pub fn add(&mut self, amount: i32) {
        self.total += amount as i64;
        self.count += 1;
    }

    /// Add a bonus (builder form).
    #[must_use]
    pub fn with(mut self, amount: i32) -> Self {
        self.add(amount);
        self
    }

    /// Number of bonuses added.
    pub fn len(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `base` plus every bonus, clamped into `bounds`.
    pub fn apply(&self, base: i32, bounds: StatBounds) -> i32 {
        bounds.clamp(base as i64 + self.total)
    }
}

/// Clamp range of one resolved stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatBounds {
    pub min: i32,
    pub max: i32,
}

impl StatBounds {
    /// Per-mille rates.
    pub const RATE: Self = Self { min: 0, max: 1000 };
    pub const ATTRIBUTE: Self = Self { min: 1, max: 9999 };
    pub const INTERVAL: Self = Self { min: 1, max: 10_000 };
    pub const UNCLAMPED: Self = Self {
        min: i32::MIN,
        max: i32::MAX,
    };

    /// Lower the upper bound to a configured cap. Never widens.
    pub const fn capped(self, cap: i32) -> Self {
        Self {
            min: self.min,
            max: if cap < self.max { cap } else { self.max },
        }
    }

    pub fn clamp(self, value: i64) -> i32 {
        value.clamp(self.min as i64, self.max as i64) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_irrelevant() {
        let amounts = [100, -7, 300, 33];
        let forward = amounts.iter().fold(BonusStack::new(), |s, a| s.with(*a));
        let backward = amounts.iter().rev().fold(BonusStack::new(), |s, a| s.with(*a));

        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 4);
        assert_eq!(forward.apply(0, StatBounds::RATE), 426);
    }

    #[test]
    fn clamps_to_bounds() {
        let high = BonusStack::new().with(5000);
        assert_eq!(high.apply(0, StatBounds::RATE), 1000);
        assert_eq!(high.apply(0, StatBounds::RATE.capped(600)), 600);

        let negative = BonusStack::new().with(-50);
        assert_eq!(negative.apply(10, StatBounds::RATE), 0);
    }

    #[test]
    fn sums_past_i32_saturate_at_the_bound() {
        let stack = BonusStack::new().with(i32::MAX).with(i32::MAX);
        assert_eq!(stack.apply(i32::MAX, StatBounds::UNCLAMPED), i32::MAX);
        assert_eq!(StatBounds::ATTRIBUTE.clamp(0), 1);
    }

    #[test]
    fn empty_stack_is_identity() {
        let stack = BonusStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.apply(-20, StatBounds::UNCLAMPED), -20);
        assert_eq!(StatBounds::RATE.capped(5000), StatBounds::RATE);
    }
}
