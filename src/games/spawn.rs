//! Spawn gate shared by both games' spawners.
//!
//! The gate only answers "may a spawn be rolled yet"; whether anything spawns
//! is the caller's random roll. Difficulty shortens the cooldown, so harder
//! levels mean more frequent attempts rather than a different probability
//! curve.

/// Multipliers below this are treated as this, keeping the cooldown finite.
const MIN_MULTIPLIER: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnGate {
    base_interval_ms: f64,
    /// Game-clock time of the last attempt (session start counts as one).
    last_attempt_ms: u64,
}

impl SpawnGate {
    pub fn new(base_interval_ms: f64) -> Self {
        Self {
            base_interval_ms: base_interval_ms.max(0.0),
            last_attempt_ms: 0,
        }
    }

    /// Cooldown for the given difficulty multiplier.
    pub fn cooldown_ms(&self, multiplier: f64) -> f64 {
        let multiplier = if multiplier.is_finite() {
            multiplier.max(MIN_MULTIPLIER)
        } else {
            1.0
        };
        self.base_interval_ms / multiplier
    }

    pub fn ready(&self, now_ms: u64, multiplier: f64) -> bool {
        let elapsed = now_ms.saturating_sub(self.last_attempt_ms) as f64;
        elapsed >= self.cooldown_ms(multiplier)
    }

    /// Record an attempt at `now_ms`, successful or not.
    pub fn mark(&mut self, now_ms: u64) {
        self.last_attempt_ms = now_ms;
    }

    pub fn reset(&mut self) {
        self.last_attempt_ms = 0;
    }

    pub fn last_attempt_ms(&self) -> u64 {
        self.last_attempt_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_waits_for_cooldown_from_start() {
        let gate = SpawnGate::new(1000.0);
        assert!(!gate.ready(999, 1.0));
        assert!(gate.ready(1000, 1.0));
    }

    #[test]
    fn test_multiplier_shortens_cooldown() {
        let gate = SpawnGate::new(1000.0);
        assert!((gate.cooldown_ms(2.0) - 500.0).abs() < f64::EPSILON);
        assert!(gate.ready(500, 2.0));
        assert!(!gate.ready(500, 1.0));
    }

    #[test]
    fn test_mark_restarts_cooldown() {
        let mut gate = SpawnGate::new(100.0);
        gate.mark(250);
        assert!(!gate.ready(300, 1.0));
        assert!(gate.ready(350, 1.0));
        gate.reset();
        assert_eq!(gate.last_attempt_ms(), 0);
    }

    #[test]
    fn test_degenerate_multipliers() {
        let gate = SpawnGate::new(100.0);
        assert!((gate.cooldown_ms(0.0) - 1000.0).abs() < 1e-9);
        assert!((gate.cooldown_ms(f64::NAN) - 100.0).abs() < 1e-9);
    }
}
