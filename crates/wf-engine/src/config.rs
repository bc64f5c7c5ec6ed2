//! Configuration for an engine session.

/// Configuration for an engine session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for the random sequence.
    pub seed: u64,
    /// How many journal entries are retained (at least 1).
    pub log_history: usize,
    /// How many arrival redirects one transition may follow.
    pub max_redirects: u32,
    /// Round cap for automatic combat (at least 1).
    pub max_combat_rounds: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            log_history: 256,
            max_redirects: 32,
            max_combat_rounds: 50,
        }
    }
}

impl EngineConfig {
    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set journal retention (clamped to at least 1).
    pub fn with_log_history(mut self, entries: usize) -> Self {
        self.log_history = entries.max(1);
        self
    }

    /// Set the redirect bound.
    pub fn with_max_redirects(mut self, redirects: u32) -> Self {
        self.max_redirects = redirects;
        self
    }

    /// Set the combat round cap (clamped to at least 1).
    pub fn with_max_combat_rounds(mut self, rounds: u32) -> Self {
        self.max_combat_rounds = rounds.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.log_history, 256);
        assert_eq!(cfg.max_redirects, 32);
        assert_eq!(cfg.max_combat_rounds, 50);
    }

    #[test]
    fn builder_methods() {
        let cfg = EngineConfig::default()
            .with_seed(7)
            .with_log_history(10)
            .with_max_redirects(3)
            .with_max_combat_rounds(5);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.log_history, 10);
        assert_eq!(cfg.max_redirects, 3);
        assert_eq!(cfg.max_combat_rounds, 5);
    }

    #[test]
    fn minimums_clamped() {
        let cfg = EngineConfig::default()
            .with_log_history(0)
            .with_max_combat_rounds(0);
        assert_eq!(cfg.log_history, 1);
        assert_eq!(cfg.max_combat_rounds, 1);
    }
}
