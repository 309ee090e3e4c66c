//! Thresholds the supervisor enforces. Defaults match SPEC_FULL §4.3.

/// Quality-gate thresholds and retry bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupervisorConfig {
    /// Minimum score to approve a tool's output outright.
    pub quality_threshold: f64,
    /// Maximum number of retries per tool before falling back.
    pub max_retries: u32,
    /// Score required to accept on the final retry, lower than
    /// `quality_threshold` so a borderline result doesn't fall back to an
    /// empty/placeholder payload after two already-spent attempts.
    pub accept_on_final: f64,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            quality_threshold: 8.0,
            max_retries: 2,
            accept_on_final: 7.25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let config = SupervisorConfig::default();
        assert_eq!(config.quality_threshold, 8.0);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.accept_on_final, 7.25);
    }
}
