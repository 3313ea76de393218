//! Executor configuration.

use std::time::Duration;

use payroll_compensation::AdjustmentPolicy;
use payroll_core::{DomainError, DomainResult, Money};

/// Default window in which an identical (department, score) submission is refused.
pub const DEFAULT_DUPLICATE_WINDOW: Duration = Duration::from_secs(30 * 60);

const ENV_SALARY_CAP: &str = "PAYROLL_SALARY_CAP";
const ENV_TENURE_THRESHOLD: &str = "PAYROLL_TENURE_THRESHOLD_YEARS";
const ENV_TENURE_BONUS: &str = "PAYROLL_TENURE_BONUS_PERCENT";
const ENV_DUPLICATE_WINDOW: &str = "PAYROLL_DUPLICATE_WINDOW_MINUTES";

/// Adjustment executor configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorConfig {
    /// Rule constants (cap, tenure threshold, tenure bonus).
    pub policy: AdjustmentPolicy,
    /// Duplicate-submission window; `None` disables the guard.
    pub duplicate_window: Option<Duration>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            policy: AdjustmentPolicy::default(),
            duplicate_window: Some(DEFAULT_DUPLICATE_WINDOW),
        }
    }
}

impl ExecutorConfig {
    pub fn with_policy(mut self, policy: AdjustmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_duplicate_window(mut self, window: Duration) -> Self {
        self.duplicate_window = Some(window);
        self
    }

    pub fn without_duplicate_guard(mut self) -> Self {
        self.duplicate_window = None;
        self
    }

    /// Build from `PAYROLL_*` environment variables, falling back to defaults for
    /// unset ones. Set-but-malformed values are an error.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_SALARY_CAP) {
            let cap: Money = raw.parse()?;
            if cap.is_negative() {
                return Err(DomainError::validation(format!(
                    "{ENV_SALARY_CAP} must not be negative"
                )));
            }
            config.policy.salary_cap = cap;
        }

        if let Some(raw) = lookup(ENV_TENURE_THRESHOLD) {
            let years: f64 = raw
                .trim()
                .parse()
                .map_err(|_| invalid(ENV_TENURE_THRESHOLD, &raw))?;
            if !years.is_finite() || years < 0.0 {
                return Err(invalid(ENV_TENURE_THRESHOLD, &raw));
            }
            config.policy.tenure_bonus_threshold_years = years;
        }

        if let Some(raw) = lookup(ENV_TENURE_BONUS) {
            config.policy.tenure_bonus_percent = raw
                .trim()
                .parse()
                .map_err(|_| invalid(ENV_TENURE_BONUS, &raw))?;
        }

        if let Some(raw) = lookup(ENV_DUPLICATE_WINDOW) {
            let minutes: u64 = raw
                .trim()
                .parse()
                .map_err(|_| invalid(ENV_DUPLICATE_WINDOW, &raw))?;
            config.duplicate_window = match minutes {
                0 => None,
                m => Some(Duration::from_secs(m * 60)),
            };
        }

        Ok(config)
    }
}

fn invalid(key: &str, raw: &str) -> DomainError {
    DomainError::validation(format!("{key}: invalid value '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn unset_environment_yields_defaults() {
        let config = ExecutorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ExecutorConfig::default());
        assert_eq!(config.policy.salary_cap, Money::from_cents(20_000_000));
    }

    #[test]
    fn overrides_are_applied() {
        let config = ExecutorConfig::from_lookup(lookup(&[
            ("PAYROLL_SALARY_CAP", "150000.50"),
            ("PAYROLL_TENURE_THRESHOLD_YEARS", "3"),
            ("PAYROLL_TENURE_BONUS_PERCENT", "7"),
            ("PAYROLL_DUPLICATE_WINDOW_MINUTES", "0"),
        ]))
        .unwrap();

        assert_eq!(config.policy.salary_cap, Money::from_cents(15_000_050));
        assert_eq!(config.policy.tenure_bonus_threshold_years, 3.0);
        assert_eq!(config.policy.tenure_bonus_percent, 7);
        assert_eq!(config.duplicate_window, None);
    }

    #[test]
    fn malformed_values_are_rejected() {
        for (key, value) in [
            ("PAYROLL_SALARY_CAP", "lots"),
            ("PAYROLL_SALARY_CAP", "-1"),
            ("PAYROLL_TENURE_THRESHOLD_YEARS", "-2"),
            ("PAYROLL_TENURE_BONUS_PERCENT", "five"),
            ("PAYROLL_DUPLICATE_WINDOW_MINUTES", "soon"),
        ] {
            let err = ExecutorConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{key}={value}");
        }
    }
}
