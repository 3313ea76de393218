//! Adjustment rule evaluator.
//!
//! Maps a performance score and an employee's tenure to a raise percentage.
//! Everything here is pure: the same inputs always produce the same
//! [`Evaluation`], with no IO and no dependency on other employees.

use serde::{Deserialize, Serialize};

use payroll_core::{DomainError, DomainResult, Money, ValueObject};

/// Tenure strictly above this many years earns the tenure bonus.
pub const TENURE_BONUS_THRESHOLD_YEARS: f64 = 5.0;

/// Percentage points added for tenure above the threshold.
pub const TENURE_BONUS_PERCENT: u32 = 5;

/// Absolute ceiling an adjustment may raise a salary to (200,000.00).
pub const SALARY_CAP: Money = Money::from_cents(20_000_000);

const MIN_SCORE: i64 = 0;
const MAX_SCORE: i64 = 100;

/// Department-level performance score, an integer in `[0, 100]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PerformanceScore(u8);

impl ValueObject for PerformanceScore {}

impl PerformanceScore {
    pub fn new(raw: i64) -> DomainResult<Self> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&raw) {
            return Err(DomainError::validation(format!(
                "performance score must be between {MIN_SCORE} and {MAX_SCORE} (got {raw})"
            )));
        }
        // Range checked above.
        Ok(Self(raw as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn tier(self) -> Tier {
        Tier::for_score(self)
    }
}

impl TryFrom<i64> for PerformanceScore {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PerformanceScore> for i64 {
    fn from(value: PerformanceScore) -> Self {
        i64::from(value.0)
    }
}

impl core::fmt::Display for PerformanceScore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Performance classification derived from the score.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Excellent,
    Good,
    NeedsImprovement,
}

impl Tier {
    pub fn for_score(score: PerformanceScore) -> Self {
        match score.value() {
            90.. => Tier::Excellent,
            70..=89 => Tier::Good,
            _ => Tier::NeedsImprovement,
        }
    }

    pub fn base_percent(self) -> u32 {
        match self {
            Tier::Excellent => 15,
            Tier::Good => 10,
            Tier::NeedsImprovement => 0,
        }
    }
}

/// Outcome of evaluating one employee.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub tier: Tier,
    pub base_percent: u32,
    pub tenure_bonus_percent: u32,
    pub total_percent: u32,
}

impl Evaluation {
    pub fn has_tenure_bonus(&self) -> bool {
        self.tenure_bonus_percent > 0
    }
}

/// Tunable constants of the adjustment rules.
///
/// `Default` reproduces the standard rule table; deployments can externalize the
/// values without changing behavior elsewhere.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AdjustmentPolicy {
    pub salary_cap: Money,
    pub tenure_bonus_threshold_years: f64,
    pub tenure_bonus_percent: u32,
}

impl Default for AdjustmentPolicy {
    fn default() -> Self {
        Self {
            salary_cap: SALARY_CAP,
            tenure_bonus_threshold_years: TENURE_BONUS_THRESHOLD_YEARS,
            tenure_bonus_percent: TENURE_BONUS_PERCENT,
        }
    }
}

impl AdjustmentPolicy {
    pub fn with_salary_cap(mut self, cap: Money) -> Self {
        self.salary_cap = cap;
        self
    }

    pub fn with_tenure_bonus(mut self, threshold_years: f64, percent: u32) -> Self {
        self.tenure_bonus_threshold_years = threshold_years;
        self.tenure_bonus_percent = percent;
        self
    }

    /// Evaluate one employee's raise.
    ///
    /// The tenure bonus applies in every tier, including `NeedsImprovement`.
    pub fn evaluate(
        &self,
        score: PerformanceScore,
        years_of_tenure: f64,
    ) -> DomainResult<Evaluation> {
        if !years_of_tenure.is_finite() || years_of_tenure < 0.0 {
            return Err(DomainError::validation(format!(
                "years of tenure must be a non-negative number (got {years_of_tenure})"
            )));
        }

        let tier = score.tier();
        let base_percent = tier.base_percent();
        let tenure_bonus_percent = if years_of_tenure > self.tenure_bonus_threshold_years {
            self.tenure_bonus_percent
        } else {
            0
        };

        Ok(Evaluation {
            tier,
            base_percent,
            tenure_bonus_percent,
            total_percent: base_percent + tenure_bonus_percent,
        })
    }

    /// Apply `percent` to `old` and clamp to the cap.
    ///
    /// The cap never lowers pay: a salary already at or above it is returned
    /// unchanged.
    pub fn adjusted_salary(&self, old: Money, percent: u32) -> DomainResult<Money> {
        if old >= self.salary_cap {
            return Ok(old);
        }
        let raw = old.increased_by_percent(percent)?;
        Ok(raw.min(self.salary_cap))
    }
}

/// Evaluate with the default policy, validating the raw score first.
pub fn evaluate(performance_score: i64, years_of_tenure: f64) -> DomainResult<Evaluation> {
    let score = PerformanceScore::new(performance_score)?;
    AdjustmentPolicy::default().evaluate(score, years_of_tenure)
}
