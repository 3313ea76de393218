//! Read-side summaries over the adjustment ledger.

use serde::Serialize;

use payroll_compensation::{AdjustmentEvent, Tier};

use crate::ledger::{AdjustmentLedger, LedgerError};

/// Aggregate view of all recorded batches.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdjustmentStats {
    pub total_adjustments: usize,
    pub total_employees_affected: usize,
    /// `None` when the ledger is empty.
    pub average_performance_score: Option<f64>,
    pub excellent_adjustments: usize,
    pub good_adjustments: usize,
    pub needs_improvement_adjustments: usize,
}

impl AdjustmentStats {
    pub fn from_events(events: &[AdjustmentEvent]) -> Self {
        let mut stats = Self {
            total_adjustments: events.len(),
            ..Self::default()
        };
        if events.is_empty() {
            return stats;
        }

        let mut score_sum: u64 = 0;
        for e in events {
            score_sum += u64::from(e.performance_score.value());
            stats.total_employees_affected += e.employees_affected;
            match e.performance_score.tier() {
                Tier::Excellent => stats.excellent_adjustments += 1,
                Tier::Good => stats.good_adjustments += 1,
                Tier::NeedsImprovement => stats.needs_improvement_adjustments += 1,
            }
        }
        stats.average_performance_score = Some(score_sum as f64 / events.len() as f64);
        stats
    }
}

pub fn adjustment_stats<L: AdjustmentLedger + ?Sized>(
    ledger: &L,
) -> Result<AdjustmentStats, LedgerError> {
    Ok(AdjustmentStats::from_events(&ledger.list_all()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use payroll_compensation::PerformanceScore;
    use payroll_core::{AdjustmentId, DepartmentId};

    use crate::ledger::InMemoryAdjustmentLedger;

    fn event(score: i64, affected: usize) -> AdjustmentEvent {
        AdjustmentEvent {
            adjustment_id: AdjustmentId::new(),
            department_id: DepartmentId::new(),
            performance_score: PerformanceScore::new(score).unwrap(),
            employees_affected: affected,
            occurred_at: Utc::now(),
        }
    }

    #[test]
    fn empty_ledger_has_no_average() {
        let stats = adjustment_stats(&InMemoryAdjustmentLedger::new()).unwrap();
        assert_eq!(stats, AdjustmentStats::default());
        assert_eq!(stats.average_performance_score, None);
    }

    #[test]
    fn buckets_follow_tier_boundaries() {
        let ledger = InMemoryAdjustmentLedger::new();
        for (score, affected) in [(95, 2), (90, 1), (89, 4), (70, 1), (69, 3)] {
            ledger.append(event(score, affected)).unwrap();
        }

        let stats = adjustment_stats(&ledger).unwrap();
        assert_eq!(stats.total_adjustments, 5);
        assert_eq!(stats.total_employees_affected, 11);
        assert_eq!(stats.excellent_adjustments, 2);
        assert_eq!(stats.good_adjustments, 2);
        assert_eq!(stats.needs_improvement_adjustments, 1);
        assert_eq!(stats.average_performance_score, Some(82.6));
    }
}
