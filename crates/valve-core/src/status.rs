//! Threshold rules mapping a computed value to a cell [`Status`].

use valve_model::{ReportConfig, Status};

/// A threshold rule. Evaluation depends on the value and the rule only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusRule {
    /// Always [`Status::Neutral`].
    Neutral,
    /// Below `target` is [`Status::BelowTarget`]; anything else stays neutral.
    Minimum { target: f64 },
    /// On target inside `(low_exclusive, high_inclusive]`, below target outside.
    Range {
        low_exclusive: f64,
        high_inclusive: f64,
    },
    /// On target at or above `target`, warning between `floor` and `target`,
    /// below target under `floor`.
    Tiered { target: f64, floor: f64 },
    /// On target at or below `ceiling`.
    Ceiling { ceiling: f64 },
}

impl StatusRule {
    pub fn evaluate(&self, value: f64) -> Status {
        match *self {
            StatusRule::Neutral => Status::Neutral,
            StatusRule::Minimum { target } => {
                if value < target {
                    Status::BelowTarget
                } else {
                    Status::Neutral
                }
            }
            StatusRule::Range {
                low_exclusive,
                high_inclusive,
            } => {
                if value > low_exclusive && value <= high_inclusive {
                    Status::OnTarget
                } else {
                    Status::BelowTarget
                }
            }
            StatusRule::Tiered { target, floor } => {
                if value >= target {
                    Status::OnTarget
                } else if value < floor {
                    Status::BelowTarget
                } else {
                    Status::Warn
                }
            }
            StatusRule::Ceiling { ceiling } => {
                if value <= ceiling {
                    Status::OnTarget
                } else {
                    Status::BelowTarget
                }
            }
        }
    }

    /// Monthly case count rule. Months after the last month with data are
    /// not judged.
    pub fn monthly_target(target: u32, month: u32, months_elapsed: u32) -> Self {
        if month <= months_elapsed {
            StatusRule::Minimum {
                target: f64::from(target),
            }
        } else {
            StatusRule::Neutral
        }
    }

    pub fn short_stay_median(config: &ReportConfig) -> Self {
        StatusRule::Range {
            low_exclusive: 0.0,
            high_inclusive: config.los_target_days,
        }
    }

    pub fn evolut_share(config: &ReportConfig) -> Self {
        StatusRule::Tiered {
            target: config.evolut_target,
            floor: config.evolut_floor,
        }
    }

    pub fn complication_rate(benchmark: f64) -> Self {
        StatusRule::Ceiling { ceiling: benchmark }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_minimum_only_for_elapsed_months() {
        let rule = StatusRule::monthly_target(46, 2, 3);
        assert_eq!(rule.evaluate(45.0), Status::BelowTarget);
        assert_eq!(rule.evaluate(46.0), Status::Neutral);
        let future = StatusRule::monthly_target(46, 4, 3);
        assert_eq!(future.evaluate(0.0), Status::Neutral);
    }

    #[test]
    fn short_stay_range_excludes_zero() {
        let rule = StatusRule::short_stay_median(&ReportConfig::default());
        assert_eq!(rule.evaluate(0.0), Status::BelowTarget);
        assert_eq!(rule.evaluate(0.5), Status::OnTarget);
        assert_eq!(rule.evaluate(5.0), Status::OnTarget);
        assert_eq!(rule.evaluate(5.5), Status::BelowTarget);
    }

    #[test]
    fn evolut_tiers() {
        let rule = StatusRule::evolut_share(&ReportConfig::default());
        assert_eq!(rule.evaluate(0.8), Status::OnTarget);
        assert_eq!(rule.evaluate(0.75), Status::Warn);
        assert_eq!(rule.evaluate(0.7), Status::Warn);
        assert_eq!(rule.evaluate(0.69), Status::BelowTarget);
    }

    #[test]
    fn complication_ceiling_is_inclusive() {
        let rule = StatusRule::complication_rate(0.02);
        assert_eq!(rule.evaluate(0.02), Status::OnTarget);
        assert_eq!(rule.evaluate(0.0), Status::OnTarget);
        assert_eq!(rule.evaluate(0.021), Status::BelowTarget);
    }

    #[test]
    fn neutral_rule_ignores_value() {
        for value in [-1.0, 0.0, 1e9] {
            assert_eq!(StatusRule::Neutral.evaluate(value), Status::Neutral);
        }
    }
}
