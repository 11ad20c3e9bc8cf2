use serde::{Deserialize, Serialize};
use std::fmt;

use super::config::{ComplexityWeights, StatusThresholds};

/// Weight applied to complexity labels outside the known vocabulary.
pub const DEFAULT_TASK_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskComplexity {
    Easy,
    Average,
    Hard,
    Unrecognized,
}

impl TaskComplexity {
    /// Exact, case-sensitive match. Unknown labels (padded ones included) are
    /// not an error; they fall through to [`TaskComplexity::Unrecognized`].
    pub fn parse(s: &str) -> Self {
        match s {
            "Easy" => TaskComplexity::Easy,
            "Average" => TaskComplexity::Average,
            "Hard" => TaskComplexity::Hard,
            _ => TaskComplexity::Unrecognized,
        }
    }

    pub fn weight(&self, weights: &ComplexityWeights) -> f64 {
        match self {
            TaskComplexity::Easy => weights.easy,
            TaskComplexity::Average => weights.average,
            TaskComplexity::Hard => weights.hard,
            TaskComplexity::Unrecognized => DEFAULT_TASK_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceStatus {
    Excellent,
    Good,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl PerformanceStatus {
    /// Classify a final score. Both thresholds are inclusive lower bounds.
    pub fn classify(score: f64, thresholds: &StatusThresholds) -> Self {
        if score >= thresholds.excellent {
            PerformanceStatus::Excellent
        } else if score >= thresholds.good {
            PerformanceStatus::Good
        } else {
            PerformanceStatus::NeedsImprovement
        }
    }

    /// Ordering key for ranked output: Excellent first.
    pub fn rank(&self) -> u8 {
        match self {
            PerformanceStatus::Excellent => 1,
            PerformanceStatus::Good => 2,
            PerformanceStatus::NeedsImprovement => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceStatus::Excellent => "Excellent",
            PerformanceStatus::Good => "Good",
            PerformanceStatus::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for PerformanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Attendance percentage scaled by `weight`; 0 when there were no working days.
pub fn attendance_score(attendance_days: f64, total_working_days: f64, weight: f64) -> f64 {
    if total_working_days > 0.0 {
        (attendance_days / total_working_days) * 100.0 * weight
    } else {
        0.0
    }
}

/// Completion ratio scaled by `weight` and the complexity multiplier; 0 with no tasks.
pub fn task_score(completed: f64, total: f64, weight: f64, complexity_weight: f64) -> f64 {
    if total > 0.0 {
        (completed / total) * weight * complexity_weight
    } else {
        0.0
    }
}

/// Hours beyond the expected baseline, never negative.
pub fn overtime_hours(expected: f64, actual: f64) -> f64 {
    (actual - expected).max(0.0)
}

/// Overtime relative to the baseline scaled by `weight`; 0 with no baseline.
pub fn overtime_bonus(overtime: f64, expected: f64, weight: f64) -> f64 {
    if expected > 0.0 {
        (overtime / expected) * weight
    } else {
        0.0
    }
}
