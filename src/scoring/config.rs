use serde::{Deserialize, Serialize};

/// Scoring configuration.
///
/// Every field has a default, so an empty `scoring:` section (or none at all)
/// scores with the standard weight table.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   complexity_weights: { easy: 1.0, average: 1.2, hard: 1.5 }
///   attendance_weight: 0.3
///   task_weight: 70
///   overtime_weight: 10
///   max_score: 100
///   thresholds: { excellent: 90, good: 75 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Multipliers for the task component, keyed by task complexity
    #[serde(default)]
    pub complexity_weights: ComplexityWeights,

    /// Points per attendance percentage point (default: 0.3)
    #[serde(default = "default_attendance_weight")]
    pub attendance_weight: f64,

    /// Points for a fully completed task list before the complexity multiplier (default: 70)
    #[serde(default = "default_task_weight")]
    pub task_weight: f64,

    /// Points per 100% overtime over the expected hours (default: 10)
    #[serde(default = "default_overtime_weight")]
    pub overtime_weight: f64,

    /// Upper cap on the final score (default: 100)
    #[serde(default = "default_max_score")]
    pub max_score: f64,

    #[serde(default)]
    pub thresholds: StatusThresholds,
}

fn default_attendance_weight() -> f64 {
    0.3
}

fn default_task_weight() -> f64 {
    70.0
}

fn default_overtime_weight() -> f64 {
    10.0
}

fn default_max_score() -> f64 {
    100.0
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            complexity_weights: ComplexityWeights::default(),
            attendance_weight: default_attendance_weight(),
            task_weight: default_task_weight(),
            overtime_weight: default_overtime_weight(),
            max_score: default_max_score(),
            thresholds: StatusThresholds::default(),
        }
    }
}

/// Task complexity multipliers. Labels outside this table always weigh 1.0.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ComplexityWeights {
    pub easy: f64,
    pub average: f64,
    pub hard: f64,
}

impl Default for ComplexityWeights {
    fn default() -> Self {
        Self {
            easy: 1.0,
            average: 1.2,
            hard: 1.5,
        }
    }
}

/// Inclusive lower bounds for the performance status tiers.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct StatusThresholds {
    pub excellent: f64,
    pub good: f64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            excellent: 90.0,
            good: 75.0,
        }
    }
}
