use super::config::ScoringConfig;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let weights = [
        ("complexity_weights.easy", config.complexity_weights.easy),
        ("complexity_weights.average", config.complexity_weights.average),
        ("complexity_weights.hard", config.complexity_weights.hard),
        ("attendance_weight", config.attendance_weight),
        ("task_weight", config.task_weight),
        ("overtime_weight", config.overtime_weight),
    ];
    for (name, value) in weights {
        if !value.is_finite() || value < 0.0 {
            errors.push(format!("scoring.{}: must be a non-negative number", name));
        }
    }

    if !config.max_score.is_finite() || config.max_score <= 0.0 {
        errors.push("scoring.max_score: must be positive".to_string());
    }

    let thresholds = &config.thresholds;
    for (name, value) in [("excellent", thresholds.excellent), ("good", thresholds.good)] {
        if !value.is_finite() || value < 0.0 || value > config.max_score {
            errors.push(format!(
                "scoring.thresholds.{}: must be between 0 and max_score ({})",
                name, config.max_score
            ));
        }
    }

    if thresholds.good > thresholds.excellent {
        errors.push(format!(
            "scoring.thresholds: good ({}) must not exceed excellent ({})",
            thresholds.good, thresholds.excellent
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
