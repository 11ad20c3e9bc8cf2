use serde::{Deserialize, Serialize};
use std::fmt;

use super::factors::PerformanceStatus;

/// Team label used for rows that carry no team.
pub const NO_TEAM: &str = "No Team";

/// A single decoded table value.
///
/// Identifiers are passed through unchanged, so a numeric employee ID stays a
/// JSON number and a textual one stays a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Infer a cell from raw text: integers, then floats, then text.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else if let Ok(n) = trimmed.parse::<i64>() {
            Cell::Int(n)
        } else if let Ok(f) = trimmed.parse::<f64>() {
            Cell::Float(f)
        } else {
            Cell::Text(raw.to_string())
        }
    }

    /// Numeric view of the cell, if it holds (or spells) a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(n) => Some(*n as f64),
            Cell::Float(f) => Some(*f),
            Cell::Text(s) => s.trim().parse().ok(),
            Cell::Empty => None,
        }
    }

    /// Text label for the cell, verbatim. Blank and NaN cells have no label.
    pub fn label(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Float(f) if f.is_nan() => None,
            Cell::Text(s) if s.trim().is_empty() => None,
            Cell::Text(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.label().is_none()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(n) => write!(f, "{}", n),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Empty => Ok(()),
        }
    }
}

/// One employee's record for the scoring period.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRow {
    pub employee_id: Cell,
    pub employee_name: Cell,
    pub team: Option<String>,
    pub total_tasks: f64,
    pub completed_tasks: f64,
    pub attendance_days: f64,
    pub total_working_days: f64,
    pub task_complexity: String,
    pub expected_hours: f64,
    pub actual_hours: f64,
}

impl InputRow {
    /// Team label, falling back to [`NO_TEAM`].
    pub fn team_label(&self) -> &str {
        self.team.as_deref().unwrap_or(NO_TEAM)
    }
}

/// Scored view of one [`InputRow`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeResult {
    #[serde(rename = "Employee ID")]
    pub employee_id: Cell,
    #[serde(rename = "Employee Name")]
    pub employee_name: Cell,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Final Score")]
    pub final_score: f64,
    #[serde(rename = "Performance Status")]
    pub status: PerformanceStatus,
    #[serde(rename = "Task Complexity")]
    pub task_complexity: String,
    #[serde(rename = "Expected Hours")]
    pub expected_hours: f64,
    #[serde(rename = "Total Hours Worked")]
    pub total_hours_worked: f64,
    #[serde(rename = "Overtime Hours")]
    pub overtime_hours: f64,
    #[serde(rename = "Overtime Bonus")]
    pub overtime_bonus: f64,
}

/// Mean score and head count of one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAggregate {
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Average Final Score")]
    pub average_final_score: f64,
    #[serde(rename = "Total Employees")]
    pub total_employees: usize,
}

/// Both ranked outputs of one scoring pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scorecard {
    pub employees: Vec<EmployeeResult>,
    pub teams: Vec<TeamAggregate>,
}
