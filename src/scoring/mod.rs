pub mod config;
pub mod factors;
pub mod engine;
pub mod types;
pub mod validation;

pub use config::*;
pub use factors::{PerformanceStatus, TaskComplexity};
pub use engine::{score, score_employees, score_row, score_teams};
pub use types::{Cell, EmployeeResult, InputRow, Scorecard, TeamAggregate, NO_TEAM};
pub use validation::validate_scoring;
