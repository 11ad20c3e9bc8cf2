use std::collections::HashMap;

use super::config::ScoringConfig;
use super::factors::{
    attendance_score, overtime_bonus, overtime_hours, round2, task_score, PerformanceStatus,
    TaskComplexity,
};
use super::types::{EmployeeResult, InputRow, Scorecard, TeamAggregate};

/// Score every row and build the team comparison in one pass.
///
/// Employees come back ordered by status (Excellent, Good, Needs Improvement)
/// and teams by average score descending. Both sorts are stable, so input
/// order breaks ties.
pub fn score(rows: &[InputRow], config: &ScoringConfig) -> Scorecard {
    let mut employees = Vec::with_capacity(rows.len());
    let mut teams = TeamAccumulator::default();

    for row in rows {
        let result = score_row(row, config);
        teams.add(&result.team, result.final_score);
        employees.push(result);
    }

    employees.sort_by_key(|e| e.status.rank());

    Scorecard {
        employees,
        teams: teams.finish(),
    }
}

/// Ranked employee results only.
pub fn score_employees(rows: &[InputRow], config: &ScoringConfig) -> Vec<EmployeeResult> {
    score(rows, config).employees
}

/// Ranked team aggregates only.
pub fn score_teams(rows: &[InputRow], config: &ScoringConfig) -> Vec<TeamAggregate> {
    score(rows, config).teams
}

/// Score a single row. Pure; zero denominators contribute nothing.
pub fn score_row(row: &InputRow, config: &ScoringConfig) -> EmployeeResult {
    let complexity_weight =
        TaskComplexity::parse(&row.task_complexity).weight(&config.complexity_weights);

    let attendance = attendance_score(
        row.attendance_days,
        row.total_working_days,
        config.attendance_weight,
    );
    let tasks = task_score(
        row.completed_tasks,
        row.total_tasks,
        config.task_weight,
        complexity_weight,
    );
    let overtime = overtime_hours(row.expected_hours, row.actual_hours);
    let bonus = overtime_bonus(overtime, row.expected_hours, config.overtime_weight);

    let final_score = round2((tasks + attendance + bonus).min(config.max_score));
    let status = PerformanceStatus::classify(final_score, &config.thresholds);

    EmployeeResult {
        employee_id: row.employee_id.clone(),
        employee_name: row.employee_name.clone(),
        team: row.team_label().to_string(),
        final_score,
        status,
        task_complexity: row.task_complexity.clone(),
        expected_hours: row.expected_hours,
        total_hours_worked: row.actual_hours,
        overtime_hours: round2(overtime),
        overtime_bonus: round2(bonus),
    }
}

/// Running score sum and head count per team, in first-seen order.
#[derive(Debug, Default)]
struct TeamAccumulator {
    index: HashMap<String, usize>,
    totals: Vec<TeamTotal>,
}

#[derive(Debug)]
struct TeamTotal {
    team: String,
    score_sum: f64,
    employees: usize,
}

impl TeamAccumulator {
    fn add(&mut self, team: &str, score: f64) {
        let slot = match self.index.get(team) {
            Some(&i) => i,
            None => {
                self.totals.push(TeamTotal {
                    team: team.to_string(),
                    score_sum: 0.0,
                    employees: 0,
                });
                self.index.insert(team.to_string(), self.totals.len() - 1);
                self.totals.len() - 1
            }
        };
        let total = &mut self.totals[slot];
        total.score_sum += score;
        total.employees += 1;
    }

    fn finish(self) -> Vec<TeamAggregate> {
        let mut teams: Vec<TeamAggregate> = self
            .totals
            .into_iter()
            .map(|t| TeamAggregate {
                // employees is never zero: a total only exists after its first add
                average_final_score: round2(t.score_sum / t.employees as f64),
                team: t.team,
                total_employees: t.employees,
            })
            .collect();

        teams.sort_by(|a, b| b.average_final_score.total_cmp(&a.average_final_score));
        teams
    }
}
