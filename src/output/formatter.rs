use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::scoring::{EmployeeResult, PerformanceStatus, TeamAggregate};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with two decimals, as it is reported
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Status label padded to the widest label, colored by tier
fn format_status(status: PerformanceStatus, use_colors: bool) -> String {
    let padded = format!("{:<17}", status.as_str());
    if !use_colors {
        return padded;
    }
    match status {
        PerformanceStatus::Excellent => padded.green().bold().to_string(),
        PerformanceStatus::Good => padded.yellow().to_string(),
        PerformanceStatus::NeedsImprovement => padded.red().to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format employees as a ranked table: Index, Score, Status, Team, Name (ID)
/// Index column is as wide as the largest index plus its ".", right-aligned
/// Score column is right-aligned, 6 chars wide (fits "100.00")
pub fn format_employee_table(results: &[EmployeeResult], use_colors: bool) -> String {
    if results.is_empty() {
        return "No employees found.".to_string();
    }

    let term_width = get_terminal_width();
    let index_width = results.len().to_string().len() + 1;
    let team_width = results
        .iter()
        .map(|r| r.team.chars().count())
        .max()
        .unwrap_or(0)
        .min(20);
    let separator = "  ";

    results
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            let index_str = format!("{:>width$}", format!("{}.", idx + 1), width = index_width);
            let score_str = format!("{:>6}", format_score(result.final_score));
            let team = format!("{:<width$}", truncate(&result.team, team_width), width = team_width);
            let label = format!("{} ({})", result.employee_name, result.employee_id);

            // index + score + status + team, each followed by a separator
            let fixed_width = index_width + 6 + 17 + team_width + separator.len() * 4;
            let label = match term_width {
                Some(width) if width > fixed_width + 10 => truncate(&label, width - fixed_width),
                Some(_) => truncate(&label, 20),
                None => label,
            };

            if use_colors {
                format!(
                    "{}{}{}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    separator,
                    score_str.bold(),
                    separator,
                    format_status(result.status, true),
                    separator,
                    team.cyan(),
                    separator,
                    label
                )
            } else {
                format!(
                    "{}{}{}{}{}{}{}{}{}",
                    index_str,
                    separator,
                    score_str,
                    separator,
                    format_status(result.status, false),
                    separator,
                    team,
                    separator,
                    label
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format teams as a ranked table: Index, Average, Employees, Team
pub fn format_team_table(teams: &[TeamAggregate], use_colors: bool) -> String {
    if teams.is_empty() {
        return "No teams found.".to_string();
    }

    let index_width = teams.len().to_string().len() + 1;

    teams
        .iter()
        .enumerate()
        .map(|(idx, team)| {
            let index_str = format!("{:>width$}", format!("{}.", idx + 1), width = index_width);
            let average = format!("{:>6}", format_score(team.average_final_score));
            let members = format!(
                "{:>4} {}",
                team.total_employees,
                if team.total_employees == 1 { "employee " } else { "employees" }
            );

            if use_colors {
                format!(
                    "{}  {}  {}  {}",
                    index_str.dimmed(),
                    average.bold(),
                    members,
                    team.team.cyan()
                )
            } else {
                format!("{}  {}  {}  {}", index_str, average, members, team.team)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format employees as tab-separated values for scripting
/// Columns: score, status, team, employee id, employee name (no headers, no colors)
pub fn format_employee_tsv(results: &[EmployeeResult]) -> String {
    results
        .iter()
        .map(|r| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                format_score(r.final_score),
                r.status,
                r.team,
                r.employee_id,
                r.employee_name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format teams as tab-separated values for scripting
/// Columns: average score, employee count, team
pub fn format_team_tsv(teams: &[TeamAggregate]) -> String {
    teams
        .iter()
        .map(|t| {
            format!(
                "{}\t{}\t{}",
                format_score(t.average_final_score),
                t.total_employees,
                t.team
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
