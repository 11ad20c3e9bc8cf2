pub mod format;
pub mod rows;
pub mod table;

pub use format::FileFormat;
pub use rows::{check_required_columns, to_input_rows, REQUIRED_COLUMNS};
pub use table::{decode_csv, decode_excel, Table};

use std::fs;
use std::path::Path;

use crate::error::IngestError;
use crate::scoring::InputRow;

/// Which view of the scorecard the caller wants; decides the column contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Employees,
    Teams,
}

/// Decode an uploaded file into a table, picking the decoder by extension.
pub fn decode(filename: &str, bytes: &[u8]) -> Result<Table, IngestError> {
    match FileFormat::from_filename(filename) {
        Some(FileFormat::Csv) => decode_csv(bytes),
        Some(FileFormat::Excel) => decode_excel(bytes),
        None => Err(IngestError::UnsupportedFormat),
    }
}

/// Decode, check the column contract, and convert to engine rows.
///
/// Team comparisons check for the `Team` column before anything else.
pub fn load_rows(
    filename: &str,
    bytes: &[u8],
    comparison: Comparison,
) -> Result<Vec<InputRow>, IngestError> {
    let table = decode(filename, bytes)?;

    if comparison == Comparison::Teams && !table.has_column(rows::TEAM) {
        return Err(IngestError::MissingTeamColumn);
    }
    check_required_columns(&table)?;

    to_input_rows(&table)
}

/// [`load_rows`] for a file on disk; its name picks the decoder.
pub fn load_file(path: &Path, comparison: Comparison) -> Result<Vec<InputRow>, IngestError> {
    let bytes = fs::read(path).map_err(|e| IngestError::read(format!("{}: {}", path.display(), e)))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    load_rows(&filename, &bytes, comparison)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{self, Cell, ScoringConfig};

    const FULL: &str = "Employee ID,Employee Name,Team,Total Tasks,Completed Tasks,Attendance Days,Total Working Days,Task Complexity,Expected Hours,Actual Hours\n1,Ada,Core,10,8,18,20,Hard,40,45\n";
    const NO_TEAM_COLUMN: &str = "Employee ID,Employee Name,Total Tasks,Completed Tasks,Attendance Days,Total Working Days,Task Complexity,Expected Hours,Actual Hours\n1,Ada,10,8,18,20,Hard,40,45\n";

    #[test]
    fn test_load_csv_rows() {
        let rows = load_rows("staff.csv", FULL.as_bytes(), Comparison::Employees).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].team.as_deref(), Some("Core"));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_rows("staff.txt", FULL.as_bytes(), Comparison::Employees).unwrap_err();
        assert_eq!(err, IngestError::UnsupportedFormat);
    }

    #[test]
    fn test_employees_do_not_need_team() {
        let rows = load_rows("staff.csv", NO_TEAM_COLUMN.as_bytes(), Comparison::Employees).unwrap();
        assert_eq!(rows[0].team, None);
    }

    #[test]
    fn test_teams_need_team_column() {
        let err = load_rows("staff.csv", NO_TEAM_COLUMN.as_bytes(), Comparison::Teams).unwrap_err();
        assert_eq!(err, IngestError::MissingTeamColumn);
    }

    #[test]
    fn test_team_column_checked_first() {
        let err = load_rows("staff.csv", b"Employee ID\n1\n", Comparison::Teams).unwrap_err();
        assert_eq!(err, IngestError::MissingTeamColumn);
    }

    #[test]
    fn test_missing_required_column_on_team_upload() {
        let err = load_rows("staff.csv", b"Team,Employee ID\nCore,1\n", Comparison::Teams).unwrap_err();
        assert_eq!(err, IngestError::MissingColumn("Employee Name".to_string()));
    }

    #[test]
    fn test_decode_failure_surfaces_as_read_error() {
        let err = load_rows("staff.xlsx", b"not a zip", Comparison::Employees).unwrap_err();
        assert!(matches!(err, IngestError::Read(_)));
    }

    #[test]
    fn test_padded_team_header_is_not_team() {
        let csv = FULL.replacen(",Team,", ",Team ,", 1);
        let err = load_rows("staff.csv", csv.as_bytes(), Comparison::Teams).unwrap_err();
        assert_eq!(err, IngestError::MissingTeamColumn);
    }

    #[test]
    fn test_padded_complexity_weighs_default() {
        let csv = "Employee ID,Employee Name,Team,Total Tasks,Completed Tasks,Attendance Days,Total Working Days,Task Complexity,Expected Hours,Actual Hours\n1,Ada,Core,10,8,0,0, Hard,0,0\n";
        let rows = load_rows("staff.csv", csv.as_bytes(), Comparison::Employees).unwrap();
        assert_eq!(rows[0].task_complexity, " Hard");

        let card = scoring::score(&rows, &ScoringConfig::default());
        assert_eq!(card.employees[0].final_score, 56.0);
        assert_eq!(card.employees[0].task_complexity, " Hard");
    }

    #[test]
    fn test_padded_team_is_its_own_bucket() {
        let csv = "Employee ID,Employee Name,Team,Total Tasks,Completed Tasks,Attendance Days,Total Working Days,Task Complexity,Expected Hours,Actual Hours\n1,Ada,Core,10,8,18,20,Hard,40,45\n2,Bob,Core ,10,8,18,20,Hard,40,45\n";
        let rows = load_rows("staff.csv", csv.as_bytes(), Comparison::Teams).unwrap();
        let card = scoring::score(&rows, &ScoringConfig::default());
        let teams: Vec<_> = card.teams.iter().map(|t| t.team.as_str()).collect();
        assert_eq!(teams, vec!["Core", "Core "]);
        assert!(card.teams.iter().all(|t| t.total_employees == 1));
    }

    #[test]
    fn test_load_xlsx_rows() {
        let bytes = table::fixtures::xlsx(&[&[
            &[
                "Employee ID",
                "Employee Name",
                "Team",
                "Total Tasks",
                "Completed Tasks",
                "Attendance Days",
                "Total Working Days",
                "Task Complexity",
                "Expected Hours",
                "Actual Hours",
            ],
            &["1", "Ada", "Core", "10", "8", "18", "20", "Hard", "40", "45.5"],
            &["2", "Bob", "", "10", "5", "20", "20", "Easy", "40", "40"],
        ]]);
        let rows = load_rows("staff.XLSX", &bytes, Comparison::Teams).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].employee_id, Cell::Int(1));
        assert_eq!(rows[0].team.as_deref(), Some("Core"));
        assert_eq!(rows[0].expected_hours, 40.0);
        assert_eq!(rows[0].actual_hours, 45.5);
        assert_eq!(rows[1].team, None);
        assert_eq!(rows[1].team_label(), "No Team");
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staff.csv");
        fs::write(&path, FULL).unwrap();
        let rows = load_file(&path, Comparison::Teams).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("gone.csv"), Comparison::Employees).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read the file: "));
    }
}
