use crate::error::IngestError;
use crate::scoring::InputRow;

use super::table::Table;

pub const EMPLOYEE_ID: &str = "Employee ID";
pub const EMPLOYEE_NAME: &str = "Employee Name";
pub const TEAM: &str = "Team";
pub const TOTAL_TASKS: &str = "Total Tasks";
pub const COMPLETED_TASKS: &str = "Completed Tasks";
pub const ATTENDANCE_DAYS: &str = "Attendance Days";
pub const TOTAL_WORKING_DAYS: &str = "Total Working Days";
pub const TASK_COMPLEXITY: &str = "Task Complexity";
pub const EXPECTED_HOURS: &str = "Expected Hours";
pub const ACTUAL_HOURS: &str = "Actual Hours";

/// Columns every upload must carry, in the order they are checked.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    EMPLOYEE_ID,
    EMPLOYEE_NAME,
    TOTAL_TASKS,
    COMPLETED_TASKS,
    ATTENDANCE_DAYS,
    TOTAL_WORKING_DAYS,
    TASK_COMPLEXITY,
    EXPECTED_HOURS,
    ACTUAL_HOURS,
];

/// Report the first required column the table lacks.
pub fn check_required_columns(table: &Table) -> Result<(), IngestError> {
    match REQUIRED_COLUMNS.iter().find(|c| !table.has_column(c)) {
        Some(missing) => Err(IngestError::MissingColumn(missing.to_string())),
        None => Ok(()),
    }
}

/// Column positions resolved once per table.
struct Columns {
    employee_id: usize,
    employee_name: usize,
    team: Option<usize>,
    total_tasks: usize,
    completed_tasks: usize,
    attendance_days: usize,
    total_working_days: usize,
    task_complexity: usize,
    expected_hours: usize,
    actual_hours: usize,
}

impl Columns {
    fn resolve(table: &Table) -> Result<Self, IngestError> {
        let col = |name: &str| {
            table
                .column(name)
                .ok_or_else(|| IngestError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            employee_id: col(EMPLOYEE_ID)?,
            employee_name: col(EMPLOYEE_NAME)?,
            team: table.column(TEAM),
            total_tasks: col(TOTAL_TASKS)?,
            completed_tasks: col(COMPLETED_TASKS)?,
            attendance_days: col(ATTENDANCE_DAYS)?,
            total_working_days: col(TOTAL_WORKING_DAYS)?,
            task_complexity: col(TASK_COMPLEXITY)?,
            expected_hours: col(EXPECTED_HOURS)?,
            actual_hours: col(ACTUAL_HOURS)?,
        })
    }
}

/// Convert a table that passed [`check_required_columns`] into engine rows.
///
/// Numeric columns must hold finite numbers; anything else is reported with
/// its 1-based data row so the sender can find it.
pub fn to_input_rows(table: &Table) -> Result<Vec<InputRow>, IngestError> {
    let cols = Columns::resolve(table)?;

    (0..table.len())
        .map(|i| -> Result<InputRow, IngestError> {
            let number = |col: usize, name: &str| -> Result<f64, IngestError> {
                let cell = table.cell(i, col);
                cell.as_f64().filter(|v| v.is_finite()).ok_or_else(|| {
                    IngestError::read(format!(
                        "row {}, column '{}': expected a number, found '{}'",
                        i + 1,
                        name,
                        cell
                    ))
                })
            };

            Ok(InputRow {
                employee_id: table.cell(i, cols.employee_id).clone(),
                employee_name: table.cell(i, cols.employee_name).clone(),
                team: cols.team.and_then(|c| table.cell(i, c).label()),
                total_tasks: number(cols.total_tasks, TOTAL_TASKS)?,
                completed_tasks: number(cols.completed_tasks, COMPLETED_TASKS)?,
                attendance_days: number(cols.attendance_days, ATTENDANCE_DAYS)?,
                total_working_days: number(cols.total_working_days, TOTAL_WORKING_DAYS)?,
                task_complexity: table
                    .cell(i, cols.task_complexity)
                    .label()
                    .unwrap_or_default(),
                expected_hours: number(cols.expected_hours, EXPECTED_HOURS)?,
                actual_hours: number(cols.actual_hours, ACTUAL_HOURS)?,
            })
        })
        .collect()
}
