pub mod formatter;

pub use formatter::{
    format_employee_table, format_employee_tsv, format_score, format_team_table, format_team_tsv,
    should_use_colors,
};
