pub mod check;
pub mod report;

pub use check::{handle_check_command, CheckArgs};
pub use report::{render_json, render_table, ReportRow};
