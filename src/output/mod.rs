//! Leaderboard reports and their renderings

pub mod formatter;
pub mod report;

pub use formatter::{save_report_to_file, ReportGenerator};
pub use report::LeaderboardReport;
