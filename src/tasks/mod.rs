//! Background Tasks Module
//!
//! Contains background tasks that run periodically during service operation.
//!
//! # Tasks
//! - Metrics report: logs cache occupancy and hit rate at configured
//!   intervals

mod report;

pub use report::spawn_report_task;
