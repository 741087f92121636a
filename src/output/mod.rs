//! Output module for presenting session results
//!
//! This module handles:
//! - Exporting a generated report to a dated text file
//! - Formatting crawl progress, result rows and notifications for a terminal

mod report;
mod table;

pub use report::{report_filename, write_report};
pub use table::{format_notification, format_progress, format_results, print_results};
