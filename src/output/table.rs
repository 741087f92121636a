//! Plain-text rendering of session data
//!
//! This module formats crawl progress, result rows and notifications for a
//! terminal.

use crate::api::SeoResult;
use crate::notify::{Notification, NotificationKind};
use crate::state::CrawlTask;

const BAR_WIDTH: usize = 20;

/// One-line progress summary, e.g. `[##########----------]  50% (10/20 pages) running`
pub fn format_progress(task: &CrawlTask) -> String {
    let filled = (task.progress as usize * BAR_WIDTH) / 100;
    format!(
        "[{}{}] {:>3}% ({}/{} pages) {}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        task.progress,
        task.crawled_pages,
        task.total_pages,
        task.status
    )
}

/// Prefixes a notification with a success/error marker
pub fn format_notification(notification: &Notification) -> String {
    let marker = match notification.kind {
        NotificationKind::Success => "✓",
        NotificationKind::Error => "✗",
    };
    format!("{} {}", marker, notification.message)
}

/// Formats result rows as an aligned text table
pub fn format_results(results: &[SeoResult]) -> String {
    if results.is_empty() {
        return "No analysis results yet. Start a crawl to collect some.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<40} {:>6} {:<30} {:<14} {:<14} {:<16} {}\n",
        "URL", "Status", "Title", "Headers", "Links", "Images", "Performance"
    ));

    for row in results {
        let title = if row.title_tag.is_empty() {
            "No title"
        } else {
            row.title_tag.as_str()
        };
        let images = if row.images_without_alt > 0 {
            format!("{} ({} no alt)", row.image_count, row.images_without_alt)
        } else {
            row.image_count.to_string()
        };
        let mut perf = format!("{:.2}s {}w", row.load_time, row.word_count);
        if row.mobile_friendly {
            perf.push_str(" mobile");
        }
        if row.has_schema {
            perf.push_str(" schema");
        }

        out.push_str(&format!(
            "{:<40} {:>6} {:<30} {:<14} {:<14} {:<16} {}\n",
            truncate(&row.url, 40),
            row.status_code,
            truncate(title, 30),
            format!("{}/{}/{}", row.h1_count, row.h2_count, row.h3_count),
            format!("{} int/{} ext", row.internal_links, row.external_links),
            images,
            perf
        ));
    }

    out
}

/// Prints result rows to stdout
pub fn print_results(results: &[SeoResult]) {
    println!("=== SEO Analysis Results ({}) ===\n", results.len());
    print!("{}", format_results(results));
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
