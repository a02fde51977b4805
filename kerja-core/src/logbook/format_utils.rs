//! Pure Markdown rendering helpers. Every line produced here is accepted by the parser.
//!
//! Month header: `# November 2025`
//! Date heading: `## 2025-11-04`
//! Entry line:   `- [x] [10:30] Update docs #docs`

use super::entry::Entry;
use chrono::NaiveDate;

/// `# November 2025` followed by a blank line.
pub fn format_month_header(date: NaiveDate) -> String {
    format!("# {}\n\n", date.format("%B %Y"))
}

pub fn format_date_heading(date: NaiveDate) -> String {
    format!("## {}", date.format("%Y-%m-%d"))
}

/// Render an entry line. The text segment is omitted when empty, and so are tags.
pub fn format_entry(entry: &Entry) -> String {
    let mut line = format!(
        "- [{}] [{}]",
        entry.status.marker(),
        entry.time.format("%H:%M")
    );
    if !entry.text.is_empty() {
        line.push(' ');
        line.push_str(&entry.text);
    }
    for tag in &entry.tags {
        line.push_str(" #");
        line.push_str(tag);
    }
    line
}
