use crate::render::Renderer;
use anyhow::Result;
use chrono::NaiveDate;
use kerja_core::{Kerja, utils::date_utils::days_ending_at};

/// Prints one day. A day with nothing logged is reported, not treated as an error.
pub fn show_day(renderer: &Renderer, kerja: &Kerja, date: NaiveDate) -> Result<()> {
    match kerja.reader.section(date) {
        Ok(section) => renderer.print_section(&section),
        Err(e) if e.is_not_found() => renderer.print_missing_section(date),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Prints every logged day in the `days`-long window ending on `end`.
pub fn list_days(renderer: &Renderer, kerja: &Kerja, end: NaiveDate, days: u32) -> Result<()> {
    let (start, end) = days_ending_at(end, days);
    let sections = kerja.reader.sections_between(start, end)?;
    if sections.is_empty() {
        renderer.print_info(&format!(
            "No entries between {} and {}",
            renderer.format_day(start),
            renderer.format_day(end)
        ));
    } else {
        renderer.print_sections(&sections);
    }
    Ok(())
}
