use super::{
    entry::DateSection,
    errors::{LogbookError, Result},
    parser::Parser,
};
use crate::{files::FileManager, utils::date_utils::get_dates_in_range};
use chrono::NaiveDate;
use std::{fs::File, io::BufReader};
use tracing::debug;

/// Loads sections from the monthly logbook files.
///
/// Nothing is cached: every call reads the file again, so edits made by hand
/// between calls are always picked up.
#[derive(Debug, Clone)]
pub struct Reader {
    manager: FileManager,
}

impl Reader {
    pub fn new(manager: FileManager) -> Self {
        Self { manager }
    }

    /// Returns the section logged under `date`.
    ///
    /// Fails with [`LogbookError::SectionNotFound`] when the month file has no heading for it.
    pub fn section(&self, date: NaiveDate) -> Result<DateSection> {
        let path = self.manager.ensure_month_file(date)?;
        let file = File::open(&path).map_err(LogbookError::io("open", &path))?;

        let mut parser = Parser::new(BufReader::new(file));
        while let Some(section) = parser
            .next_section()
            .map_err(LogbookError::io("read", &path))?
        {
            if section.date == date {
                debug!(%date, entries = section.entries.len(), path = %path.display(), "section loaded");
                return Ok(section);
            }
        }
        Err(LogbookError::SectionNotFound { date })
    }

    /// All sections from `start` to `end` (inclusive), in date order.
    ///
    /// Days without a section are skipped. An `end` before `start` gives an empty list.
    pub fn sections_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DateSection>> {
        let mut sections = Vec::new();
        for date in get_dates_in_range(start, end) {
            match self.section(date) {
                Ok(section) => sections.push(section),
                Err(LogbookError::SectionNotFound { .. }) => continue,
                Err(error) => return Err(error),
            }
        }
        Ok(sections)
    }
}
