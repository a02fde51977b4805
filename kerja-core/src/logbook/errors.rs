use chrono::NaiveDate;
use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LogbookError>;

#[derive(Debug, Error)]
pub enum LogbookError {
    /// The date is valid but nothing has been logged under it yet.
    #[error("no entries for {date}")]
    SectionNotFound { date: NaiveDate },

    /// A 1-based entry index outside `[1, count]`.
    #[error("entry index {index} out of range (section has {count} entries)")]
    InvalidIndex { index: usize, count: usize },

    #[error("failed to {op} {}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LogbookError {
    /// Adapter for `map_err` that tags an `io::Error` with what was being done and where.
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| LogbookError::Io { op, path, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LogbookError::SectionNotFound { .. })
    }
}
