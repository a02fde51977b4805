use crate::logbook::{LogbookError, Result, format_utils::format_month_header};
use chrono::NaiveDate;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

pub fn year_folder_name(date: NaiveDate) -> String {
    format!("{}", date.format("%Y"))
}

pub fn month_file_name(date: NaiveDate) -> String {
    format!("{}.md", date.format("%Y-%m"))
}

/// Knows where monthly logbooks live on disk: `{root}/YYYY/YYYY-MM.md`.
#[derive(Debug, Clone)]
pub struct FileManager {
    base_path: PathBuf,
}

impl FileManager {
    /// Creates a manager rooted at `root`. Relative roots are resolved against the current directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let base_path = std::path::absolute(root).map_err(LogbookError::io("resolve", root))?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of the file owning `date`. The file may not exist yet.
    pub fn month_path(&self, date: NaiveDate) -> PathBuf {
        self.base_path
            .join(year_folder_name(date))
            .join(month_file_name(date))
    }

    /// Makes sure the month file for `date` exists, writing the `# Month Year` title
    /// only when the file is empty. Existing content is never touched.
    pub fn ensure_month_file(&self, date: NaiveDate) -> Result<PathBuf> {
        let path = self.month_path(date);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(LogbookError::io("create directory", parent))?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(LogbookError::io("open", &path))?;

        let len = file
            .metadata()
            .map_err(LogbookError::io("stat", &path))?
            .len();
        if len == 0 {
            file.write_all(format_month_header(date).as_bytes())
                .map_err(LogbookError::io("write month header to", &path))?;
            debug!(path = %path.display(), "created month file");
        }
        Ok(path)
    }
}
