use crate::{
    Config,
    files::FileManager,
    logbook::{self, Reader, SearchHit, SearchOptions, Writer, search},
    utils::date_utils::month_bounds,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;

/// The central struct for all logbook operations.
///
/// Holds the configuration plus a [`Reader`] and [`Writer`] sharing one [`FileManager`].
#[derive(Debug)]
pub struct Kerja {
    pub config: Config,
    pub files: FileManager,
    pub reader: Reader,
    pub writer: Writer,
}

impl Kerja {
    /// Creates a new `Kerja` instance, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::with_config(config)
    }

    /// Creates a new `Kerja` instance with a specific `Config`.
    ///
    /// This also ensures that the root directory exists.
    pub fn with_config(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.root_dir)
            .with_context(|| format!("creating root dir {}", config.root_dir.display()))?;
        let files = FileManager::new(&config.root_dir)?;

        Ok(Self {
            reader: Reader::new(files.clone()),
            writer: Writer::new(files.clone()),
            files,
            config,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.config.reference_date
    }

    /// Searches every section of the month containing `date`.
    pub fn search_month(
        &self,
        date: NaiveDate,
        options: &SearchOptions,
    ) -> logbook::Result<Vec<SearchHit>> {
        let (first, last) = month_bounds(date);
        let sections = self.reader.sections_between(first, last)?;
        Ok(search(&sections, options))
    }
}
