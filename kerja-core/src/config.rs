use crate::files::{expand_tilde, resolve_base_path};
use anyhow::{Context, Result};
use chrono::{
    Local, NaiveDate,
    format::{Item, StrftimeItems},
};
use directories::BaseDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::warn;

const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute or home-relative directory where the `YYYY/YYYY-MM.md` files live.
    /// `$KERJA_HOME` takes precedence over the config file.
    pub root_dir: PathBuf,
    /// How dates are shown in command output (chrono format). Default is `%Y-%m-%d`.
    pub date_format: String,
    /// The date to use as "today".
    pub reference_date: NaiveDate,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    root_dir: Option<PathBuf>,
    date_format: Option<String>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native) and apply defaults.
    ///
    /// A config file that cannot be read or parsed is reported and otherwise ignored.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|error| {
            warn!("ignoring config file: {error:#}");
            FileConfig::default()
        });
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let home = BaseDirs::new().map(|b| b.home_dir().to_path_buf());
        let configured = file_config
            .root_dir
            .map(|dir| expand_tilde(&dir, home.as_deref()));

        Self {
            root_dir: resolve_base_path(configured.as_deref()),
            date_format: file_config
                .date_format
                .filter(|format| is_valid_date_format(format))
                .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
            reference_date: Local::now().date_naive(),
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b.home_dir().join(".config").join("kerja").join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("kerja").join("config.toml");
            if !v.contains(&native) {
                v.push(native);
            }
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}

/// Rejects chrono format strings that would fail at render time.
fn is_valid_date_format(format: &str) -> bool {
    let valid = !StrftimeItems::new(format).any(|item| matches!(item, Item::Error));
    if !valid {
        warn!("invalid date_format {format:?}, using {DEFAULT_DATE_FORMAT}");
    }
    valid
}
