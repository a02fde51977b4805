use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides where logbooks are stored.
pub const HOME_ENV: &str = "KERJA_HOME";

/// Folder under the user's home directory used when nothing else is configured.
pub const DEFAULT_DIR_NAME: &str = ".kerja";

/// Decides the logbook root: `$KERJA_HOME`, then the configured `root_dir`, then `~/.kerja`.
pub fn resolve_base_path(configured: Option<&Path>) -> PathBuf {
    let home = BaseDirs::new().map(|b| b.home_dir().to_path_buf());
    let env_override = std::env::var(HOME_ENV).ok();
    resolve_from(env_override.as_deref(), configured, home.as_deref())
}

fn resolve_from(env_override: Option<&str>, configured: Option<&Path>, home: Option<&Path>) -> PathBuf {
    if let Some(raw) = env_override.map(str::trim).filter(|s| !s.is_empty()) {
        return expand_tilde(Path::new(raw), home);
    }
    if let Some(configured) = configured {
        return expand_tilde(configured, home);
    }
    match home {
        Some(home) => home.join(DEFAULT_DIR_NAME),
        None => PathBuf::from(".").join(DEFAULT_DIR_NAME),
    }
}

/// Expands a leading `~` to the home directory. Other paths are returned unchanged.
pub fn expand_tilde(path: &Path, home: Option<&Path>) -> PathBuf {
    let (Some(home), Ok(rest)) = (home, path.strip_prefix("~")) else {
        return path.to_path_buf();
    };
    home.join(rest)
}
