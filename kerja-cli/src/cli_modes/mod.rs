mod kerja_cli;
mod read_mode;
mod search_mode;
mod write_mode;

pub use kerja_cli::KerjaCli;
