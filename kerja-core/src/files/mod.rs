mod env;
mod manager;

pub use env::{DEFAULT_DIR_NAME, HOME_ENV, expand_tilde, resolve_base_path};
pub use manager::{FileManager, month_file_name, year_folder_name};
