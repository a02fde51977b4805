pub mod config;
pub mod files;
mod kerja;
pub mod logbook;
pub mod utils;

pub use config::Config;
pub use kerja::Kerja;
pub use logbook::{
    DateSection, Entry, LogbookError, Reader, SearchHit, SearchOptions, Status, Writer,
};
