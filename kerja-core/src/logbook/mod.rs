mod entry;
mod errors;
pub mod format_utils;
pub mod parser;
mod reader;
mod search;
mod writer;

pub use entry::{DateSection, Entry, Status};
pub use errors::{LogbookError, Result};
pub use parser::Parser;
pub use reader::Reader;
pub use search::{SearchHit, SearchOptions, search};
pub use writer::Writer;
