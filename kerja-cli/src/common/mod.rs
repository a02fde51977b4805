mod input_utils;

pub use input_utils::{parse_clock, parse_date, parse_index, parse_status, split_words};
