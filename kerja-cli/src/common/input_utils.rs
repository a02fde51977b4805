use chrono::{NaiveDate, NaiveTime};
use kerja_core::Status;

/// Parses a `YYYY-MM-DD` argument.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

/// Parses an `HH:MM` argument.
pub fn parse_clock(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| format!("invalid time '{s}', expected HH:MM"))
}

/// Parses a 1-based entry index.
pub fn parse_index(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("invalid index '{s}', expected a number starting at 1")),
        Ok(index) => Ok(index),
    }
}

pub fn parse_status(s: &str) -> Result<Status, String> {
    s.trim()
        .parse::<Status>()
        .map_err(|_| format!("invalid status '{s}', expected todo or done"))
}

/// Splits command-line words into entry text and tags.
///
/// Words starting with `#` become tags (leading `#`s stripped, a bare `#` is dropped);
/// every other word is joined back into the text.
pub fn split_words(words: &[String]) -> (String, Vec<String>) {
    let mut text = Vec::new();
    let mut tags = Vec::new();
    for word in words.iter().flat_map(|w| w.split_whitespace()) {
        if word.starts_with('#') {
            let tag = word.trim_start_matches('#');
            if !tag.is_empty() {
                tags.push(tag.to_string());
            }
        } else {
            text.push(word);
        }
    }
    (text.join(" "), tags)
}
