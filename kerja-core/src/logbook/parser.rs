//! Tokenizes the content of a monthly logbook file into `DateSection`s.
//!
//! The file is expected to look like:
//! - A title line (e.g., `# November 2025`), which is skipped.
//! - Zero or more sections, each starting with `## YYYY-MM-DD`.
//! - Entry lines under each section: `- [ ] [HH:MM] text #tag`.
//!
//! Anything else is ignored so that hand-edited files stay readable.

use super::entry::{DateSection, Entry, Status};
use chrono::{NaiveDate, NaiveTime};
use std::io::{self, BufRead, Lines};

/// How a single (trimmed) line of a logbook file is understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Heading(NaiveDate),
    Entry(Entry),
    Other,
}

/// Streams sections out of a logbook one at a time.
///
/// Each call to [`Parser::next_section`] reads forward until the following dated
/// heading (or end of input), so a caller searching for one date stops reading
/// as soon as it finds it.
pub struct Parser<R> {
    lines: Lines<R>,
    pending: Option<NaiveDate>,
}

impl<'a> Parser<&'a [u8]> {
    pub fn from_text(content: &'a str) -> Self {
        Self::new(content.as_bytes())
    }
}

impl<R: BufRead> Parser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            pending: None,
        }
    }

    /// Returns the next section with all of its entries, or `None` once the input is exhausted.
    pub fn next_section(&mut self) -> io::Result<Option<DateSection>> {
        let date = match self.pending.take() {
            Some(date) => date,
            None => match self.seek_heading()? {
                Some(date) => date,
                None => return Ok(None),
            },
        };

        let mut section = DateSection::new(date);
        for line in self.lines.by_ref() {
            match classify_line(&line?) {
                Line::Heading(next) => {
                    self.pending = Some(next);
                    return Ok(Some(section));
                }
                Line::Entry(entry) => section.entries.push(entry),
                Line::Other => {}
            }
        }
        Ok(Some(section))
    }

    fn seek_heading(&mut self) -> io::Result<Option<NaiveDate>> {
        for line in self.lines.by_ref() {
            if let Some(date) = parse_heading(&line?) {
                return Ok(Some(date));
            }
        }
        Ok(None)
    }
}

impl<R: BufRead> Iterator for Parser<R> {
    type Item = io::Result<DateSection>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_section().transpose()
    }
}

/// Parses every section of `content`. Convenience for callers that already hold the text.
pub fn parse_sections(content: &str) -> Vec<DateSection> {
    Parser::from_text(content).filter_map(Result::ok).collect()
}

pub fn classify_line(raw: &str) -> Line {
    let line = raw.trim();
    if let Some(date) = parse_heading(line) {
        return Line::Heading(date);
    }
    if line.is_empty() || line.starts_with('#') {
        return Line::Other;
    }
    match parse_entry_line(line) {
        Some(entry) => Line::Entry(entry),
        None => Line::Other,
    }
}

/// `## 2025-11-04` -> `2025-11-04`. Exactly one space after the hashes.
pub fn parse_heading(line: &str) -> Option<NaiveDate> {
    let rest = line.trim().strip_prefix("## ")?;
    let bytes = rest.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits {
        return None;
    }
    NaiveDate::parse_from_str(rest, "%Y-%m-%d").ok()
}

/// Parses `- [x] [09:45] Fixed layout #ui #bug`.
///
/// A line that stops right after the time bracket is an entry with no text and no tags.
pub fn parse_entry_line(line: &str) -> Option<Entry> {
    let rest = line.trim().strip_prefix("- [")?;
    let mut chars = rest.chars();
    let status = match chars.next()? {
        ' ' => Status::Todo,
        'x' => Status::Done,
        _ => return None,
    };
    let rest = chars.as_str().strip_prefix("] [")?;
    let (clock, rest) = rest.split_at_checked(5)?;
    let time = parse_clock(clock)?;
    let remainder = if rest == "]" {
        ""
    } else {
        rest.strip_prefix("] ")?
    };

    let (text, tags) = split_text_and_tags(remainder);
    Some(Entry {
        status,
        time,
        text,
        tags,
    })
}

/// Strict `HH:MM`, 24-hour.
fn parse_clock(clock: &str) -> Option<NaiveTime> {
    let b = clock.as_bytes();
    if b.len() != 5 || b[2] != b':' {
        return None;
    }
    if ![b[0], b[1], b[3], b[4]].iter().all(u8::is_ascii_digit) {
        return None;
    }
    let hour = u32::from(b[0] - b'0') * 10 + u32::from(b[1] - b'0');
    let minute = u32::from(b[3] - b'0') * 10 + u32::from(b[4] - b'0');
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Splits the free-text remainder of an entry line into its text and its tags.
///
/// Tags start at the first ` #`; a remainder beginning with `#` is all tags.
pub fn split_text_and_tags(rest: &str) -> (String, Vec<String>) {
    let rest = rest.trim();
    if rest.is_empty() {
        return (String::new(), Vec::new());
    }
    if let Some(idx) = rest.find(" #") {
        (rest[..idx].trim().to_string(), parse_tags(&rest[idx + 1..]))
    } else if rest.starts_with('#') {
        (String::new(), parse_tags(rest))
    } else {
        (rest.to_string(), Vec::new())
    }
}

fn parse_tags(segment: &str) -> Vec<String> {
    segment
        .split_whitespace()
        .filter(|field| field.starts_with('#') && field.len() > 1)
        .map(|field| field.trim_start_matches('#'))
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
