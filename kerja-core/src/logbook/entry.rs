use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

/// Whether an entry still needs doing or is already done.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, AsRefStr, Display, EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Todo,
    Done,
}

impl Status {
    /// Todo becomes done and done becomes todo.
    pub fn toggled(self) -> Self {
        match self {
            Status::Todo => Status::Done,
            Status::Done => Status::Todo,
        }
    }

    /// The character written between the checkbox brackets.
    pub fn marker(self) -> char {
        match self {
            Status::Todo => ' ',
            Status::Done => 'x',
        }
    }
}

/// A single task line within a dated section.
///
/// The entry carries no date of its own: the section it lives under decides it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub status: Status,
    #[serde(serialize_with = "serialize_clock")]
    pub time: NaiveTime,
    pub text: String,
    pub tags: Vec<String>,
}

impl Entry {
    pub fn new(status: Status, time: NaiveTime, text: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            status,
            time,
            text: text.into(),
            tags,
        }
    }

    /// Drops seconds and sub-second precision, which the file format cannot hold.
    pub fn normalized(mut self) -> Self {
        self.time = NaiveTime::from_hms_opt(self.time.hour(), self.time.minute(), 0)
            .unwrap_or(self.time);
        self
    }
}

fn serialize_clock<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format("%H:%M"))
}

/// All entries logged under one `## YYYY-MM-DD` heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateSection {
    #[serde(serialize_with = "serialize_day")]
    pub date: NaiveDate,
    pub entries: Vec<Entry>,
}

impl DateSection {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            entries: Vec::new(),
        }
    }
}

fn serialize_day<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format("%Y-%m-%d"))
}
