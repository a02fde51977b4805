use super::entry::{DateSection, Entry};
use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Properties that control how [`search`] matches entries.
#[derive(Clone, Debug, Default)]
pub struct SearchOptions<'a> {
    /// Plain text matches entry text or tags; a leading `#` restricts the match to tags.
    pub term: &'a str,
    pub case_sensitive: bool,
    /// With a `#tag` term, also match entries whose text contains the tag name.
    pub include_text: bool,
}

/// One matching entry and where it lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    #[serde(serialize_with = "serialize_day")]
    pub date: NaiveDate,
    /// 1-based position inside its section, usable with toggle/edit/delete.
    pub index: usize,
    pub entry: Entry,
}

fn serialize_day<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format("%Y-%m-%d"))
}

/// Returns every entry across `sections` that matches `options.term`, in section order.
pub fn search(sections: &[DateSection], options: &SearchOptions) -> Vec<SearchHit> {
    let tag_only = options.term.starts_with('#');
    let fold = |s: &str| {
        if options.case_sensitive {
            s.to_string()
        } else {
            s.to_lowercase()
        }
    };
    let needle = fold(options.term);
    let tag_needle = fold(options.term.trim_start_matches('#'));

    let matches = |entry: &Entry| {
        let text = fold(&entry.text);
        if tag_only {
            if options.include_text && !tag_needle.is_empty() && text.contains(&tag_needle) {
                return true;
            }
            return entry.tags.iter().any(|tag| fold(tag) == tag_needle);
        }
        text.contains(&needle)
            || entry.tags.iter().any(|tag| {
                let tag = fold(tag);
                tag.contains(&needle) || tag == tag_needle
            })
    };

    let matches = &matches;
    sections
        .iter()
        .flat_map(|section| {
            section
                .entries
                .iter()
                .enumerate()
                .filter(move |&(_, entry)| matches(entry))
                .map(move |(i, entry)| SearchHit {
                    date: section.date,
                    index: i + 1,
                    entry: entry.clone(),
                })
        })
        .collect()
}
