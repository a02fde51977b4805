use super::theme::OneDark;
use chrono::NaiveDate;
use kerja_core::{DateSection, Entry, SearchHit, Status};
use regex::{Captures, Regex, RegexBuilder};
use termimad::{MadSkin, crossterm::style::Stylize};

#[derive(Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub use_color: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: OneDark::skin(),
            opts: match config {
                Some(config) => config,
                None => RenderOptions {
                    date_format: "%Y-%m-%d".to_string(),
                    use_color: true,
                },
            },
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            println!("{}", md.trim_end());
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    pub fn format_day(&self, date: NaiveDate) -> String {
        date.format(&self.opts.date_format).to_string()
    }

    /// `N. [x] HH:MM text #tag`, the same shape the entry has on disk plus its index.
    pub fn format_entry_line(&self, index: usize, entry: &Entry, highlight: Option<&Regex>) -> String {
        let mut number = format!("{index}.");
        let mut marker = format!("[{}]", entry.status.marker());
        let mut time = entry.time.format("%H:%M").to_string();
        let mut text = entry.text.clone();
        let mut tags = entry
            .tags
            .iter()
            .map(|tag| format!("#{tag}"))
            .collect::<Vec<_>>()
            .join(" ");

        if self.opts.use_color {
            number = number.with(OneDark::COMMENT).to_string();
            marker = match entry.status {
                Status::Done => marker.with(OneDark::GREEN).to_string(),
                Status::Todo => marker.with(OneDark::YELLOW).to_string(),
            };
            time = time.with(OneDark::BLUE).to_string();
            if let Some(re) = highlight {
                text = re
                    .replace_all(&text, |caps: &Captures| {
                        caps[0].to_string().with(OneDark::RED).bold().to_string()
                    })
                    .into_owned();
            }
            tags = tags.with(OneDark::CYAN).to_string();
        }

        [number, marker, time, text, tags]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn print_section(&self, section: &DateSection) {
        self.print_md(&format!("## {}", self.format_day(section.date)));
        if section.entries.is_empty() {
            self.print_md("(no entries)");
            return;
        }
        for (i, entry) in section.entries.iter().enumerate() {
            println!("{}", self.format_entry_line(i + 1, entry, None));
        }
    }

    pub fn print_sections(&self, sections: &[DateSection]) {
        for (i, section) in sections.iter().enumerate() {
            if i > 0 {
                println!();
            }
            self.print_section(section);
        }
    }

    pub fn print_missing_section(&self, date: NaiveDate) {
        self.print_info(&format!("No entries for {}", self.format_day(date)));
    }

    pub fn print_search_results(&self, term: &str, case_sensitive: bool, hits: &[SearchHit]) {
        if hits.is_empty() {
            self.print_info(&format!("No entries match '{term}'"));
            return;
        }
        self.print_info(&format!("{} entries match '{term}'", hits.len()));

        let highlight = highlighter(term, case_sensitive);
        let mut current: Option<NaiveDate> = None;
        for hit in hits {
            if current != Some(hit.date) {
                if current.is_some() {
                    println!();
                }
                self.print_md(&format!("## {}", self.format_day(hit.date)));
                current = Some(hit.date);
            }
            println!(
                "{}",
                self.format_entry_line(hit.index, &hit.entry, highlight.as_ref())
            );
        }
    }
}

/// Matches the search term inside entry text. Tag terms highlight the bare tag name.
fn highlighter(term: &str, case_sensitive: bool) -> Option<Regex> {
    let needle = term.trim_start_matches('#');
    if needle.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(!case_sensitive)
        .build()
        .ok()
}
