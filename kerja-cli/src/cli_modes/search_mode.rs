use crate::render::Renderer;
use anyhow::{Result, bail};
use chrono::NaiveDate;
use kerja_core::{Kerja, SearchOptions};

pub struct SearchArgs<'a> {
    pub term: &'a str,
    pub case_sensitive: bool,
    pub include_text: bool,
    pub json: bool,
}

/// Searches the month containing `date`.
pub fn search_mode(
    renderer: &Renderer,
    kerja: &Kerja,
    date: NaiveDate,
    args: SearchArgs,
) -> Result<()> {
    let term = search_term(args.term)?;
    let options = SearchOptions {
        term,
        case_sensitive: args.case_sensitive,
        include_text: args.include_text,
    };
    let hits = kerja.search_month(date, &options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else {
        renderer.print_search_results(term, args.case_sensitive, &hits);
    }
    Ok(())
}

/// The trimmed term; a blank term is an error.
fn search_term(term: &str) -> Result<&str> {
    let term = term.trim();
    if term.is_empty() {
        bail!("search term is required");
    }
    Ok(term)
}
