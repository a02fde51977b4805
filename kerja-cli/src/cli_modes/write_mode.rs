use crate::{
    cli::{AddArgs, IndexArgs},
    common::split_words,
    render::Renderer,
};
use anyhow::{Result, bail};
use chrono::{Local, NaiveDate, NaiveTime};
use kerja_core::{Entry, Kerja, LogbookError, Status};

/// Fields of an entry the user asked to change. `None` and empty text keep the current value.
pub struct EntryChanges<'a> {
    pub text: &'a [String],
    pub time: Option<NaiveTime>,
    pub status: Option<Status>,
}

pub fn add_entry(renderer: &Renderer, kerja: &Kerja, status: Status, args: &AddArgs) -> Result<()> {
    let date = args.date.date.unwrap_or_else(|| kerja.today());
    let (text, tags) = split_words(&args.text);
    if text.is_empty() && tags.is_empty() {
        bail!("No entry to save, because no text was received.");
    }
    let time = args.time.unwrap_or_else(|| Local::now().time());
    let entry = Entry::new(status, time, text, tags).normalized();

    kerja.writer.append(date, entry.clone())?;
    let index = kerja.reader.section(date)?.entries.len();

    renderer.print_info(&format!(
        "Added new entry to {}",
        kerja.files.month_path(date).display()
    ));
    println!("{}", renderer.format_entry_line(index, &entry, None));
    Ok(())
}

pub fn toggle_entry(renderer: &Renderer, kerja: &Kerja, args: &IndexArgs) -> Result<()> {
    let date = target(kerja, args);
    let entry = kerja.writer.toggle(date, args.index)?;
    renderer.print_info(&format!("Marked entry as {}", entry.status));
    println!("{}", renderer.format_entry_line(args.index, &entry, None));
    Ok(())
}

pub fn delete_entry(renderer: &Renderer, kerja: &Kerja, args: &IndexArgs) -> Result<()> {
    let date = target(kerja, args);
    let removed = kerja.writer.delete(date, args.index)?;
    renderer.print_info(&format!("Deleted entry from {}", renderer.format_day(date)));
    println!("{}", renderer.format_entry_line(args.index, &removed, None));
    Ok(())
}

pub fn edit_entry(
    renderer: &Renderer,
    kerja: &Kerja,
    args: &IndexArgs,
    changes: EntryChanges,
) -> Result<()> {
    let date = target(kerja, args);
    let section = kerja.reader.section(date)?;
    let current = section
        .entries
        .get(args.index - 1)
        .ok_or(LogbookError::InvalidIndex {
            index: args.index,
            count: section.entries.len(),
        })?;

    let updated = apply_changes(current, &changes);
    if &updated == current {
        renderer.print_info("Nothing to change.");
        return Ok(());
    }
    kerja.writer.edit(date, args.index, updated.clone())?;
    renderer.print_info(&format!("Updated entry on {}", renderer.format_day(date)));
    println!("{}", renderer.format_entry_line(args.index, &updated, None));
    Ok(())
}

fn apply_changes(current: &Entry, changes: &EntryChanges) -> Entry {
    let mut updated = current.clone();
    if !changes.text.is_empty() {
        let (text, tags) = split_words(changes.text);
        updated.text = text;
        updated.tags = tags;
    }
    if let Some(time) = changes.time {
        updated.time = time;
    }
    if let Some(status) = changes.status {
        updated.status = status;
    }
    updated
}

fn target(kerja: &Kerja, args: &IndexArgs) -> NaiveDate {
    args.date.date.unwrap_or_else(|| kerja.today())
}
