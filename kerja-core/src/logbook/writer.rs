//! Targeted edits to monthly logbook files.
//!
//! Every operation loads the whole file as lines, locates the target section and
//! the absolute line index of each of its entries, changes exactly the lines it
//! needs to, and swaps the result in with a temp-file-and-rename.

use super::{
    entry::{DateSection, Entry},
    errors::{LogbookError, Result},
    format_utils::{format_date_heading, format_entry},
    parser::{parse_entry_line, parse_heading},
};
use crate::files::FileManager;
use chrono::NaiveDate;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Handles append, toggle, edit and delete on the monthly logbook files.
#[derive(Debug, Clone)]
pub struct Writer {
    manager: FileManager,
}

/// A month file split into lines, plus where the target section sits in it.
struct LoadedFile {
    path: PathBuf,
    lines: Vec<String>,
    section: Option<SectionSpan>,
}

struct SectionSpan {
    section: DateSection,
    /// One past the last body line: the next dated heading, or `lines.len()`.
    end: usize,
    /// Absolute line index of each parsed entry, in section order.
    entry_lines: Vec<usize>,
}

impl SectionSpan {
    /// Maps a 1-based entry ordinal to its absolute line index.
    fn line_of(&self, index: usize) -> Result<usize> {
        let count = self.entry_lines.len();
        if index == 0 || index > count {
            return Err(LogbookError::InvalidIndex { index, count });
        }
        Ok(self.entry_lines[index - 1])
    }
}

impl Writer {
    pub fn new(manager: FileManager) -> Self {
        Self { manager }
    }

    /// Adds `entry` at the end of the section for `date`, creating the section if needed.
    ///
    /// Entries are never re-sorted: the new one always lands after the existing ones.
    pub fn append(&self, date: NaiveDate, entry: Entry) -> Result<()> {
        let entry = entry.normalized();
        let LoadedFile {
            path,
            mut lines,
            section,
        } = self.load_section(date)?;

        match section {
            None => {
                if lines.last().is_some_and(|last| !last.trim().is_empty()) {
                    lines.push(String::new());
                }
                lines.push(format_date_heading(date));
                lines.push(format_entry(&entry));
            }
            Some(span) => {
                lines.insert(span.end, format_entry(&entry));
            }
        }

        write_lines(&path, &lines)?;
        debug!(%date, path = %path.display(), "entry appended");
        Ok(())
    }

    /// Flips todo/done on the entry at `index` (1-based) and returns the updated entry.
    pub fn toggle(&self, date: NaiveDate, index: usize) -> Result<Entry> {
        let LoadedFile {
            path,
            mut lines,
            section,
        } = self.load_section(date)?;
        let span = section.ok_or(LogbookError::SectionNotFound { date })?;
        let line = span.line_of(index)?;

        let mut entry = span.section.entries[index - 1].clone();
        entry.status = entry.status.toggled();
        lines[line] = format_entry(&entry);

        write_lines(&path, &lines)?;
        debug!(%date, index, status = %entry.status, "entry toggled");
        Ok(entry)
    }

    /// Replaces the entry at `index` (1-based) with `updated`.
    ///
    /// Nothing is merged from the old entry: callers carry over the fields they keep.
    pub fn edit(&self, date: NaiveDate, index: usize, updated: Entry) -> Result<()> {
        let updated = updated.normalized();
        let LoadedFile {
            path,
            mut lines,
            section,
        } = self.load_section(date)?;
        let span = section.ok_or(LogbookError::SectionNotFound { date })?;
        let line = span.line_of(index)?;

        lines[line] = format_entry(&updated);

        write_lines(&path, &lines)?;
        debug!(%date, index, "entry edited");
        Ok(())
    }

    /// Removes the entry at `index` (1-based) and returns it. The heading stays even if
    /// the section ends up empty.
    pub fn delete(&self, date: NaiveDate, index: usize) -> Result<Entry> {
        let LoadedFile {
            path,
            mut lines,
            section,
        } = self.load_section(date)?;
        let mut span = section.ok_or(LogbookError::SectionNotFound { date })?;
        let line = span.line_of(index)?;

        let removed = span.section.entries.remove(index - 1);
        lines.remove(line);

        write_lines(&path, &lines)?;
        debug!(%date, index, "entry deleted");
        Ok(removed)
    }

    fn load_section(&self, date: NaiveDate) -> Result<LoadedFile> {
        let path = self.manager.ensure_month_file(date)?;
        let content = fs::read_to_string(&path).map_err(LogbookError::io("read", &path))?;
        let lines = split_lines(&content);

        let Some(start) = find_heading(&lines, date) else {
            return Ok(LoadedFile {
                path,
                lines,
                section: None,
            });
        };

        let end = lines[start + 1..]
            .iter()
            .position(|line| parse_heading(line).is_some())
            .map_or(lines.len(), |offset| start + 1 + offset);

        let mut section = DateSection::new(date);
        let mut entry_lines = Vec::new();
        for (i, line) in lines.iter().enumerate().take(end).skip(start + 1) {
            if let Some(entry) = parse_entry_line(line) {
                entry_lines.push(i);
                section.entries.push(entry);
            }
        }

        Ok(LoadedFile {
            path,
            lines,
            section: Some(SectionSpan {
                section,
                end,
                entry_lines,
            }),
        })
    }
}

fn find_heading(lines: &[String], date: NaiveDate) -> Option<usize> {
    lines
        .iter()
        .position(|line| parse_heading(line) == Some(date))
}

/// Splits file content into lines, normalizing CRLF and dropping the empty tail
/// left by a final newline.
fn split_lines(content: &str) -> Vec<String> {
    let content = content.replace("\r\n", "\n");
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

/// Replaces `path` with `lines`, each newline-terminated, without ever exposing a half-written file.
///
/// The content goes to a temp file in the same directory, is synced, takes the original
/// permissions, and is then renamed over `path`. If anything fails before the rename the
/// temp file is dropped, which deletes it.
fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut content = lines.join("\n");
    content.push('\n');

    let mut temp = tempfile::Builder::new()
        .prefix("kerja-")
        .tempfile_in(dir)
        .map_err(LogbookError::io("create temp file in", dir))?;
    temp.write_all(content.as_bytes())
        .map_err(LogbookError::io("write", temp.path()))?;
    temp.as_file()
        .sync_all()
        .map_err(LogbookError::io("sync", temp.path()))?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp.path(), metadata.permissions())
            .map_err(LogbookError::io("set permissions on", temp.path()))?;
    }

    temp.persist(path)
        .map_err(|e| LogbookError::io("replace", path)(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logbook::{Reader, Status};
    use chrono::NaiveTime;
    use tempfile::tempdir;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn mk_writer() -> (Writer, FileManager, tempfile::TempDir) {
        let tmp = tempdir().unwrap();
        let manager = FileManager::new(tmp.path()).unwrap();
        (Writer::new(manager.clone()), manager, tmp)
    }

    /// Writes `content` as the month file for `date` and returns its path.
    fn seed(manager: &FileManager, date: NaiveDate, content: &str) -> PathBuf {
        let path = manager.ensure_month_file(date).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn append_creates_section() {
        let (writer, manager, _tmp) = mk_writer();
        let date = d(2025, 11, 2);
        let entry = Entry::new(
            Status::Todo,
            t(9, 45),
            "Investigate cache invalidation",
            vec!["infra".into(), "bug".into()],
        );
        writer.append(date, entry).unwrap();

        let got = fs::read_to_string(manager.month_path(date)).unwrap();
        assert_eq!(
            got,
            "# November 2025\n\n## 2025-11-02\n- [ ] [09:45] Investigate cache invalidation #infra #bug\n"
        );
    }

    #[test]
    fn append_extends_existing_section() {
        let (writer, manager, _tmp) = mk_writer();
        let date = d(2025, 11, 3);
        let path = seed(
            &manager,
            date,
            "# November 2025\n## 2025-11-03\n- [ ] [08:00] Existing todo #ops\n",
        );
        let entry = Entry::new(
            Status::Done,
            t(14, 10),
            "Deploy fix to production",
            vec!["release".into()],
        );
        writer.append(date, entry).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# November 2025\n## 2025-11-03\n- [ ] [08:00] Existing todo #ops\n- [x] [14:10] Deploy fix to production #release\n"
        );
    }

    #[test]
    fn append_adds_separator_only_after_non_blank_line() {
        let (writer, manager, _tmp) = mk_writer();
        let date = d(2025, 11, 5);
        let entry = Entry::new(Status::Todo, t(9, 0), "New day", vec![]);

        let path = seed(&manager, date, "# November 2025\n## 2025-11-04\n- [ ] [09:00] Old\n");
        writer.append(date, entry.clone()).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# November 2025\n## 2025-11-04\n- [ ] [09:00] Old\n\n## 2025-11-05\n- [ ] [09:00] New day\n"
        );

        seed(&manager, date, "# November 2025\n## 2025-11-04\n- [ ] [09:00] Old\n\n");
        writer.append(date, entry).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# November 2025\n## 2025-11-04\n- [ ] [09:00] Old\n\n## 2025-11-05\n- [ ] [09:00] New day\n"
        );
    }

    #[test]
    fn append_to_fresh_file_reuses_header_blank_line() {
        let (writer, manager, _tmp) = mk_writer();
        let date = d(2025, 12, 1);
        writer
            .append(date, Entry::new(Status::Done, t(8, 0), "First", vec![]))
            .unwrap();
        assert_eq!(
            fs::read_to_string(manager.month_path(date)).unwrap(),
            "# December 2025\n\n## 2025-12-01\n- [x] [08:00] First\n"
        );
    }

    #[test]
    fn append_into_middle_section_lands_right_before_next_heading() {
        let (writer, manager, _tmp) = mk_writer();
        let date = d(2025, 11, 4);
        let path = seed(
            &manager,
            date,
            "# November 2025\n\n## 2025-11-04\n- [ ] [09:00] One\n\n## 2025-11-05\n- [ ] [09:00] Other\n",
        );
        writer
            .append(date, Entry::new(Status::Todo, t(10, 0), "Two", vec![]))
            .unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# November 2025\n\n## 2025-11-04\n- [ ] [09:00] One\n\n- [ ] [10:00] Two\n## 2025-11-05\n- [ ] [09:00] Other\n"
        );
    }

    #[test]
    fn append_preserves_order_and_drops_seconds() {
        let (writer, manager, _tmp) = mk_writer();
        let date = d(2025, 11, 7);
        let times = [t(17, 0), t(8, 30), NaiveTime::from_hms_opt(12, 15, 42).unwrap()];
        for (i, time) in times.iter().enumerate() {
            writer
                .append(date, Entry::new(Status::Todo, *time, format!("Entry {i}"), vec![]))
                .unwrap();
        }

        let section = Reader::new(manager).section(date).unwrap();
        let texts: Vec<_> = section.entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["Entry 0", "Entry 1", "Entry 2"]);
        assert_eq!(section.entries[2].time, t(12, 15));
    }

    #[test]
    fn toggle_flips_status_of_target_line_only() {
        let (writer, manager, _tmp) = mk_writer();
        let date = d(2025, 11, 4);
        let path = seed(
            &manager,
            date,
            "# November 2025\n\n## 2025-11-04\n- [ ] [09:00] Write unit tests #testing\n- [ ] [10:30] Update docs #docs\n",
        );

        let updated = writer.toggle(date, 2).unwrap();
        assert_eq!(
            updated,
            Entry::new(Status::Done, t(10, 30), "Update docs", vec!["docs".into()])
        );
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# November 2025\n\n## 2025-11-04\n- [ ] [09:00] Write unit tests #testing\n- [x] [10:30] Update docs #docs\n"
        );
    }

    #[test]
    fn double_toggle_is_byte_identical() {
        let (writer, manager, _tmp) = mk_writer();
        let date = d(2025, 11, 4);
        let original = "# November 2025\n\n## 2025-11-04\n- [x] [09:00] Done thing #a\n- [ ] [10:30] Open thing\n";
        let path = seed(&manager, date, original);

        let first = writer.toggle(date, 1).unwrap();
        assert_eq!(first.status, Status::Todo);
        let second = writer.toggle(date, 1).unwrap();
        assert_eq!(second.status, Status::Done);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn edit_replaces_whole_line() {
        let (writer, manager, _tmp) = mk_writer();
        let date = d(2025, 11, 5);
        let path = seed(
            &manager,
            date,
            "# November 2025\n## 2025-11-05\n- [ ] [13:00] Draft ADR #architecture\n",
        );
        let updated = Entry::new(
            Status::Done,
            t(15, 30),
            "Publish ADR after review",
            vec!["architecture".into(), "review".into()],
        );
        writer.edit(date, 1, updated).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# November 2025\n## 2025-11-05\n- [x] [15:30] Publish ADR after review #architecture #review\n"
        );
    }

    #[test]
    fn delete_removes_entry_and_returns_it() {
        let (writer, manager, _tmp) = mk_writer();
        let date = d(2025, 11, 6);
        let path = seed(
            &manager,
            date,
            "# November 2025\n## 2025-11-06\n- [ ] [08:30] Review incident report #ops\n- [x] [11:45] Plan retro #team\n",
        );

        let deleted = writer.delete(date, 1).unwrap();
        assert_eq!(deleted.text, "Review incident report");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# November 2025\n## 2025-11-06\n- [x] [11:45] Plan retro #team\n"
        );
    }

    #[test]
    fn deleting_last_entry_leaves_empty_heading() {
        let (writer, manager, _tmp) = mk_writer();
        let date = d(2025, 11, 6);
        let path = seed(
            &manager,
            date,
            "# November 2025\n\n## 2025-11-06\n- [ ] [08:30] Only one\n",
        );

        writer.delete(date, 1).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# November 2025\n\n## 2025-11-06\n"
        );
        let section = Reader::new(manager).section(date).unwrap();
        assert!(section.entries.is_empty());
    }

    #[test]
    fn missing_section_is_not_found() {
        let (writer, manager, _tmp) = mk_writer();
        let date = d(2025, 11, 7);
        seed(
            &manager,
            date,
            "# November 2025\n## 2025-11-06\n- [x] [11:45] Plan retro #team\n",
        );
        let entry = Entry::new(Status::Todo, t(9, 0), "x", vec![]);

        assert!(matches!(writer.toggle(date, 1), Err(LogbookError::SectionNotFound { .. })));
        assert!(matches!(writer.edit(date, 1, entry), Err(LogbookError::SectionNotFound { .. })));
        assert!(matches!(writer.delete(date, 1), Err(LogbookError::SectionNotFound { .. })));
    }

    #[test]
    fn index_bounds_are_enforced() {
        let (writer, manager, _tmp) = mk_writer();
        let date = d(2025, 11, 8);
        let content = "# November 2025\n## 2025-11-08\n- [ ] [09:00] Standup #team\n- [ ] [10:00] Review\n";
        let path = seed(&manager, date, content);
        let entry = Entry::new(Status::Todo, t(9, 0), "x", vec![]);

        for index in [0, 3] {
            assert!(matches!(
                writer.toggle(date, index),
                Err(LogbookError::InvalidIndex { count: 2, .. })
            ));
            assert!(matches!(
                writer.edit(date, index, entry.clone()),
                Err(LogbookError::InvalidIndex { count: 2, .. })
            ));
            assert!(matches!(
                writer.delete(date, index),
                Err(LogbookError::InvalidIndex { count: 2, .. })
            ));
        }
        // Failed calls never touch the file.
        assert_eq!(fs::read_to_string(&path).unwrap(), content);

        for index in [1, 2] {
            assert!(writer.toggle(date, index).is_ok());
        }
    }

    #[test]
    fn unrelated_content_is_preserved() {
        let (writer, manager, _tmp) = mk_writer();
        let date = d(2025, 11, 4);
        let content = "# November 2025\n\nSome intro text   \n\n## 2025-11-03\n- [x] [09:00] Yesterday #old\n  random indented note\n\n## 2025-11-04\n- [ ] [09:00] First\n### Notes\nfree text that is not an entry\n- [ ] broken entry line\n- [ ] [11:00] Second #keep\n\n## 2025-11-05\n- [ ] [08:00] Tomorrow\n";
        let path = seed(&manager, date, content);

        let updated = writer.toggle(date, 2).unwrap();
        assert_eq!(updated.text, "Second");

        let expected = content.replace("- [ ] [11:00] Second #keep", "- [x] [11:00] Second #keep");
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);

        writer.delete(date, 1).unwrap();
        let expected = expected.replace("- [ ] [09:00] First\n", "");
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);
    }

    #[test]
    fn trailing_blank_lines_survive_a_rewrite() {
        let (writer, manager, _tmp) = mk_writer();
        let date = d(2025, 11, 4);
        let path = seed(&manager, date, "# November 2025\n\n## 2025-11-04\n- [ ] [09:00] One\n\n\n");
        writer.toggle(date, 1).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# November 2025\n\n## 2025-11-04\n- [x] [09:00] One\n\n\n"
        );
    }

    #[test]
    fn crlf_files_are_rewritten_with_lf() {
        let (writer, manager, _tmp) = mk_writer();
        let date = d(2025, 11, 4);
        let path = seed(
            &manager,
            date,
            "# November 2025\r\n\r\n## 2025-11-04\r\n- [ ] [09:00] First\r\n",
        );
        writer.toggle(date, 1).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# November 2025\n\n## 2025-11-04\n- [x] [09:00] First\n"
        );
    }

    #[test]
    fn rewrite_leaves_no_temp_files_behind() {
        let (writer, manager, _tmp) = mk_writer();
        let date = d(2025, 11, 4);
        writer
            .append(date, Entry::new(Status::Todo, t(9, 0), "One", vec![]))
            .unwrap();
        writer.toggle(date, 1).unwrap();

        let dir = manager.month_path(date).parent().unwrap().to_path_buf();
        let names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["2025-11.md".to_string()]);
    }

    #[test]
    fn failed_rewrite_removes_temp_file_and_keeps_target() {
        let tmp = tempdir().unwrap();
        // Renaming a file over a non-empty directory fails after the temp file is written.
        let target = tmp.path().join("2025-11.md");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "untouched").unwrap();

        let result = write_lines(&target, &["# November 2025".to_string()]);
        assert!(matches!(result, Err(LogbookError::Io { op: "replace", .. })));

        assert_eq!(fs::read_to_string(target.join("keep.txt")).unwrap(), "untouched");
        let names: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["2025-11.md".to_string()]);
    }

    #[test]
    fn append_to_last_section_goes_after_its_trailing_blank_lines() {
        let (writer, manager, _tmp) = mk_writer();
        let date = d(2025, 11, 4);
        let path = seed(&manager, date, "# November 2025\n\n## 2025-11-04\n- [ ] [09:00] One\n\n");
        writer
            .append(date, Entry::new(Status::Done, t(10, 0), "Two", vec![]))
            .unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# November 2025\n\n## 2025-11-04\n- [ ] [09:00] One\n\n- [x] [10:00] Two\n"
        );
        let section = Reader::new(manager).section(date).unwrap();
        assert_eq!(section.entries.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn rewrite_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (writer, manager, _tmp) = mk_writer();
        let date = d(2025, 11, 4);
        let path = seed(&manager, date, "# November 2025\n\n## 2025-11-04\n- [ ] [09:00] One\n");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        writer.toggle(date, 1).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[test]
    fn split_lines_handles_trailing_newline() {
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
        assert_eq!(split_lines("a\n\n"), vec!["a", ""]);
    }
}
