use super::{read_mode, search_mode, write_mode};
use crate::{
    cli::{Cli, Command, DateArgs},
    render::{RenderOptions, Renderer},
};
use anyhow::Result;
use chrono::NaiveDate;
use kerja_core::{Kerja, Status, utils::date_utils::shift_days};

pub struct KerjaCli {
    cli: Cli,
    renderer: Renderer,
    kerja: Kerja,
}

impl KerjaCli {
    pub fn new(cli: Cli, kerja: Kerja) -> Self {
        let renderer = Renderer::new(Some(RenderOptions {
            date_format: kerja.config.date_format.to_string(),
            use_color: cli.color.use_color(),
        }));
        KerjaCli {
            cli,
            renderer,
            kerja,
        }
    }

    pub fn run(&self) -> Result<()> {
        let (renderer, kerja) = (&self.renderer, &self.kerja);
        let Some(command) = &self.cli.command else {
            return read_mode::show_day(renderer, kerja, kerja.today());
        };

        match command {
            Command::Today(args) => read_mode::show_day(renderer, kerja, self.target(args)),
            Command::Prev(args) => {
                read_mode::show_day(renderer, kerja, shift_days(self.target(args), -1))
            }
            Command::Next(args) => {
                read_mode::show_day(renderer, kerja, shift_days(self.target(args), 1))
            }
            Command::Jump { date } => read_mode::show_day(renderer, kerja, *date),
            Command::List { date, days, week } => {
                let days = if *week { 7 } else { *days };
                read_mode::list_days(renderer, kerja, self.target(date), days)
            }
            Command::Search {
                term,
                date,
                case_sensitive,
                json,
                include_text,
            } => search_mode::search_mode(
                renderer,
                kerja,
                self.target(date),
                search_mode::SearchArgs {
                    term: term.as_str(),
                    case_sensitive: *case_sensitive,
                    include_text: *include_text,
                    json: *json,
                },
            ),
            Command::Log(args) => write_mode::add_entry(renderer, kerja, Status::Done, args),
            Command::Todo(args) => write_mode::add_entry(renderer, kerja, Status::Todo, args),
            Command::Toggle(args) => write_mode::toggle_entry(renderer, kerja, args),
            Command::Delete(args) => write_mode::delete_entry(renderer, kerja, args),
            Command::Edit {
                target,
                text,
                time,
                status,
            } => write_mode::edit_entry(
                renderer,
                kerja,
                target,
                write_mode::EntryChanges {
                    text: text.as_slice(),
                    time: *time,
                    status: *status,
                },
            ),
            Command::Path => {
                self.renderer
                    .print_info(&format!("{}", kerja.config.root_dir.display()));
                Ok(())
            }
        }
    }

    fn target(&self, args: &DateArgs) -> NaiveDate {
        args.date.unwrap_or_else(|| self.kerja.today())
    }
}
