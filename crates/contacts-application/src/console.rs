//! Read-evaluate loop over a `Session`.

use colored::Colorize;
use contacts_core::error::Result;
use contacts_core::person::{EmptyReason, LoadSource, Person, PersonId};
use std::io::Write;

use crate::command::{Command, first_token};
use crate::input::{Input, LineSource};
use crate::session::{SearchResult, Session};

/// Outcome of prompting for a value.
enum Prompted<T> {
    Value(T),
    /// Ctrl-C or rejected input; already reported to the user.
    Abandoned,
    /// Ctrl-D or closed input; the session ends.
    Eof,
}

impl<T> Prompted<T> {
    fn flow(&self) -> Flow {
        match self {
            Prompted::Eof => Flow::Quit,
            _ => Flow::Continue,
        }
    }
}

/// Returns early from a prompt helper unless a value was entered.
macro_rules! entered {
    ($prompted:expr) => {
        match $prompted {
            Prompted::Value(value) => value,
            Prompted::Abandoned => return Ok(Prompted::Abandoned),
            Prompted::Eof => return Ok(Prompted::Eof),
        }
    };
}

/// Whether the loop keeps reading commands after a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Drives a `Session` from a `LineSource`, writing replies to `out`.
///
/// Every user-level failure (bad index, bad age, unknown command, failed
/// save) is reported inline and the loop continues. End of input at any
/// prompt ends the session the same way `exit` does. Only I/O failures on
/// the input or output end the loop with an error.
pub struct Console<I: LineSource, W: Write> {
    session: Session,
    input: I,
    out: W,
}

impl<I: LineSource, W: Write> Console<I, W> {
    pub fn new(session: Session, input: I, out: W) -> Self {
        Self {
            session,
            input,
            out,
        }
    }

    /// Consumes the console, returning its parts.
    pub fn into_parts(self) -> (Session, I, W) {
        (self.session, self.input, self.out)
    }

    /// The command prompt, listing every command word.
    pub fn command_prompt() -> String {
        format!("Enter command ({}): ", Command::names().join(", "))
    }

    /// Tells the user how the initial collection was obtained.
    pub fn announce_load(&mut self, source: &LoadSource) -> Result<()> {
        match source {
            LoadSource::Primary => {}
            LoadSource::Backup => {
                writeln!(
                    self.out,
                    "{}",
                    "Main file corrupted. Loaded contacts from backup.".yellow()
                )?;
            }
            LoadSource::Empty(reason) => {
                let message = match reason {
                    EmptyReason::PrimaryUnreadable => "Main file unreadable. Starting with no contacts.",
                    EmptyReason::BackupUnreadable => {
                        "Main file corrupted and backup unreadable. Starting with no contacts."
                    }
                    EmptyReason::BackupCorrupted => {
                        "Main file and backup both corrupted. Starting with no contacts."
                    }
                };
                writeln!(self.out, "{}", message.yellow())?;
            }
        }
        Ok(())
    }

    /// Runs until `exit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        let prompt = Self::command_prompt();
        loop {
            let line = match self.input.read_line(&prompt)? {
                Input::Line(line) => line,
                Input::Interrupted => {
                    writeln!(self.out, "{}", "Interrupted. Type 'exit' to quit.".yellow())?;
                    continue;
                }
                Input::Eof => break,
            };

            let token = first_token(&line);
            if token.is_empty() {
                continue;
            }

            match Command::parse(token) {
                Some(Command::Exit) => break,
                Some(command) => {
                    tracing::debug!("Dispatching command: {}", command);
                    if self.dispatch(command)? == Flow::Quit {
                        tracing::debug!("Input closed during {}", command);
                        break;
                    }
                }
                None => writeln!(self.out, "{}", "Unknown command.".bright_black())?,
            }
        }
        self.farewell()
    }

    fn dispatch(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Add => self.handle_add(),
            Command::List => self.handle_list(),
            Command::Update => self.handle_update(),
            Command::Delete => self.handle_delete(),
            Command::Search => self.handle_search(),
            Command::Save => self.handle_save(),
            Command::Exit => Ok(Flow::Quit),
        }
    }

    fn handle_add(&mut self) -> Result<Flow> {
        let person = match self.read_person("")? {
            Prompted::Value(person) => person,
            other => return Ok(other.flow()),
        };
        self.session.add(person);
        writeln!(self.out, "{}", "Person added.".green())?;
        Ok(Flow::Continue)
    }

    fn handle_list(&mut self) -> Result<Flow> {
        if self.session.book().is_empty() {
            writeln!(self.out, "No people found.")?;
            return Ok(Flow::Continue);
        }
        for (index, person) in self.session.book().iter_numbered() {
            writeln!(self.out, "{}. {}", index, person)?;
        }
        Ok(Flow::Continue)
    }

    fn handle_update(&mut self) -> Result<Flow> {
        let id = match self.read_id("Enter index to update: ")? {
            Prompted::Value(id) => id,
            other => return Ok(other.flow()),
        };
        let person = match self.read_person("New ")? {
            Prompted::Value(person) => person,
            other => return Ok(other.flow()),
        };
        self.session.replace(id, person)?;
        writeln!(self.out, "{}", "Updated.".green())?;
        Ok(Flow::Continue)
    }

    fn handle_delete(&mut self) -> Result<Flow> {
        let id = match self.read_id("Enter index to delete: ")? {
            Prompted::Value(id) => id,
            other => return Ok(other.flow()),
        };
        self.session.remove(id)?;
        writeln!(self.out, "{}", "Deleted.".green())?;
        Ok(Flow::Continue)
    }

    fn handle_search(&mut self) -> Result<Flow> {
        let query = match self.read_field("Search by name: ")? {
            Prompted::Value(query) => query,
            other => return Ok(other.flow()),
        };
        match self.session.search(&query) {
            SearchResult::NoContacts => writeln!(self.out, "No people found.")?,
            SearchResult::NotFound => writeln!(self.out, "Not found.")?,
            SearchResult::Matches(hits) => {
                for (index, person) in hits {
                    writeln!(self.out, "{}. {}", index, person)?;
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn handle_save(&mut self) -> Result<Flow> {
        match self.session.save() {
            Ok(outcome) => {
                writeln!(self.out, "{}", "Saved.".green())?;
                if let Some(message) = outcome.backup_error {
                    writeln!(self.out, "{}", format!("Warning: {}", message).yellow())?;
                }
            }
            Err(e) => {
                tracing::error!("Save failed: {}", e);
                writeln!(self.out, "{}", format!("Save error: {}", e).red())?;
            }
        }
        Ok(Flow::Continue)
    }

    fn farewell(&mut self) -> Result<()> {
        if self.session.has_unsaved_changes() {
            writeln!(
                self.out,
                "{}",
                "Unsaved changes were discarded.".yellow()
            )?;
        }
        writeln!(self.out, "{}", "Exit.".bright_green())?;
        self.out.flush()?;
        Ok(())
    }

    /// Prompts for name, age and phone. A non-integer age is reported and
    /// abandons the record.
    fn read_person(&mut self, label_prefix: &str) -> Result<Prompted<Person>> {
        let name = entered!(self.read_field(&format!("{}Name: ", label_prefix))?);
        let age = entered!(self.read_field(&format!("{}Age: ", label_prefix))?);
        let Ok(age) = age.parse::<i64>() else {
            writeln!(self.out, "{}", "Invalid age.".red())?;
            return Ok(Prompted::Abandoned);
        };
        let phone = entered!(self.read_field(&format!("{}Phone: ", label_prefix))?);
        Ok(Prompted::Value(Person::new(name, age, phone)))
    }

    /// Prompts for a 1-based index and resolves it to the record there.
    /// Non-numeric and out-of-range input are both an invalid index.
    fn read_id(&mut self, prompt: &str) -> Result<Prompted<PersonId>> {
        let raw = entered!(self.read_field(prompt)?);
        let resolved = raw
            .parse::<usize>()
            .ok()
            .and_then(|index| self.session.resolve(index).ok());
        match resolved {
            Some(id) => Ok(Prompted::Value(id)),
            None => {
                writeln!(self.out, "{}", "Invalid index.".red())?;
                Ok(Prompted::Abandoned)
            }
        }
    }

    fn read_field(&mut self, prompt: &str) -> Result<Prompted<String>> {
        Ok(match self.input.read_line(prompt)? {
            Input::Line(line) => Prompted::Value(first_token(&line).to_string()),
            Input::Interrupted => {
                writeln!(self.out, "{}", "Cancelled.".yellow())?;
                Prompted::Abandoned
            }
            Input::Eof => Prompted::Eof,
        })
    }
}
