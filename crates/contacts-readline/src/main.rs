use std::borrow::Cow::{self, Borrowed, Owned};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context as _, Result};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use contacts_application::{Command, Console, Input, LineSource, Session};
use contacts_core::config::{ContactsConfig, LoggingConfig};
use contacts_core::error::ContactsError;
use contacts_infrastructure::{ConfigStorage, ContactsPaths, JsonFilePersonRepository};

/// CLI helper for rustyline that completes and hints command words.
#[derive(Clone)]
struct CommandHelper {
    commands: Vec<&'static str>,
}

impl CommandHelper {
    fn new() -> Self {
        Self {
            commands: Command::names(),
        }
    }

    fn is_command(&self, word: &str) -> bool {
        self.commands.iter().any(|cmd| cmd.eq_ignore_ascii_case(word))
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.contains(char::is_whitespace) {
            return Ok((0, vec![]));
        }

        let lower = line.to_ascii_lowercase();
        let candidates: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(&lower))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.is_command(line.trim()) {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.is_empty() || line.contains(char::is_whitespace) {
            return None;
        }

        let lower = line.to_ascii_lowercase();
        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(&lower) && cmd.len() > lower.len())
            .map(|cmd| cmd[lower.len()..].to_string())
    }
}

impl Validator for CommandHelper {}

/// `LineSource` backed by a rustyline editor.
///
/// Only lines read at the command prompt go into history.
struct ReadlineInput {
    editor: Editor<CommandHelper, DefaultHistory>,
    command_prompt: String,
}

impl ReadlineInput {
    fn new() -> Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(CommandHelper::new()));
        Ok(Self {
            editor,
            command_prompt: Console::<ReadlineInput, std::io::Stdout>::command_prompt(),
        })
    }
}

impl LineSource for ReadlineInput {
    fn read_line(&mut self, prompt: &str) -> contacts_core::Result<Input> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if prompt == self.command_prompt && !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(err) => Err(ContactsError::io(format!("Failed to read input: {}", err))),
        }
    }
}

/// Sends `tracing` output to the append-mode log file so it never mixes with
/// the prompt. `RUST_LOG` overrides the configured level.
fn init_logging(log_file: &Path, logging: &LoggingConfig) -> Result<()> {
    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Could not create log directory {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Could not open log file {}", log_file.display()))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&logging.level))
        .with_context(|| format!("Invalid log level '{}'", logging.level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// The main entry point for the contacts REPL.
///
/// 1. Resolves and loads `contacts.toml` (defaults when absent)
/// 2. Initializes file logging
/// 3. Loads the contact collection through the mirrored JSON store
/// 4. Runs the console until `exit` or end of input
fn main() -> Result<()> {
    // ===== Configuration =====
    let paths = ContactsPaths::new(None)?;
    let config = match paths.resolve_config_file() {
        Some(path) => ConfigStorage::new(path).load_or_default()?,
        None => ContactsConfig::default(),
    };

    init_logging(&paths.log_file(&config.logging), &config.logging)?;
    tracing::info!(
        "Starting contacts (primary: {}, load policy: {})",
        config.storage.primary_path(paths.base_dir()).display(),
        config.storage.load_policy.as_str()
    );

    // ===== Record store =====
    let repository = Arc::new(JsonFilePersonRepository::from_config(
        &config.storage,
        paths.base_dir(),
    ));

    let (session, source) = match Session::start(repository) {
        Ok(started) => started,
        Err(e) => {
            tracing::error!("Error loading data: {}", e);
            println!("{}", format!("Error loading data: {}", e).red());
            return Ok(());
        }
    };

    // ===== REPL =====
    println!("{}", "=== Contacts ===".bright_magenta().bold());

    let input = ReadlineInput::new()?;
    let mut console = Console::new(session, input, std::io::stdout());
    console.announce_load(&source)?;
    console.run()?;

    tracing::info!("Session ended");
    Ok(())
}
