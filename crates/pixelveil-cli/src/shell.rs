//! Line-oriented interactive shell over a [`Session`].

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use pixelveil_core::{Action, ActionOutcome, Key, PixelGrid, Session, SessionError};

pub const HELP: &str = "\
Commands:
  load PATH     load an image (PNG, JPEG, BMP)
  key N         set the key (whole number)
  encrypt       add the key to every sample
  decrypt       subtract the key from every sample
  swap          shuffle sample positions
  unswap        undo a swap (alias: reverse-swap)
  status        show the loaded image and key
  help          show this message
  quit          leave the shell";

/// One parsed prompt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load(PathBuf),
    Key(String),
    Run(Action),
    Status,
    Help,
    Quit,
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Ok(Command::Empty),
            "load" | "open" if rest.is_empty() => Err("load needs a path".to_string()),
            "load" | "open" => Ok(Command::Load(PathBuf::from(rest))),
            "key" if rest.is_empty() => Err("key needs a value".to_string()),
            "key" => Ok(Command::Key(rest.to_string())),
            "status" => Ok(Command::Status),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => other
                .parse::<Action>()
                .map(Command::Run)
                .map_err(|e| e.to_string()),
        }
    }
}

fn describe(image: &PixelGrid) -> String {
    format!(
        "{}x{} {:?} ({} samples)",
        image.width,
        image.height,
        image.layout,
        image.sample_count()
    )
}

fn report(out: &mut impl Write, outcome: &ActionOutcome, key: Key) -> io::Result<()> {
    writeln!(out, "Preview: {}", describe(&outcome.preview))?;
    writeln!(out, "{}", outcome.notice())?;
    writeln!(
        out,
        "To undo, load that file and run '{}' with key {key}",
        outcome.action.inverse()
    )
}

/// Execute one command. Returns `Ok(false)` when the shell should stop.
///
/// User errors are printed and the session is left as it was; only failures
/// writing to `out` are returned.
pub fn execute(session: &mut Session, command: Command, out: &mut impl Write) -> io::Result<bool> {
    match command {
        Command::Empty => {}
        Command::Quit => return Ok(false),
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Status => match (session.source_path(), session.image()) {
            (Some(path), Some(image)) => writeln!(
                out,
                "Image: {} [{}], key {}",
                path.display(),
                describe(image),
                session.key()
            )?,
            _ => writeln!(out, "No image loaded, key {}", session.key())?,
        },
        Command::Key(text) => match session.set_key_input(&text) {
            Ok(key) => writeln!(out, "Key set to {key}")?,
            Err(e) => writeln!(out, "Error: {e}")?,
        },
        Command::Load(path) => match session.load(&path) {
            Ok(image) => {
                let summary = describe(image);
                writeln!(out, "Loaded {} [{summary}]", path.display())?;
            }
            Err(e) => writeln!(out, "Error: could not load {}: {e}", path.display())?,
        },
        Command::Run(action) => match session.run(action) {
            Ok(outcome) => report(out, &outcome, session.key())?,
            Err(SessionError::NoImageLoaded) => {
                writeln!(out, "Warning: no image loaded; {action} ignored")?
            }
            Err(e) => writeln!(out, "Error: {action} failed: {e}")?,
        },
    }
    Ok(true)
}

/// Run `actions` once against the loaded image, stopping at the first failure.
pub fn run_actions(
    session: &Session,
    actions: &[Action],
    out: &mut impl Write,
) -> anyhow::Result<()> {
    for &action in actions {
        let outcome = session
            .run(action)
            .with_context(|| format!("{action} failed"))?;
        report(out, &outcome, session.key())?;
    }
    Ok(())
}

/// Read commands from `input` until it ends or `quit` is entered.
pub fn run_prompt(
    session: &mut Session,
    input: impl BufRead,
    out: &mut impl Write,
    interactive: bool,
) -> io::Result<()> {
    let mut lines = input.lines();
    loop {
        if interactive {
            write!(out, "pixelveil> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let command = match Command::parse(&line?) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "Error: {e} (type 'help' for commands)")?;
                continue;
            }
        };
        if !execute(session, command, out)? {
            break;
        }
    }
    Ok(())
}
