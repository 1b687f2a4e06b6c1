//! Pixelveil interactive shell.
//!
//! Loads an image, applies one of the four keyed transforms and writes the
//! result next to the source as `{action}_image.png`.

mod config;
mod shell;

use std::io::{self, IsTerminal};

use anyhow::{anyhow, Context};
use pixelveil_core::Session;

use config::Invocation;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "pixelveil".to_string());

    let config = match config::parse_args(args) {
        Ok(Invocation::Run(config)) => config,
        Ok(Invocation::Help) => {
            println!("{}", config::usage(&program));
            return Ok(());
        }
        Err(e) => return Err(anyhow!("{e}\n\n{}", config::usage(&program))),
    };
    log::debug!("starting with {config:?}");

    let mut session = Session::with_key(config.key);
    if let Some(path) = &config.image {
        session
            .load(path)
            .with_context(|| format!("could not load {}", path.display()))?;
    }

    if config.actions.is_empty() {
        interactive(&mut session)
    } else {
        shell::run_actions(&session, &config.actions, &mut io::stdout().lock())
    }
}

fn interactive(session: &mut Session) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let is_tty = stdin.is_terminal();
    if is_tty {
        println!("Pixelveil {} - type 'help' for commands", env!("CARGO_PKG_VERSION"));
    }

    let mut stdout = io::stdout().lock();
    shell::run_prompt(session, stdin.lock(), &mut stdout, is_tty).context("shell I/O failed")
}
