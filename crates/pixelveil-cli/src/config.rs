//! Command-line configuration for the shell.

use std::path::PathBuf;

use pixelveil_core::session::parse_key;
use pixelveil_core::{Action, Key, DEFAULT_KEY};

/// Options parsed from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Image to load before the first command.
    pub image: Option<PathBuf>,
    /// Starting key.
    pub key: Key,
    /// Actions to run once, without entering the prompt.
    pub actions: Vec<Action>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            image: None,
            key: DEFAULT_KEY,
            actions: Vec::new(),
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(ShellConfig),
    Help,
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [--key N] [--image PATH] [ACTION...]\n\
         \n\
         ACTION is one of encrypt, decrypt, swap, unswap. With actions the\n\
         image is transformed once and saved next to the source as\n\
         {{action}}_image.png; without them an interactive prompt starts.\n\
         \n\
         Options:\n  \
           -k, --key N       key for every transform (default {DEFAULT_KEY})\n  \
           -i, --image PATH  image to load on start\n  \
           -h, --help        show this message\n\
         \n\
         Set RUST_LOG=debug for transform details."
    )
}

/// Parse arguments (without the program name).
pub fn parse_args<I, S>(args: I) -> Result<Invocation, String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut config = ShellConfig::default();
    let mut args = args.into_iter().map(Into::into);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Invocation::Help),
            "-k" | "--key" => {
                let value = args.next().ok_or("--key needs a value")?;
                config.key = parse_key(&value).map_err(|e| e.to_string())?;
            }
            "-i" | "--image" => {
                let value = args.next().ok_or("--image needs a path")?;
                config.image = Some(PathBuf::from(value));
            }
            flag if flag.starts_with('-') => {
                return Err(format!("Unknown option '{flag}'"));
            }
            other => {
                let action = other.parse::<Action>().map_err(|e| e.to_string())?;
                config.actions.push(action);
            }
        }
    }

    if !config.actions.is_empty() && config.image.is_none() {
        return Err("Actions need an image; pass --image PATH".to_string());
    }

    Ok(Invocation::Run(config))
}
