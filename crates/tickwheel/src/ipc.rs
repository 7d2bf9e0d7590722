//! Line protocol spoken over the control socket of a running wheel.

use crate::theme::Theme;
use derive_more::Display;
use std::str::FromStr;
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/tickwheel.sock";

#[derive(Debug, Clone, Copy, PartialEq, Display)]
pub enum Command {
    #[display("set {_0}")]
    SetProgress(f64),
    #[display("range {_0}")]
    SetRange(i32),
    #[display("theme {_0}")]
    SetTheme(Theme),
    #[display("reload")]
    Reload,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("Missing argument for '{0}'")]
    MissingArgument(&'static str),
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
    #[error("Invalid theme: {0}")]
    InvalidTheme(#[from] strum::ParseError),
}

fn number<T: FromStr>(arg: Option<&str>, name: &'static str) -> Result<T, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(name))?;
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        let arg = words.next();

        match name.to_ascii_lowercase().as_str() {
            "set" => number(arg, "set").map(Command::SetProgress),
            "range" => number(arg, "range").map(Command::SetRange),
            "theme" => {
                let arg = arg.ok_or(CommandError::MissingArgument("theme"))?;
                Ok(Command::SetTheme(arg.parse()?))
            }
            "reload" => Ok(Command::Reload),
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}
