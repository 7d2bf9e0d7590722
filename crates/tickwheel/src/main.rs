use clap::{Parser, Subcommand};
use std::io::Write;
use std::os::unix::net::UnixStream;
use tickwheel::Theme;
use tickwheel::ipc::{Command, SOCKET_PATH};

#[derive(Parser, Debug)]
#[command(name = "tickwheel", version, about = "Control a running wheel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Move the dial to a degree (clamped to the range)
    Set {
        #[arg(allow_negative_numbers = true)]
        degree: f64,
    },
    /// Set the symmetric range [-degree, degree]
    Range { degree: i32 },
    /// Switch the color theme (light, dark)
    Theme { theme: Theme },
    /// Re-read the configuration file
    Reload,
}

impl From<Commands> for Command {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Set { degree } => Command::SetProgress(degree),
            Commands::Range { degree } => Command::SetRange(degree),
            Commands::Theme { theme } => Command::SetTheme(theme),
            Commands::Reload => Command::Reload,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    send_command(&Command::from(cli.command))
}

fn send_command(command: &Command) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to wheel at {}: {}. Is wheel running?",
            SOCKET_PATH,
            e
        )
    })?;

    log::debug!("Sending '{}'", command);
    writeln!(stream, "{}", command)?;
    Ok(())
}
