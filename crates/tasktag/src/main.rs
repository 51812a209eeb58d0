//! CLI entry point for tasktag.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tasktag_app::AppConfig;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use commands::Session;

mod commands;
mod shell;
mod view;

/// Tagged to-do list kept in memory for the length of a session.
#[derive(Parser, Debug)]
#[command(
    name = "tasktag",
    version,
    about = "tasktag: an in-memory to-do list with categorized tags"
)]
struct Cli {
    /// Configuration file (defaults to the user config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Read task commands from stdin (default).
    Shell,

    /// Print the tag catalog and exit.
    Tags,
}

fn main() -> Result<()> {
    let Cli { config, cmd } = Cli::parse();
    install_tracing();

    let config = AppConfig::load(config.as_deref())?;
    let catalog = config.build_catalog();
    info!(tags = catalog.len(), "tag catalog ready");

    match cmd.unwrap_or(Command::Shell) {
        Command::Tags => {
            print!("{}", view::tag_catalog(&catalog));
            Ok(())
        }
        Command::Shell => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            let mut session = Session::new(catalog, io::stdout().lock());
            shell::run(&mut session, stdin.lock(), interactive)?;
            info!(
                tasks = session.store().len(),
                tags = session.catalog().len(),
                "session finished"
            );
            Ok(())
        }
    }
}

fn install_tracing() {
    // RUST_LOG overrides; INFO by default. Logs go to stderr so stdout stays scriptable.
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_is_the_default() {
        let cli = Cli::parse_from(["tasktag"]);
        assert_eq!(cli.cmd, None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn parse_config_and_tags() {
        let cli = Cli::parse_from(["tasktag", "--config", "/tmp/tasktag.toml", "tags"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/tasktag.toml")));
        assert_eq!(cli.cmd, Some(Command::Tags));
    }

    #[test]
    fn parse_shell_command() {
        let cli = Cli::parse_from(["tasktag", "shell"]);
        match cli.cmd {
            Some(Command::Shell) => {}
            other => panic!("expected shell command, got {other:?}"),
        }
    }
}
