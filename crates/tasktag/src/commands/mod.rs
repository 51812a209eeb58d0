//! Shell command grammar and execution.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tasktag_core::Color;

pub mod handlers;

pub use handlers::{Flow, Session};

/// One line typed into the shell.
#[derive(Parser, Debug)]
#[command(
    name = "tasktag",
    no_binary_name = true,
    disable_version_flag = true,
    help_template = "{subcommands}"
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub cmd: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    /// List tasks, newest first.
    #[command(visible_alias = "ls")]
    List {
        /// Print the tasks as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the tag catalog grouped by category.
    Tags,

    /// Create a task.
    Add {
        /// Task title.
        title: String,
        /// Tag name, short id or id prefix (repeatable).
        #[arg(short = 't', long = "tag")]
        tags: Vec<String>,
    },

    /// Edit a task's title and toggle its tags.
    Edit {
        /// List position, short id or id prefix.
        task: String,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// Tag to select, or deselect if already present (repeatable).
        #[arg(short = 't', long = "tag")]
        tags: Vec<String>,
    },

    /// Flip a task between open and done.
    Toggle {
        /// List position, short id or id prefix.
        task: String,
    },

    /// Delete a task.
    #[command(visible_alias = "rm")]
    Delete {
        /// List position, short id or id prefix.
        task: String,
    },

    /// Create a custom tag.
    TagAdd {
        /// Tag name.
        name: String,
        /// `#RRGGBB` or `#AARRGGBB`.
        #[arg(long)]
        color: Option<Color>,
    },

    /// Leave the shell.
    #[command(visible_alias = "exit")]
    Quit,
}

impl ShellCommand {
    /// Whether the command may change the task list.
    pub const fn mutates_tasks(&self) -> bool {
        matches!(
            self,
            Self::Add { .. } | Self::Edit { .. } | Self::Toggle { .. } | Self::Delete { .. }
        )
    }
}

/// Split a raw line with shell quoting rules and parse it.
///
/// Returns `Ok(None)` for blank lines and `#` comments.
pub fn parse_line(line: &str) -> Result<Option<Result<ShellCommand, clap::Error>>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let words = shell_words::split(&escape_hashes(trimmed)).context("unbalanced quotes")?;
    Ok(Some(ShellLine::try_parse_from(words).map(|parsed| parsed.cmd)))
}

/// Backslash-escape every unquoted `#` so `--color #795548` keeps its value.
///
/// `shell_words` would otherwise read a word starting with `#` as a comment.
fn escape_hashes(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut quote: Option<char> = None;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match (quote, c) {
            (_, '\\') if quote != Some('\'') => {
                out.push(c);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
                continue;
            }
            (None, '\'' | '"') => quote = Some(c),
            (Some(open), _) if open == c => quote = None,
            (None, '#') => out.push('\\'),
            _ => {}
        }
        out.push(c);
    }
    out
}
