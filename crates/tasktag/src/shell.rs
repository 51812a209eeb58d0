//! Line-oriented read/eval loop over a [`Session`].

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::debug;

use crate::commands::{self, Flow, Session};

const PROMPT: &str = "tasktag> ";

/// Read commands until end of input or `quit`.
///
/// A failing command is reported on the session output and the loop moves on;
/// only I/O errors end the loop early.
pub fn run<R: BufRead, W: Write>(session: &mut Session<W>, mut input: R, interactive: bool) -> Result<()> {
    let mut line = String::new();
    loop {
        if interactive {
            let out = session.output();
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("end of input");
            break;
        }

        let command = match commands::parse_line(&line) {
            Ok(None) => continue,
            Ok(Some(Ok(command))) => command,
            Ok(Some(Err(err))) => {
                write!(session.output(), "{}", err.render())?;
                continue;
            }
            Err(err) => {
                writeln!(session.output(), "error: {err:#}")?;
                continue;
            }
        };

        match session.execute(command) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => writeln!(session.output(), "error: {err:#}")?,
        }
    }
    session.output().flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasktag_app::TagCatalog;

    fn script(lines: &str) -> String {
        let mut session = Session::new(TagCatalog::initialize(), Vec::new());
        run(&mut session, lines.as_bytes(), false)
            .unwrap_or_else(|err| panic!("shell must not fail: {err:#}"));
        String::from_utf8(session.into_output())
            .unwrap_or_else(|err| panic!("output must be utf-8: {err}"))
    }

    #[test]
    fn errors_do_not_stop_the_loop() {
        let out = script("add 'Buy milk'\nadd 'Buy milk' --tag Shopping\n");
        assert!(out.contains("error: select at least one tag"));
        assert!(out.contains("+  1. [ ] Buy milk  [Shopping]"));
    }

    #[test]
    fn quit_ignores_the_rest() {
        let out = script("quit\nadd never --tag Work\n");
        assert!(out.is_empty());
    }

    #[test]
    fn comments_and_unknown_commands() {
        let out = script("# setup\n\nfrobnicate\nadd 'open quote\n");
        assert!(out.contains("unrecognized subcommand 'frobnicate'"));
        assert!(out.contains("error: unbalanced quotes"));
    }

    #[test]
    fn no_prompt_when_not_interactive() {
        assert!(!script("list\n").contains(PROMPT));
    }

    #[test]
    fn prompt_when_interactive() {
        let mut session = Session::new(TagCatalog::empty(), Vec::new());
        run(&mut session, "list\n".as_bytes(), true)
            .unwrap_or_else(|err| panic!("shell must not fail: {err:#}"));
        let out = String::from_utf8(session.into_output()).unwrap_or_default();
        assert_eq!(out, format!("{PROMPT}No tasks yet.\n{PROMPT}"));
    }
}
