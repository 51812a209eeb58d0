use std::io::Write;

use anyhow::{Context, Result, bail};
use tasktag_app::{DraftError, TagCatalog, TaskDraft, TaskStore, diff_lists};
use tasktag_core::{Color, Tag, Task, TaskId};
use tracing::{debug, warn};

use super::ShellCommand;
use crate::view;

/// Shortest all-digit reference that may name a task by id instead of position.
const MIN_NUMERIC_ID_REF: usize = 4;

/// Whether the shell keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive state: the catalog, the store and the last list shown to the user.
///
/// Positions typed by the user refer to `rendered`, and every mutation is
/// reported as a diff against it before it is replaced.
pub struct Session<W: Write> {
    catalog: TagCatalog,
    store: TaskStore,
    rendered: Vec<Task>,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(catalog: TagCatalog, out: W) -> Self {
        Self {
            catalog,
            store: TaskStore::new(),
            rendered: Vec::new(),
            out,
        }
    }

    pub const fn catalog(&self) -> &TagCatalog {
        &self.catalog
    }

    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    pub const fn output(&mut self) -> &mut W {
        &mut self.out
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    pub fn execute(&mut self, command: ShellCommand) -> Result<Flow> {
        debug!(?command, mutates = command.mutates_tasks(), "executing shell command");
        match command {
            ShellCommand::List { json } => self.handle_list(json)?,
            ShellCommand::Tags => self.handle_tags()?,
            ShellCommand::Add { title, tags } => self.handle_add(title, &tags)?,
            ShellCommand::Edit { task, title, tags } => {
                self.handle_edit(&task, title, &tags)?;
            }
            ShellCommand::Toggle { task } => {
                let id = self.resolve_task(&task)?;
                self.store.toggle_completion(id);
                self.refresh()?;
            }
            ShellCommand::Delete { task } => {
                let id = self.resolve_task(&task)?;
                self.store.delete(id);
                self.refresh()?;
            }
            ShellCommand::TagAdd { name, color } => self.handle_tag_add(&name, color)?,
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn handle_list(&mut self, json: bool) -> Result<()> {
        self.rendered = self.store.list();
        if json {
            let text = serde_json::to_string_pretty(&self.rendered)
                .context("failed to serialize tasks")?;
            writeln!(self.out, "{text}")?;
        } else {
            write!(self.out, "{}", view::task_list(&self.rendered))?;
        }
        Ok(())
    }

    fn handle_tags(&mut self) -> Result<()> {
        write!(self.out, "{}", view::tag_catalog(&self.catalog))?;
        Ok(())
    }

    fn handle_add(&mut self, title: String, tag_refs: &[String]) -> Result<()> {
        let mut draft = TaskDraft::new();
        draft.set_title(title);
        for tag in self.resolve_tags(tag_refs)? {
            draft.select_tag(tag);
        }
        self.save(&draft)
    }

    fn handle_edit(&mut self, task: &str, title: Option<String>, tag_refs: &[String]) -> Result<()> {
        let id = self.resolve_task(task)?;
        let Some(current) = self.store.get(id) else {
            bail!("task {} no longer exists", id.short());
        };
        let mut draft = TaskDraft::edit(current);
        if let Some(title) = title {
            draft.set_title(title);
        }
        for tag in self.resolve_tags(tag_refs)? {
            draft.toggle_tag(tag);
        }
        self.save(&draft)
    }

    fn handle_tag_add(&mut self, name: &str, color: Option<Color>) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            bail!("tag name must not be empty");
        }
        let tag = self.catalog.add_custom(name, color.unwrap_or_default());
        writeln!(
            self.out,
            "Created tag {} {} ({})",
            tag.name,
            tag.color,
            tag.id.short()
        )?;
        Ok(())
    }

    fn save(&mut self, draft: &TaskDraft) -> Result<()> {
        draft.save(&mut self.store).map_err(|err: DraftError| {
            warn!(%err, "task draft rejected");
            err
        })?;
        self.refresh()
    }

    /// Print what changed since the last rendered list and adopt the new snapshot.
    fn refresh(&mut self) -> Result<()> {
        let snapshot = self.store.list();
        let diff = diff_lists(&self.rendered, &snapshot);
        write!(
            self.out,
            "{}",
            view::diff_report(&diff, &self.rendered, &snapshot)
        )?;
        self.rendered = snapshot;
        Ok(())
    }

    /// A 1-based position in the last rendered list, or a unique id reference.
    ///
    /// Positions win. An all-digit reference that is not a position is tried
    /// as an id reference once it is at least [`MIN_NUMERIC_ID_REF`] long.
    fn resolve_task(&self, reference: &str) -> Result<TaskId> {
        let reference = reference.trim();
        let position = reference.parse::<usize>().ok();
        if let Some(task) = position
            .and_then(|position| position.checked_sub(1))
            .and_then(|idx| self.rendered.get(idx))
        {
            return Ok(task.id);
        }
        if let Some(position) = position
            && reference.len() < MIN_NUMERIC_ID_REF
        {
            bail!("no task at position {position}");
        }

        let tasks = self.store.list();
        let mut matches = tasks.iter().filter(|task| task.id.matches_ref(reference));
        match (matches.next(), matches.next(), position) {
            (Some(task), None, _) => Ok(task.id),
            (Some(_), Some(_), _) => bail!("task id '{reference}' is ambiguous"),
            (None, _, Some(position)) => bail!("no task at position {position} or with id '{reference}'"),
            (None, _, None) => bail!("no task matches '{reference}'"),
        }
    }

    fn resolve_tags(&self, references: &[String]) -> Result<Vec<Tag>> {
        references
            .iter()
            .map(|reference| self.resolve_tag(reference))
            .collect()
    }

    /// A tag name (case-insensitive), or a unique id prefix.
    fn resolve_tag(&self, reference: &str) -> Result<Tag> {
        let by_name = self.catalog.find_by_name(reference);
        match by_name.as_slice() {
            [tag] => return Ok((*tag).clone()),
            [] => {}
            _ => bail!("tag name '{reference}' is ambiguous, use an id prefix"),
        }

        let mut matches = self
            .catalog
            .list()
            .iter()
            .filter(|tag| tag.id.matches_ref(reference.trim()));
        match (matches.next(), matches.next()) {
            (Some(tag), None) => Ok(tag.clone()),
            (Some(_), Some(_)) => bail!("tag id '{reference}' is ambiguous"),
            (None, _) => bail!("unknown tag '{reference}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session<Vec<u8>> {
        Session::new(TagCatalog::initialize(), Vec::new())
    }

    fn run(session: &mut Session<Vec<u8>>, command: ShellCommand) -> String {
        session.output().clear();
        session
            .execute(command)
            .unwrap_or_else(|err| panic!("command must succeed: {err:#}"));
        String::from_utf8(session.output().clone())
            .unwrap_or_else(|err| panic!("output must be utf-8: {err}"))
    }

    fn add(title: &str, tags: &[&str]) -> ShellCommand {
        ShellCommand::Add {
            title: title.into(),
            tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
        }
    }

    #[test]
    fn add_reports_insertion() {
        let mut session = session();
        let out = run(&mut session, add("  Buy milk ", &["shopping"]));
        assert!(out.starts_with("1 added\n+  1. [ ] Buy milk  [Shopping]"));
        assert_eq!(session.store().list()[0].title, "Buy milk");
    }

    #[test]
    fn add_without_tags_is_rejected() {
        let mut session = session();
        let Err(err) = session.execute(add("Buy milk", &[])) else {
            panic!("draft without tags must fail");
        };
        assert_eq!(err.downcast_ref::<DraftError>(), Some(&DraftError::NoTags));
        assert!(session.store().is_empty());
    }

    #[test]
    fn positions_follow_the_rendered_list() {
        let mut session = session();
        run(&mut session, add("first", &["Work"]));
        run(&mut session, add("second", &["Home"]));

        let out = run(&mut session, ShellCommand::Toggle { task: "2".into() });
        assert!(out.starts_with("1 updated\n~  2. [x] first"));

        let Err(err) = session.execute(ShellCommand::Toggle { task: "3".into() }) else {
            panic!("position 3 must not resolve");
        };
        assert!(err.to_string().contains("no task at position 3"));
    }

    #[test]
    fn tasks_resolve_by_id_prefix() {
        let mut session = session();
        run(&mut session, add("only", &["Work"]));
        let id = session.store().list()[0].id;

        let out = run(&mut session, ShellCommand::Delete { task: id.short() });
        assert!(out.starts_with("1 removed\n-      only"));
        assert!(session.store().is_empty());
    }

    #[test]
    fn short_ids_tell_tasks_created_together_apart() {
        let mut session = session();
        let work = session.catalog().find_by_name("Work")[0].id.short();
        run(&mut session, add("a", &[work.as_str()]));
        run(&mut session, add("b", &[work.as_str()]));

        let listed = session.store().list();
        assert_ne!(listed[0].id.short(), listed[1].id.short());

        let out = run(&mut session, ShellCommand::Toggle { task: listed[1].id.short() });
        assert!(out.starts_with("1 updated\n~  2. [x] a"));
        assert!(!session.store().list()[0].is_completed);
    }

    #[test]
    fn all_digit_ids_resolve_when_not_a_position() {
        let mut session = session();
        let id: TaskId = "0192f3a4-5b6c-7d8e-9f00-123456789012"
            .parse()
            .unwrap_or_else(|err| panic!("must parse task id: {err}"));
        let tags = session.catalog().find_by_name("Work")[0].clone();
        session.store.add(Task {
            id,
            ..Task::new("digits", vec![tags])
        });
        run(&mut session, ShellCommand::List { json: false });

        let out = run(&mut session, ShellCommand::Toggle { task: "56789012".into() });
        assert!(out.starts_with("1 updated\n~  1. [x] digits"));

        let out = run(&mut session, ShellCommand::Toggle { task: "1".into() });
        assert!(out.starts_with("1 updated\n~  1. [ ] digits"));

        let Err(err) = session.execute(ShellCommand::Toggle { task: "9012".into() }) else {
            panic!("digits inside the tail must not resolve");
        };
        assert!(err.to_string().contains("no task at position 9012"));
    }

    #[test]
    fn edit_toggles_tags_and_keeps_identity() {
        let mut session = session();
        run(&mut session, add("Buy milk", &["Shopping"]));
        let before = session.store().list()[0].clone();

        let out = run(
            &mut session,
            ShellCommand::Edit {
                task: "1".into(),
                title: Some("Buy oat milk".into()),
                tags: vec!["Shopping".into(), "Urgent".into()],
            },
        );
        assert!(out.starts_with("1 updated\n~  1. [ ] Buy oat milk  [Urgent]"));

        let after = &session.store().list()[0];
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn ambiguous_tag_names_need_an_id() {
        let mut session = session();
        run(
            &mut session,
            ShellCommand::TagAdd {
                name: "Errands".into(),
                color: None,
            },
        );
        run(
            &mut session,
            ShellCommand::TagAdd {
                name: "errands".into(),
                color: Some(Color::RED),
            },
        );

        let Err(err) = session.execute(add("Post office", &["Errands"])) else {
            panic!("ambiguous tag must fail");
        };
        assert!(err.to_string().contains("ambiguous"));

        let custom = session.catalog().find_by_name("errands");
        let id = custom[1].id.to_string();
        run(&mut session, add("Post office", &[id.as_str()]));
        assert_eq!(session.store().list()[0].tags[0].color, Color::RED);
    }

    #[test]
    fn list_resets_positions_and_prints_json() {
        let mut session = session();
        run(&mut session, add("Buy milk", &["Shopping"]));
        let out = run(&mut session, ShellCommand::List { json: true });
        let parsed: serde_json::Value = serde_json::from_str(&out)
            .unwrap_or_else(|err| panic!("list --json must be valid json: {err}"));
        assert_eq!(parsed[0]["title"], "Buy milk");
        assert_eq!(parsed[0]["is_completed"], false);
    }

    #[test]
    fn quit_stops_the_shell() {
        let mut session = session();
        let flow = session
            .execute(ShellCommand::Quit)
            .unwrap_or_else(|err| panic!("quit must succeed: {err:#}"));
        assert_eq!(flow, Flow::Quit);
    }
}
