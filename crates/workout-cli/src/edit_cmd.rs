//! `workout edit <plan-id> <session-id>`: an interactive line editor over a
//! session's exercises.
//!
//! Items are numbered from 1 on screen. Nothing is sent until `save`.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use workout_core::editor::{Direction, ExerciseField};
use workout_core::pages::SessionExercisesPage;
use workout_core::render;

use crate::app::App;

const HELP: &str = "\
Commands:
  add                    append an empty item
  rm N                   remove item N
  up N / down N          move item N
  set N FIELD VALUE      FIELD is exercise, sets, reps, weight, or duration
  catalog                list selectable exercises
  show                   redraw the list
  save                   send the list to the server
  quit                   leave without saving";

// -----------------------------------------------------------------------
// Command parsing
// -----------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Add,
    Remove(usize),
    Move(usize, Direction),
    Set(usize, ExerciseField, String),
    Catalog,
    Show,
    Save,
    Help,
    Quit,
}

/// Error returned when a line is not a valid [`EditCommand`].
#[derive(Debug, Clone)]
pub struct EditCommandParseError(pub String);

impl fmt::Display for EditCommandParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (type `help` for commands)", self.0)
    }
}

impl std::error::Error for EditCommandParseError {}

/// Parse a 1-based item number into an index.
fn item_index(raw: Option<&str>) -> Result<usize, EditCommandParseError> {
    let raw = raw.ok_or_else(|| EditCommandParseError("missing item number".to_string()))?;
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(EditCommandParseError(format!("invalid item number: {raw:?}"))),
    }
}

impl FromStr for EditCommand {
    type Err = EditCommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(EditCommandParseError("empty command".to_string()));
        };
        let cmd = match verb.to_ascii_lowercase().as_str() {
            "add" => Self::Add,
            "rm" | "remove" => Self::Remove(item_index(words.next())?),
            "up" => Self::Move(item_index(words.next())?, Direction::Up),
            "down" => Self::Move(item_index(words.next())?, Direction::Down),
            "set" => {
                let index = item_index(words.next())?;
                let field = words
                    .next()
                    .ok_or_else(|| EditCommandParseError("missing field".to_string()))?
                    .parse::<ExerciseField>()
                    .map_err(|e| EditCommandParseError(e.to_string()))?;
                let value = words.collect::<Vec<_>>().join(" ");
                Self::Set(index, field, value)
            }
            "catalog" | "exercises" => Self::Catalog,
            "show" | "ls" => Self::Show,
            "save" => Self::Save,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(EditCommandParseError(format!("unknown command: {other:?}"))),
        };
        Ok(cmd)
    }
}

// -----------------------------------------------------------------------
// Loop
// -----------------------------------------------------------------------

pub async fn run_edit(app: &App, plan_id: i64, session_id: i64) -> Result<()> {
    app.require_login()?;

    let mut page = SessionExercisesPage::new(app.ctx.clone(), plan_id, session_id);
    if !page.mount().await {
        return Err(app.load_error(&format!("session {session_id} of plan {plan_id}")));
    }
    if let Some(session) = page.session() {
        print!("{}", render::session_header(session, page.plan()));
    }
    println!();
    print!("{}", render::exercise_editor(page.exercises(), page.catalog()));
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("edit> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<EditCommand>() {
            Ok(EditCommand::Quit) => break,
            Ok(cmd) => {
                let output = apply(&mut page, cmd).await;
                if !output.is_empty() {
                    print!("{output}");
                }
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    if has_unsaved_changes(&page) {
        eprintln!("Discarded unsaved changes.");
    }
    Ok(())
}

/// Apply one command to the page and return what to print.
pub async fn apply(page: &mut SessionExercisesPage, cmd: EditCommand) -> String {
    match cmd {
        EditCommand::Add => {
            let index = page.editor().add();
            format!("Added item {}.\n", index + 1)
        }
        EditCommand::Remove(index) => {
            if page.editor().remove(index) {
                render::exercise_editor(page.exercises(), page.catalog())
            } else {
                no_item(index)
            }
        }
        EditCommand::Move(index, direction) => {
            if index >= page.exercises().len() {
                no_item(index)
            } else if page.editor().move_item(index, direction) {
                render::exercise_editor(page.exercises(), page.catalog())
            } else {
                "Already at the edge of the list.\n".to_string()
            }
        }
        EditCommand::Set(index, ExerciseField::ExerciseId, value) => {
            let Ok(id) = value.trim().parse::<i64>() else {
                return format!("Invalid exercise id: {value:?}\n");
            };
            let Some(exercise) = page.catalog().find(id).cloned() else {
                return format!("Unknown exercise {id}; see `catalog`.\n");
            };
            if page.editor().select_exercise(index, exercise.id) {
                format!("Item {} is now {}.\n", index + 1, exercise.name)
            } else {
                no_item(index)
            }
        }
        EditCommand::Set(index, field, value) => {
            if page.editor().update_from_input(index, field, value.trim()) {
                String::new()
            } else {
                no_item(index)
            }
        }
        EditCommand::Catalog => render::catalog_list(page.catalog()),
        EditCommand::Show => render::exercise_editor(page.exercises(), page.catalog()),
        EditCommand::Save => {
            if page.save().await {
                render::exercise_editor(page.exercises(), page.catalog())
            } else {
                String::new()
            }
        }
        EditCommand::Help => format!("{HELP}\n"),
        EditCommand::Quit => String::new(),
    }
}

fn no_item(index: usize) -> String {
    format!("No item {}.\n", index + 1)
}

fn has_unsaved_changes(page: &SessionExercisesPage) -> bool {
    page.session()
        .is_some_and(|s| s.exercise_inputs().as_slice() != page.exercises())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use workout_api::{MemoryApi, SessionContext};

    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!("add".parse::<EditCommand>().unwrap(), EditCommand::Add);
        assert_eq!("rm 2".parse::<EditCommand>().unwrap(), EditCommand::Remove(1));
        assert_eq!(
            "up 3".parse::<EditCommand>().unwrap(),
            EditCommand::Move(2, Direction::Up)
        );
        assert_eq!(
            "DOWN 1".parse::<EditCommand>().unwrap(),
            EditCommand::Move(0, Direction::Down)
        );
        assert_eq!(
            "set 1 reps 12".parse::<EditCommand>().unwrap(),
            EditCommand::Set(0, ExerciseField::Reps, "12".to_string())
        );
        assert_eq!(
            "set 2 weight".parse::<EditCommand>().unwrap(),
            EditCommand::Set(1, ExerciseField::Weight, String::new())
        );
        assert_eq!("q".parse::<EditCommand>().unwrap(), EditCommand::Quit);
    }

    #[test]
    fn rejects_bad_commands() {
        assert!("rm".parse::<EditCommand>().is_err());
        assert!("rm 0".parse::<EditCommand>().is_err());
        assert!("up x".parse::<EditCommand>().is_err());
        assert!("set 1 color red".parse::<EditCommand>().is_err());
        assert!("jump".parse::<EditCommand>().is_err());
    }

    #[tokio::test]
    async fn scripted_edit_session_saves() {
        let api = Arc::new(MemoryApi::seeded());
        let app = App::with_backend(api.clone(), Arc::new(SessionContext::in_memory()), true);
        let mut page = SessionExercisesPage::new(app.ctx.clone(), 1, 1);
        assert!(page.mount().await);

        for line in ["add", "set 3 exercise 6", "set 3 sets 3", "up 3", "rm 1"] {
            apply(&mut page, line.parse().unwrap()).await;
        }
        assert!(has_unsaved_changes(&page));

        let out = apply(&mut page, EditCommand::Save).await;
        assert!(out.contains("Pull-ups"));
        assert!(!has_unsaved_changes(&page));

        let stored = api
            .sessions_snapshot()
            .into_iter()
            .find(|s| s.id == 1)
            .unwrap();
        let ids: Vec<i64> = stored.session_exercises.iter().map(|e| e.exercise_id).collect();
        assert_eq!(ids, vec![6, 4]);
    }

    #[tokio::test]
    async fn unknown_exercise_and_missing_item_are_reported() {
        let app = App::with_backend(
            Arc::new(MemoryApi::seeded()),
            Arc::new(SessionContext::in_memory()),
            true,
        );
        let mut page = SessionExercisesPage::new(app.ctx.clone(), 1, 2);
        assert!(page.mount().await);

        let out = apply(&mut page, "set 1 exercise 99".parse().unwrap()).await;
        assert!(out.contains("Unknown exercise 99"));

        let out = apply(&mut page, "set 1 exercise 2".parse().unwrap()).await;
        assert_eq!(out, "No item 1.\n");

        let out = apply(&mut page, "up 1".parse().unwrap()).await;
        assert_eq!(out, "No item 1.\n");
    }

    #[tokio::test]
    async fn foreign_session_reports_redirect() {
        let app = App::with_backend(
            Arc::new(MemoryApi::seeded()),
            Arc::new(SessionContext::in_memory()),
            true,
        );
        let err = run_edit(&app, 1, 3).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not load session 3 of plan 1 (redirected to /plans/1/sessions)"
        );
    }
}
