//! CLI handlers for `workout session` subcommands.

use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};

use workout_api::models::SessionStatus;
use workout_core::forms::SessionForm;
use workout_core::pages::{PlanSessionsPage, delete_prompt};
use workout_core::render;

use crate::SessionCommands;
use crate::app::App;
use crate::console;

/// Field overrides shared by `create` and `update`.
#[derive(Debug, Default)]
struct SessionEdits {
    name: Option<String>,
    date: Option<NaiveDate>,
    status: Option<SessionStatus>,
    notes: Option<String>,
}

/// Dispatch a `SessionCommands` variant to the appropriate handler.
pub async fn run_session_command(command: SessionCommands, app: &App) -> Result<()> {
    app.require_login()?;
    match command {
        SessionCommands::List { plan_id } => cmd_list(app, plan_id).await,
        SessionCommands::Create {
            plan_id,
            name,
            date,
            status,
            notes,
        } => {
            let edits = SessionEdits {
                name: Some(name),
                date,
                status: Some(status),
                notes,
            };
            cmd_create(app, plan_id, edits).await
        }
        SessionCommands::Update {
            plan_id,
            session_id,
            name,
            date,
            status,
            notes,
        } => {
            let edits = SessionEdits {
                name,
                date,
                status,
                notes,
            };
            cmd_update(app, plan_id, session_id, edits).await
        }
        SessionCommands::Delete {
            plan_id,
            session_id,
            yes,
        } => cmd_delete(app, plan_id, session_id, yes).await,
    }
}

async fn load(app: &App, plan_id: i64) -> Result<PlanSessionsPage> {
    let mut page = PlanSessionsPage::new(app.ctx.clone(), plan_id);
    if !page.mount().await {
        return Err(app.load_error(&format!("plan {plan_id}")));
    }
    Ok(page)
}

async fn cmd_list(app: &App, plan_id: i64) -> Result<()> {
    let page = load(app, plan_id).await?;
    if let Some(plan) = page.plan() {
        println!("{}", plan.name);
        println!();
    }
    print!("{}", render::session_table(page.sessions()));
    Ok(())
}

async fn cmd_create(app: &App, plan_id: i64, edits: SessionEdits) -> Result<()> {
    let mut page = load(app, plan_id).await?;
    page.open_create();
    let form = apply(page.form(Local::now().date_naive()), edits);
    if !page.submit(&form).await {
        bail!("session was not created");
    }
    Ok(())
}

async fn cmd_update(app: &App, plan_id: i64, session_id: i64, edits: SessionEdits) -> Result<()> {
    let mut page = load(app, plan_id).await?;
    let Some(session) = page.find_session(session_id).cloned() else {
        bail!("session {session_id} not found in plan {plan_id}");
    };
    page.open_edit(session);
    let form = apply(page.form(Local::now().date_naive()), edits);
    if !page.submit(&form).await {
        bail!("session {session_id} was not updated");
    }
    Ok(())
}

async fn cmd_delete(app: &App, plan_id: i64, session_id: i64, yes: bool) -> Result<()> {
    let mut page = load(app, plan_id).await?;
    let Some(session) = page.find_session(session_id).cloned() else {
        bail!("session {session_id} not found in plan {plan_id}");
    };
    if !yes && !console::confirm(&delete_prompt(&session.name))? {
        println!("Cancelled.");
        return Ok(());
    }
    page.request_delete(session);
    if !page.confirm_delete().await {
        bail!("session {session_id} was not deleted");
    }
    Ok(())
}

fn apply(mut form: SessionForm, edits: SessionEdits) -> SessionForm {
    if let Some(name) = edits.name {
        form.name = name;
    }
    if let Some(date) = edits.date {
        form.workout_date = date;
    }
    if let Some(status) = edits.status {
        form.status = status;
    }
    if let Some(notes) = edits.notes {
        form.notes = notes;
    }
    form
}
