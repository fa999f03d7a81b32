//! CLI handlers for `workout plan` subcommands.
//!
//! Implements:
//! - `workout plan list`                -- list all plans
//! - `workout plan show <plan-id>`      -- one plan with its sessions table
//! - `workout plan create --name ...`   -- create a plan
//! - `workout plan update <plan-id>`    -- rename or re-describe a plan
//! - `workout plan delete <plan-id>`    -- delete a plan and its sessions
//! - `workout plan delete-all`          -- delete every plan

use anyhow::{Context, Result, bail};

use workout_core::forms::PlanForm;
use workout_core::pages::{DashboardPage, PlanSessionsPage, delete_prompt};
use workout_core::render;

use crate::PlanCommands;
use crate::app::App;
use crate::console;

// -----------------------------------------------------------------------
// Public entry point
// -----------------------------------------------------------------------

/// Dispatch a `PlanCommands` variant to the appropriate handler.
pub async fn run_plan_command(command: PlanCommands, app: &App) -> Result<()> {
    app.require_login()?;
    match command {
        PlanCommands::List => cmd_list(app).await,
        PlanCommands::Show { plan_id } => cmd_show(app, plan_id).await,
        PlanCommands::Create { name, description } => {
            cmd_create(app, name, description.unwrap_or_default()).await
        }
        PlanCommands::Update {
            plan_id,
            name,
            description,
        } => cmd_update(app, plan_id, name, description).await,
        PlanCommands::Delete { plan_id, yes } => cmd_delete(app, plan_id, yes).await,
        PlanCommands::DeleteAll { yes } => cmd_delete_all(app, yes).await,
    }
}

// -----------------------------------------------------------------------
// workout plan list / show
// -----------------------------------------------------------------------

async fn cmd_list(app: &App) -> Result<()> {
    let mut page = DashboardPage::new(app.ctx.clone());
    if !page.mount().await {
        bail!("could not load workout plans");
    }
    print!("{}", render::plan_list(page.plans()));
    Ok(())
}

async fn cmd_show(app: &App, plan_id: i64) -> Result<()> {
    let mut page = PlanSessionsPage::new(app.ctx.clone(), plan_id);
    if !page.mount().await {
        return Err(app.load_error(&format!("plan {plan_id}")));
    }
    if let Some(plan) = page.plan() {
        print!("{}", render::plan_card(plan));
    }
    println!();
    print!("{}", render::session_table(page.sessions()));
    Ok(())
}

// -----------------------------------------------------------------------
// workout plan create / update
// -----------------------------------------------------------------------

async fn cmd_create(app: &App, name: String, description: String) -> Result<()> {
    let mut page = DashboardPage::new(app.ctx.clone());
    page.open_create();
    let form = PlanForm { name, description };
    let Some(plan) = page.submit(&form).await else {
        bail!("plan was not created");
    };
    println!("  Plan ID: {}", plan.id);
    Ok(())
}

async fn cmd_update(
    app: &App,
    plan_id: i64,
    name: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let plan = app
        .ctx
        .api
        .get_plan(plan_id)
        .await
        .with_context(|| format!("failed to load plan {plan_id}"))?;

    let mut page = DashboardPage::new(app.ctx.clone());
    page.open_edit(plan);
    let mut form = page.form();
    if let Some(name) = name {
        form.name = name;
    }
    if let Some(description) = description {
        form.description = description;
    }
    if page.submit(&form).await.is_none() {
        bail!("plan {plan_id} was not updated");
    }
    Ok(())
}

// -----------------------------------------------------------------------
// workout plan delete / delete-all
// -----------------------------------------------------------------------

async fn cmd_delete(app: &App, plan_id: i64, yes: bool) -> Result<()> {
    let plan = app
        .ctx
        .api
        .get_plan(plan_id)
        .await
        .with_context(|| format!("failed to load plan {plan_id}"))?;

    if !yes && !console::confirm(&delete_prompt(&plan.name))? {
        println!("Cancelled.");
        return Ok(());
    }

    let mut page = DashboardPage::new(app.ctx.clone());
    page.request_delete(plan);
    if !page.confirm_delete().await {
        bail!("plan {plan_id} was not deleted");
    }
    Ok(())
}

async fn cmd_delete_all(app: &App, yes: bool) -> Result<()> {
    let mut page = DashboardPage::new(app.ctx.clone());
    if !page.mount().await {
        bail!("could not load workout plans");
    }
    if !page.can_delete_all() {
        println!("No plans to delete.");
        return Ok(());
    }

    let question = format!(
        "Are you sure you want to delete all {} workout plans? This action cannot be undone.",
        page.plans().len()
    );
    if !yes && !console::confirm(&question)? {
        println!("Cancelled.");
        return Ok(());
    }

    page.open_delete_all();
    if !page.confirm_delete_all().await {
        bail!("plans were not deleted");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use workout_api::{MemoryApi, SessionContext};

    use super::*;

    fn mock_app(api: Arc<MemoryApi>) -> App {
        App::with_backend(api, Arc::new(SessionContext::in_memory()), true)
    }

    #[tokio::test]
    async fn create_update_delete_round() {
        let api = Arc::new(MemoryApi::seeded());
        let app = mock_app(api.clone());

        let create = PlanCommands::Create {
            name: "Core".to_string(),
            description: None,
        };
        run_plan_command(create, &app).await.unwrap();
        assert_eq!(api.plans_snapshot().len(), 4);

        let update = PlanCommands::Update {
            plan_id: 4,
            name: None,
            description: Some("Abs and obliques".to_string()),
        };
        run_plan_command(update, &app).await.unwrap();
        let plan = api.plans_snapshot().into_iter().find(|p| p.id == 4).unwrap();
        assert_eq!(plan.name, "Core");
        assert_eq!(plan.description.as_deref(), Some("Abs and obliques"));

        let delete = PlanCommands::Delete {
            plan_id: 4,
            yes: true,
        };
        run_plan_command(delete, &app).await.unwrap();
        assert_eq!(api.plans_snapshot().len(), 3);
    }

    #[tokio::test]
    async fn create_with_blank_name_fails() {
        let api = Arc::new(MemoryApi::seeded());
        let app = mock_app(api.clone());

        let create = PlanCommands::Create {
            name: String::new(),
            description: None,
        };
        assert!(run_plan_command(create, &app).await.is_err());
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn show_missing_plan_fails() {
        let app = mock_app(Arc::new(MemoryApi::seeded()));
        assert!(
            run_plan_command(PlanCommands::Show { plan_id: 99 }, &app)
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn delete_all_empties_the_store() {
        let api = Arc::new(MemoryApi::seeded());
        let app = mock_app(api.clone());

        run_plan_command(PlanCommands::DeleteAll { yes: true }, &app)
            .await
            .unwrap();

        assert!(api.plans_snapshot().is_empty());
        assert!(api.sessions_snapshot().is_empty());
    }
}
