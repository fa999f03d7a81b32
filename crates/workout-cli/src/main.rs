mod app;
mod auth_cmds;
mod config;
mod console;
mod credentials;
mod edit_cmd;
mod plan_cmds;
mod serve_cmd;
mod session_cmds;
#[cfg(test)]
mod test_util;

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use workout_api::models::SessionStatus;
use workout_api::{ApiConfig, MemoryApi};
use workout_core::ExerciseCatalog;
use workout_core::render;

use app::App;
use config::WorkoutConfig;

#[derive(Parser)]
#[command(name = "workout", about = "Manage workout plans, sessions, and exercises")]
struct Cli {
    /// API base URL (overrides WORKOUT_API_URL env var)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Use the in-memory mock backend instead of the REST service
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a workout config file
    Init {
        /// REST service base URL
        #[arg(long, default_value = ApiConfig::DEFAULT_URL)]
        url: String,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Sign in and store the token
    Login {
        username: String,
        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Workout plan management
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Workout session management
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Exercise catalog
    Exercise {
        #[command(subcommand)]
        command: ExerciseCommands,
    },
    /// Interactively edit the exercises of a session
    Edit {
        plan_id: i64,
        session_id: i64,
    },
    /// Serve the in-memory mock backend over HTTP
    ServeMock {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value_t = 8080)]
        port: u16,
        /// Reject requests without a bearer token (except /api/auth/*)
        #[arg(long)]
        require_auth: bool,
        /// Artificial delay added to every call, in milliseconds
        #[arg(long, default_value_t = 0)]
        latency_ms: u64,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// List all plans
    List,
    /// Show a plan and its sessions
    Show { plan_id: i64 },
    /// Create a plan
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update a plan's name or description
    Update {
        plan_id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a plan and its sessions
    Delete {
        plan_id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Delete every plan
    DeleteAll {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// List the sessions of a plan
    List { plan_id: i64 },
    /// Schedule a session
    Create {
        plan_id: i64,
        #[arg(long)]
        name: String,
        /// Workout date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// pending, completed, or skipped
        #[arg(long, default_value = "pending")]
        status: SessionStatus,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Update a session's details (its exercises are kept)
    Update {
        plan_id: i64,
        session_id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        status: Option<SessionStatus>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a session
    Delete {
        plan_id: i64,
        session_id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ExerciseCommands {
    /// List the exercise catalog
    List,
}

/// Execute the `workout init` command: write config file.
fn cmd_init(url: &str, mock: bool, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        api: config::ApiSection {
            url: Some(url.to_string()),
            mock,
        },
    };
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  api.url = {url}");
    println!("  api.mock = {mock}");
    println!();
    println!("Next: run `workout login <username>` to sign in.");

    Ok(())
}

/// Execute `workout exercise list`.
async fn cmd_exercise_list(app: &App) -> anyhow::Result<()> {
    app.require_login()?;
    let catalog = ExerciseCatalog::load(app.ctx.api.as_ref()).await;
    if catalog.exercises().is_empty() {
        anyhow::bail!("no exercises available");
    }
    print!("{}", render::catalog_list(&catalog));
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let connect = || App::connect(&WorkoutConfig::resolve(cli.api_url.as_deref(), cli.mock));

    match cli.command {
        Commands::Init { url, force } => {
            cmd_init(cli.api_url.as_deref().unwrap_or(&url), cli.mock, force)?;
        }
        Commands::Login { username, password } => {
            auth_cmds::run_login(&connect()?, &username, password).await?;
        }
        Commands::Register {
            full_name,
            username,
            email,
            password,
        } => {
            let request = auth_cmds::RegisterArgs {
                full_name,
                username,
                email,
                password,
            };
            auth_cmds::run_register(&connect()?, request).await?;
        }
        Commands::Logout => {
            auth_cmds::run_logout(&connect()?)?;
        }
        Commands::Whoami => {
            auth_cmds::run_whoami(&connect()?)?;
        }
        Commands::Plan { command } => {
            plan_cmds::run_plan_command(command, &connect()?).await?;
        }
        Commands::Session { command } => {
            session_cmds::run_session_command(command, &connect()?).await?;
        }
        Commands::Exercise {
            command: ExerciseCommands::List,
        } => {
            cmd_exercise_list(&connect()?).await?;
        }
        Commands::Edit {
            plan_id,
            session_id,
        } => {
            edit_cmd::run_edit(&connect()?, plan_id, session_id).await?;
        }
        Commands::ServeMock {
            bind,
            port,
            require_auth,
            latency_ms,
        } => {
            let api = MemoryApi::seeded().with_latency(Duration::from_millis(latency_ms));
            let options = serve_cmd::ServeOptions { require_auth };
            serve_cmd::run_serve(Arc::new(api), options, &bind, port).await?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "workout", &mut std::io::stdout());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_session_create_with_status_and_date() {
        let cli = Cli::try_parse_from([
            "workout",
            "--mock",
            "session",
            "create",
            "1",
            "--name",
            "Leg blast",
            "--date",
            "2024-02-01",
            "--status",
            "completed",
        ])
        .unwrap();

        assert!(cli.mock);
        match cli.command {
            Commands::Session {
                command:
                    SessionCommands::Create {
                        plan_id,
                        name,
                        date,
                        status,
                        notes,
                    },
            } => {
                assert_eq!(plan_id, 1);
                assert_eq!(name, "Leg blast");
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 1));
                assert_eq!(status, SessionStatus::Completed);
                assert_eq!(notes, None);
            }
            _ => panic!("expected session create"),
        }
    }

    #[test]
    fn rejects_unknown_status() {
        let result = Cli::try_parse_from([
            "workout", "session", "create", "1", "--name", "x", "--status", "done",
        ]);
        assert!(result.is_err());
    }
}
