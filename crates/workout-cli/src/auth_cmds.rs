//! CLI handlers for `workout login|register|logout|whoami`.

use anyhow::{Context, Result, bail};

use workout_api::models::{AuthResponse, LoginRequest, RegisterRequest};

use crate::app::App;
use crate::console;

pub struct RegisterArgs {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: Option<String>,
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(p) => Ok(p),
        None => console::read_line("Password: "),
    }
}

fn store(app: &App, auth: &AuthResponse) -> Result<()> {
    if !auth.authenticated {
        bail!("the service did not authenticate this account");
    }
    app.session
        .sign_in(auth)
        .context("failed to store credentials")?;
    Ok(())
}

// -----------------------------------------------------------------------
// workout login <username>
// -----------------------------------------------------------------------

pub async fn run_login(app: &App, username: &str, password: Option<String>) -> Result<()> {
    let request = LoginRequest {
        username: username.to_string(),
        password: password_or_prompt(password)?,
    };
    let auth = app
        .ctx
        .api
        .login(&request)
        .await
        .context("login failed")?;
    store(app, &auth)?;

    println!("Login successful");
    if app.mock {
        println!("(mock mode: the token is not kept after this command)");
    }
    Ok(())
}

// -----------------------------------------------------------------------
// workout register
// -----------------------------------------------------------------------

pub async fn run_register(app: &App, args: RegisterArgs) -> Result<()> {
    let request = RegisterRequest {
        full_name: args.full_name,
        username: args.username,
        email: args.email,
        password: password_or_prompt(args.password)?,
    };
    let auth = app
        .ctx
        .api
        .register(&request)
        .await
        .context("registration failed")?;
    store(app, &auth)?;

    println!("Registration successful");
    Ok(())
}

// -----------------------------------------------------------------------
// workout logout / whoami
// -----------------------------------------------------------------------

pub fn run_logout(app: &App) -> Result<()> {
    app.session
        .sign_out()
        .context("failed to clear credentials")?;
    println!("Logged out.");
    Ok(())
}

pub fn run_whoami(app: &App) -> Result<()> {
    match (app.session.is_authenticated(), app.session.user()) {
        (true, Some(user)) => {
            println!("{} ({})", user.full_name, user.username);
            println!("  email: {}", user.email);
        }
        (true, None) => println!("Signed in."),
        (false, _) => println!("Not signed in."),
    }
    Ok(())
}
