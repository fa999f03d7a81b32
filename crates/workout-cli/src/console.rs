//! Terminal adapters for the notification and navigation seams.

use std::sync::Mutex;

use workout_core::{Level, Navigator, Notification, Notifier, Route};

/// Prints notifications: successes and info to stdout, errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Error => eprintln!("error: {}", notification.message),
            Level::Success | Level::Info => println!("{}", notification.message),
        }
    }
}

/// Remembers where the client was sent; commands report a redirect instead
/// of following it.
#[derive(Debug, Default)]
pub struct ConsoleNavigator {
    last: Mutex<Option<Route>>,
}

impl ConsoleNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<Route> {
        *self.last.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(%route, "navigate");
        if route == Route::Login {
            eprintln!("Run `workout login` to sign in again.");
        }
        *self.last.lock().unwrap_or_else(|e| e.into_inner()) = Some(route);
    }
}

/// Print `prompt` and read one trimmed line from stdin.
pub fn read_line(prompt: &str) -> anyhow::Result<String> {
    use std::io::Write;

    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Ask a yes/no question; anything but `y`/`yes` is a no.
pub fn confirm(question: &str) -> anyhow::Result<bool> {
    let answer = read_line(&format!("{question} [y/N] "))?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}
