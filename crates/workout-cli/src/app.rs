//! Wiring of backend, session, interceptor, and terminal adapters.

use std::sync::Arc;

use anyhow::{Result, anyhow, bail};

use workout_api::{HttpApi, MemoryApi, MemoryCredentialStore, SessionContext, WorkoutApi};
use workout_core::{Intercepted, PageContext};

use crate::config::WorkoutConfig;
use crate::console::{ConsoleNavigator, ConsoleNotifier};
use crate::credentials::FileCredentialStore;

/// Everything a command handler needs.
pub struct App {
    pub session: Arc<SessionContext>,
    pub navigator: Arc<ConsoleNavigator>,
    pub ctx: PageContext,
    pub mock: bool,
}

impl App {
    /// Connect to the configured backend.
    ///
    /// Mock mode serves a seeded in-process backend and keeps credentials in
    /// memory; otherwise requests go over HTTP with the stored token.
    pub fn connect(config: &WorkoutConfig) -> Result<Self> {
        if config.mock {
            tracing::info!("using in-memory mock backend");
            let session = Arc::new(SessionContext::new(Arc::new(MemoryCredentialStore::new())));
            return Ok(Self::with_backend(Arc::new(MemoryApi::seeded()), session, true));
        }

        let session = Arc::new(SessionContext::new(Arc::new(
            FileCredentialStore::default_location(),
        )));
        let http = HttpApi::new(config.api_config.clone(), session.clone())?;
        tracing::debug!(url = %config.api_config.base_url, "using REST backend");
        Ok(Self::with_backend(Arc::new(http), session, false))
    }

    pub fn with_backend(
        backend: Arc<dyn WorkoutApi>,
        session: Arc<SessionContext>,
        mock: bool,
    ) -> Self {
        let notifier = Arc::new(ConsoleNotifier);
        let navigator = Arc::new(ConsoleNavigator::new());
        let api = Intercepted::new(backend, session.clone(), notifier.clone(), navigator.clone());
        let ctx = PageContext::new(Arc::new(api), notifier, navigator.clone());
        Self {
            session,
            navigator,
            ctx,
            mock,
        }
    }

    /// Fail early when a protected command is run while signed out.
    pub fn require_login(&self) -> Result<()> {
        if self.mock || self.session.is_authenticated() {
            return Ok(());
        }
        bail!("not signed in; run `workout login` first");
    }

    /// Error for a page that failed to load, naming where it redirected.
    pub fn load_error(&self, what: &str) -> anyhow::Error {
        match self.navigator.last() {
            Some(route) => anyhow!("could not load {what} (redirected to {route})"),
            None => anyhow!("could not load {what}"),
        }
    }
}
