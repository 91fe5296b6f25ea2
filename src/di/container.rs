use anyhow::Context;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::interactor::{
    InMemorySessionStore, PortfolioInteractorImpl, SessionStore, TokenInteractorImpl,
};
use crate::vybe::{DataProvider, VybeClient};

/// Display and query limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub transfers_fetch_limit: usize,
    pub transfers_display_limit: usize,
    pub holdings_display_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transfers_fetch_limit: 10,
            transfers_display_limit: 5,
            holdings_display_limit: 10,
        }
    }
}

impl From<&AppConfig> for Settings {
    fn from(config: &AppConfig) -> Self {
        Self {
            transfers_fetch_limit: config.transfers_fetch_limit.max(1),
            transfers_display_limit: config.transfers_display_limit.max(1),
            holdings_display_limit: config.holdings_display_limit.max(1),
        }
    }
}

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    sessions: Arc<dyn SessionStore>,
    data_provider: Arc<dyn DataProvider>,
    settings: Settings,
}

impl ServiceContainer {
    /// Wires the Vybe client and an in-memory session store
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let client = VybeClient::new(config.vybe()).context("Failed to create Vybe API client")?;
        let sessions = InMemorySessionStore::new(config.pending_input_ttl());

        Ok(Self::with_components(
            Arc::new(sessions),
            Arc::new(client),
            Settings::from(config),
        ))
    }

    pub fn with_components(
        sessions: Arc<dyn SessionStore>,
        data_provider: Arc<dyn DataProvider>,
        settings: Settings,
    ) -> Self {
        Self {
            sessions,
            data_provider,
            settings,
        }
    }

    // Accessor methods

    pub fn sessions(&self) -> Arc<dyn SessionStore> {
        self.sessions.clone()
    }

    pub fn data_provider(&self) -> Arc<dyn DataProvider> {
        self.data_provider.clone()
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn portfolio_interactor(&self) -> Arc<PortfolioInteractorImpl> {
        Arc::new(PortfolioInteractorImpl::new(
            self.data_provider(),
            self.settings.transfers_fetch_limit,
        ))
    }

    pub fn token_interactor(&self) -> Arc<TokenInteractorImpl> {
        Arc::new(TokenInteractorImpl::new(
            self.data_provider(),
            self.settings.transfers_fetch_limit,
        ))
    }
}
