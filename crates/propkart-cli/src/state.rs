//! Application state wiring the config, HTTP backend, and credentials.
//!
//! The page components are generic over backend and credential traits;
//! AppState pins them to the concrete infra implementations.

use std::sync::Arc;

use anyhow::Context;

use propkart_core::credentials::{CredentialProvider, StaticCredentials};
use propkart_core::enhancer::PageEnhancer;
use propkart_core::widget::ChatWidget;
use propkart_infra::config::{
    BASE_URL_ENV, default_config_path, load_client_config, with_base_url_override,
};
use propkart_infra::http::HttpBackend;
use propkart_types::config::ClientConfig;

use crate::cli::Cli;

/// Chat widget pinned to the infra implementations.
pub type ConcreteChatWidget = ChatWidget<HttpBackend, Arc<dyn CredentialProvider>>;

/// Page enhancer pinned to the infra implementations.
pub type ConcretePageEnhancer = PageEnhancer<HttpBackend>;

pub struct AppState {
    pub config: ClientConfig,
    pub backend: HttpBackend,
    pub credentials: Arc<dyn CredentialProvider>,
}

impl AppState {
    /// Load config, apply CLI overrides, and build the backend.
    pub async fn init(cli: &Cli) -> anyhow::Result<Self> {
        let config = match cli.config.clone().or_else(default_config_path) {
            Some(path) => load_client_config(&path).await,
            None => with_base_url_override(ClientConfig::default(), std::env::var(BASE_URL_ENV).ok()),
        };
        let config = with_base_url_override(config, cli.base_url.clone());

        let backend = HttpBackend::new(&config)
            .with_context(|| format!("cannot use server at {}", config.base_url))?;

        let credentials: Arc<dyn CredentialProvider> = match &cli.csrf_token {
            Some(token) => Arc::new(StaticCredentials::new(token.clone())),
            None => Arc::new(backend.cookie_credentials(&config.csrf_cookie_name)?),
        };

        tracing::debug!(base_url = %config.base_url, "Client state initialized");
        Ok(Self {
            config,
            backend,
            credentials,
        })
    }

    /// A fresh, unmounted chat widget.
    pub fn widget(&self) -> ConcreteChatWidget {
        ChatWidget::new(
            self.backend.clone(),
            Arc::clone(&self.credentials),
            self.config.widget.clone(),
        )
    }

    pub fn enhancer(&self) -> ConcretePageEnhancer {
        PageEnhancer::new(self.backend.clone(), self.config.search.clone())
    }
}
