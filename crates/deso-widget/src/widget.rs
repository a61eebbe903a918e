//! A mountable lookup widget: a [`Session`] plus its construction settings.

use std::sync::Arc;
use std::time::Duration;

use deso_core::{AppConfig, WidgetConfig};
use thiserror::Error;

use crate::backend::AddressBackend;
use crate::session::{Applied, Event, Session, DEFAULT_DEBOUNCE};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WidgetError {
    #[error("widget `{container_id}` is not initialized")]
    NotInitialized { container_id: String },
}

pub struct Widget<B> {
    config: WidgetConfig,
    backend: Arc<B>,
    debounce: Duration,
    session: Option<Session<B>>,
}

impl<B: AddressBackend> Widget<B> {
    /// Creates the widget, initializing it right away when
    /// `config.auto_initialize` is set.
    #[must_use]
    pub fn new(config: WidgetConfig, backend: Arc<B>, debounce: Duration) -> Self {
        let mut widget = Self {
            config,
            backend,
            debounce,
            session: None,
        };
        if widget.config.auto_initialize {
            widget.init();
        }
        widget
    }

    #[must_use]
    pub fn from_app_config(config: &AppConfig, backend: Arc<B>) -> Self {
        let debounce = match config.debounce_ms {
            0 => DEFAULT_DEBOUNCE,
            ms => Duration::from_millis(ms),
        };
        Self::new(config.widget.clone(), backend, debounce)
    }

    /// Creates the session. Calling it again keeps the existing session.
    pub fn init(&mut self) -> &mut Session<B> {
        let Self {
            config,
            backend,
            debounce,
            session,
        } = self;
        session.get_or_insert_with(|| {
            tracing::info!(container = %config.container_id, "widget initialized");
            Session::for_container(config.container_id.clone(), Arc::clone(backend), *debounce)
        })
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session<B>> {
        self.session.as_ref()
    }

    /// # Errors
    ///
    /// Returns [`WidgetError::NotInitialized`] before [`Widget::init`].
    pub fn session_mut(&mut self) -> Result<&mut Session<B>, WidgetError> {
        match self.session.as_mut() {
            Some(session) => Ok(session),
            None => Err(WidgetError::NotInitialized {
                container_id: self.config.container_id.clone(),
            }),
        }
    }

    /// Forwards `event` to the session.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::NotInitialized`] before [`Widget::init`].
    pub fn handle(&mut self, event: Event) -> Result<(), WidgetError> {
        self.session_mut()?.handle(event);
        Ok(())
    }

    /// Waits for the session's next completion. Never resolves while the
    /// widget is uninitialized.
    pub async fn next_completion(&mut self) -> Applied {
        match self.session.as_mut() {
            Some(session) => session.next_completion().await,
            None => std::future::pending().await,
        }
    }
}
