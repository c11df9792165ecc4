//! Application state for the Award Intake Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::IntakeConfig;
use crate::intake::CounterStore;

/// Shared application state.
///
/// Holds the intake configuration and the counter store the provisional
/// identifiers are read from.
#[derive(Clone)]
pub struct AppState {
    config: Arc<IntakeConfig>,
    counter_store: Arc<dyn CounterStore + Send + Sync>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: IntakeConfig, counter_store: impl CounterStore + Send + Sync + 'static) -> Self {
        Self {
            config: Arc::new(config),
            counter_store: Arc::new(counter_store),
        }
    }

    /// Returns the intake configuration.
    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    /// Returns the counter store.
    pub fn counter_store(&self) -> &dyn CounterStore {
        self.counter_store.as_ref()
    }
}
