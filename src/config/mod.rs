//! Configuration loading and management for the Award Intake Engine.
//!
//! This module loads the intake configuration from a YAML file: the fiscal
//! year prefix, the default log filter, output locations and the batch
//! side-effect toggles.
//!
//! # Example
//!
//! ```no_run
//! use award_intake::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/intake.yaml").unwrap();
//! println!("Counter store: {}", config.config().paths.counter_store.display());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ActionsConfig, IntakeConfig, PathsConfig};
