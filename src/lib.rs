#[macro_use]
extern crate serde;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::config::Config;
use crate::error::{BackendError, ConfigurationError};

pub mod caller;
pub mod config;
pub mod data;
pub mod error;
pub mod registry;
pub mod resp;
pub mod role;
pub mod util;

pub use crate::caller::Caller;
pub use crate::error::RegistryError;
pub use crate::registry::Registry;
pub use crate::role::Role;

/// Loads the environment and configuration and deploys a fresh registry
/// owned by the configured super admin.
pub fn create(log_level: Option<Level>) -> Result<Registry, BackendError> {
    if let Some(l) = log_level {
        let subscriber = FmtSubscriber::builder().with_max_level(l).finish();

        if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Unable to set global logger: {}", err);
        };
    }

    tracing::info!("Reading .env file...");
    if dotenv::dotenv().is_err() {
        tracing::warn!("Unable to load .env file.");
    }

    tracing::info!("Loading configuration...");
    let c = match Config::load() {
        Ok(c) => {
            tracing::info!("Configuration loaded.");
            c
        }
        Err(ConfigurationError::NotFound(_)) => {
            let c = Config::default();
            if c.save().is_err() {
                tracing::warn!("Unable to save generated configuration.");
            }
            c
        }
        Err(other) => {
            tracing::error!("Configuration error: {}", other);
            return Err(other.into());
        }
    };

    tracing::info!("Deploying registry for super admin {}", c.super_admin);
    Ok(Registry::deploy_named(c.super_admin, &c.super_admin_name))
}
