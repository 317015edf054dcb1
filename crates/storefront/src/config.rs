//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `TROCLY_DATA_DIR` - Directory for file-backed storage (default: `.trocly`)
//! - `TROCLY_FREE_SHIPPING_THRESHOLD` - Subtotal above which shipping is free (default: 100)
//! - `TROCLY_SHIPPING_FLAT_RATE` - Shipping charged at or below the threshold (default: 10)
//! - `TROCLY_EVENT_CAPACITY` - Events buffered per listener (default: 64)

use std::path::PathBuf;

use thiserror::Error;
use trocly_core::Price;

use crate::cart::ShippingPolicy;
use crate::events::EventBus;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront state configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory the file storage backend writes to
    pub data_dir: PathBuf,
    /// Shipping rules applied to cart summaries
    pub shipping: ShippingPolicy,
    /// Broadcast buffer per event subscriber
    pub event_capacity: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            shipping: ShippingPolicy::default(),
            event_capacity: EventBus::DEFAULT_CAPACITY,
        }
    }
}

const DEFAULT_DATA_DIR: &str = ".trocly";

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = lookup("TROCLY_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or(defaults.data_dir, PathBuf::from);

        let free_threshold = parse_price(
            &lookup,
            "TROCLY_FREE_SHIPPING_THRESHOLD",
            defaults.shipping.free_threshold,
        )?;
        let flat_rate = parse_price(
            &lookup,
            "TROCLY_SHIPPING_FLAT_RATE",
            defaults.shipping.flat_rate,
        )?;

        let event_capacity = match lookup("TROCLY_EVENT_CAPACITY") {
            Some(raw) => {
                let capacity = raw.trim().parse::<usize>().map_err(|e| {
                    ConfigError::InvalidEnvVar("TROCLY_EVENT_CAPACITY".to_string(), e.to_string())
                })?;
                if capacity == 0 {
                    return Err(ConfigError::InvalidEnvVar(
                        "TROCLY_EVENT_CAPACITY".to_string(),
                        "must be at least 1".to_string(),
                    ));
                }
                capacity
            }
            None => defaults.event_capacity,
        };

        Ok(Self {
            data_dir,
            shipping: ShippingPolicy {
                free_threshold,
                flat_rate,
            },
            event_capacity,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional price variable, falling back to `default` when unset.
fn parse_price(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Price,
) -> Result<Price, ConfigError> {
    lookup(key).map_or(Ok(default), |raw| {
        raw.parse::<Price>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
