use crate::error::{ExhandlerError, Result};
use dashmap::DashMap;
use std::env;
use std::str::FromStr;
use std::sync::Arc;

mod messages;
mod settings;

pub use messages::MessageSource;
pub use settings::ResolutionSettings;

/// Configuration service
///
/// A shared key/value store. [`ConfigService::from_env`] seeds it with the
/// process environment; values can be overridden with [`ConfigService::set`].
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse the value stored under `key`; `Ok(None)` when it is not set.
    pub fn get_parsed<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key)
            .map(|raw| {
                raw.trim()
                    .parse::<T>()
                    .map_err(|e| ExhandlerError::config(key, e.to_string()))
            })
            .transpose()
    }

    /// Comma separated list; blank items are dropped.
    pub fn get_list(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
    }

    /// All entries whose key starts with `prefix`, with the prefix removed,
    /// sorted by key.
    pub fn with_prefix(&self, prefix: &str) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .config
            .iter()
            .filter_map(|entry| {
                entry
                    .key()
                    .strip_prefix(prefix)
                    .map(|rest| (rest.to_string(), entry.value().clone()))
            })
            .collect();
        entries.sort();
        entries
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }
}
