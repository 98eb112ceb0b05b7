use crate::config::ConfigService;
use std::collections::HashMap;

/// Prefix of message entries in [`ConfigService`].
pub const MESSAGE_PREFIX: &str = "message.";

/// Message code lookup
///
/// Resolvers pass reasons and messages through here so an exception can be
/// raised with a code such as `error.bad` and answered with readable text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageSource {
    messages: HashMap<String, String>,
}

impl MessageSource {
    /// Every `message.<code>` entry of `config`.
    pub fn from_config(config: &ConfigService) -> Self {
        Self {
            messages: config.with_prefix(MESSAGE_PREFIX).into_iter().collect(),
        }
    }

    pub fn with(mut self, code: impl Into<String>, text: impl Into<String>) -> Self {
        self.messages.insert(code.into(), text.into());
        self
    }

    pub fn resolve(&self, code: &str) -> String {
        self.messages
            .get(code)
            .cloned()
            .unwrap_or_else(|| code.to_string())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.messages.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
