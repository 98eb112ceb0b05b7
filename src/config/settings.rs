use crate::config::{ConfigService, MessageSource};
use crate::error::{ExhandlerError, Result};
use crate::interceptor::DispatchType;
use crate::page::{ErrorPageForwards, ErrorPages};
use axum::http::{StatusCode, Uri};
use std::str::FromStr;

pub const ERROR_VIEW_PREFIX: &str = "EXHANDLER_ERROR_VIEW_PREFIX";
pub const GENERIC_VIEW: &str = "EXHANDLER_GENERIC_VIEW";
pub const ERROR_VIEWS: &str = "EXHANDLER_ERROR_VIEWS";
pub const LOG_DISPATCH_TYPES: &str = "EXHANDLER_LOG_DISPATCH_TYPES";
pub const LOG_EXCLUDE_PATHS: &str = "EXHANDLER_LOG_EXCLUDE_PATHS";
pub const ERROR_PAGE_FORWARDS: &str = "EXHANDLER_ERROR_PAGE_FORWARDS";

/// Settings of the resolution pipeline and its logging interceptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionSettings {
    pub error_view_prefix: String,
    pub generic_view: String,
    pub error_views: Vec<String>,
    pub messages: MessageSource,
    /// Dispatch types the logging interceptor writes entries for.
    pub log_dispatch_types: Vec<DispatchType>,
    /// Path patterns the logging interceptor ignores.
    pub log_exclude_paths: Vec<String>,
    /// `status=path` pairs, e.g. `404=/error-page/404`.
    pub error_page_forwards: Vec<(StatusCode, String)>,
}

impl Default for ResolutionSettings {
    fn default() -> Self {
        Self {
            error_view_prefix: "error".to_string(),
            generic_view: "error".to_string(),
            error_views: ["error/404", "error/4xx", "error/500", "error/5xx"]
                .map(str::to_string)
                .to_vec(),
            messages: MessageSource::default(),
            log_dispatch_types: vec![DispatchType::Request, DispatchType::Error],
            log_exclude_paths: ["/css/**", "/*.ico", "/error", "/error-page/**"]
                .map(str::to_string)
                .to_vec(),
            error_page_forwards: Vec::new(),
        }
    }
}

fn parse_forward(item: &str) -> Result<(StatusCode, String)> {
    let (code, path) = item.split_once('=').ok_or_else(|| {
        ExhandlerError::config(ERROR_PAGE_FORWARDS, format!("expected status=path, got {item}"))
    })?;
    let code = code.trim().parse::<u16>().map_err(|_| {
        ExhandlerError::config(ERROR_PAGE_FORWARDS, format!("{code} is not a status code"))
    })?;
    let status = StatusCode::from_u16(code)
        .ok()
        .filter(|s| s.is_client_error() || s.is_server_error())
        .ok_or(ExhandlerError::InvalidStatus { code })?;

    let path = path.trim();
    if !path.starts_with('/') || path.parse::<Uri>().is_err() {
        return Err(ExhandlerError::config(
            ERROR_PAGE_FORWARDS,
            format!("{path} is not an absolute path"),
        ));
    }
    Ok((status, path.to_string()))
}

impl ResolutionSettings {
    /// Defaults overridden by whatever `config` provides.
    pub fn from_config(config: &ConfigService) -> Result<Self> {
        let defaults = Self::default();

        let error_views = config.get_list(ERROR_VIEWS).unwrap_or(defaults.error_views);
        let log_dispatch_types = match config.get_list(LOG_DISPATCH_TYPES) {
            Some(items) => items
                .iter()
                .map(|item| {
                    DispatchType::from_str(item).map_err(|_| {
                        ExhandlerError::config(
                            LOG_DISPATCH_TYPES,
                            format!("unknown dispatch type {item}"),
                        )
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            None => defaults.log_dispatch_types,
        };

        let error_page_forwards = match config.get_list(ERROR_PAGE_FORWARDS) {
            Some(items) => items
                .iter()
                .map(|item| parse_forward(item))
                .collect::<Result<Vec<_>>>()?,
            None => defaults.error_page_forwards,
        };

        let settings = Self {
            error_view_prefix: config.get_or(ERROR_VIEW_PREFIX, &defaults.error_view_prefix),
            generic_view: config.get_or(GENERIC_VIEW, &defaults.generic_view),
            error_views,
            messages: MessageSource::from_config(config),
            log_dispatch_types,
            log_exclude_paths: config
                .get_list(LOG_EXCLUDE_PATHS)
                .unwrap_or(defaults.log_exclude_paths),
            error_page_forwards,
        };
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.generic_view.trim().is_empty() {
            return Err(ExhandlerError::config(GENERIC_VIEW, "generic view must not be empty"));
        }
        if let Some(view) = self
            .error_views
            .iter()
            .find(|view| !view.starts_with(&format!("{}/", self.error_view_prefix)))
        {
            return Err(ExhandlerError::config(
                ERROR_VIEWS,
                format!("{view} is outside {}/", self.error_view_prefix),
            ));
        }
        Ok(())
    }

    pub fn error_pages(&self) -> ErrorPages {
        self.error_views.iter().fold(
            ErrorPages::new(&self.error_view_prefix, &self.generic_view),
            |pages, view| pages.register(view.as_str()),
        )
    }

    pub fn error_page_forwards(&self) -> ErrorPageForwards {
        self.error_page_forwards
            .iter()
            .fold(ErrorPageForwards::new(), |forwards, (status, path)| {
                forwards.forward(*status, path.as_str())
            })
    }
}
