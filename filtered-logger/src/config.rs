// Logger configuration
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::error::{FilterError, Result};
use crate::formatter::{FORMAT, REDACTION, SEPARATOR};
use crate::PII_FIELDS;

/// Everything the redacting logger needs, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// When false, rendered lines are emitted without redaction
    pub redaction_enabled: bool,
    pub fields: Vec<String>,
    pub redaction: String,
    pub separator: String,
    /// Output template, see [`crate::TemplateRenderer`]
    pub template: String,
    pub log_level: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            redaction_enabled: true,
            fields: PII_FIELDS.iter().map(|field| field.to_string()).collect(),
            redaction: REDACTION.to_string(),
            separator: SEPARATOR.to_string(),
            template: FORMAT.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl LoggerConfig {
    /// Parse a JSON document; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_redaction(mut self, redaction: impl Into<String>) -> Self {
        self.redaction = redaction.into();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn with_log_level(mut self, log_level: impl Into<String>) -> Self {
        self.log_level = log_level.into();
        self
    }

    pub fn with_redaction_enabled(mut self, enabled: bool) -> Self {
        self.redaction_enabled = enabled;
        self
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| FilterError::InvalidLevel(self.log_level.clone()))
    }
}
