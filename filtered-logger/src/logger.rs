// Logger assembly
use std::fmt::Display;
use std::io;

use tracing::{debug, dispatcher, Dispatch};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

use crate::config::LoggerConfig;
use crate::error::Result;
use crate::formatter::RedactingFormatter;
use crate::record::row_message;
use crate::USER_DATA_LOGGER;

/// The `user_data` logger.
///
/// It owns its own dispatcher and is never installed as the global default,
/// so records stay on its single redacting sink and nothing reaches other
/// subscribers. Build one explicitly and hand it to the code that logs.
#[derive(Clone, Debug)]
pub struct UserDataLogger {
    dispatch: Dispatch,
    separator: String,
}

impl UserDataLogger {
    /// Logger writing redacted lines to stderr
    pub fn new(config: &LoggerConfig) -> Result<Self> {
        Self::with_writer(config, io::stderr)
    }

    pub fn with_writer<W>(config: &LoggerConfig, make_writer: W) -> Result<Self>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let level = config.level_filter()?;
        let formatter = RedactingFormatter::from_config(config)?;

        let layer = fmt::layer()
            .with_ansi(false)
            .with_writer(make_writer)
            .event_format(formatter)
            .with_filter(Targets::new().with_target(USER_DATA_LOGGER, level));
        let subscriber = tracing_subscriber::registry().with(layer);

        debug!(logger = USER_DATA_LOGGER, %level, "Logger assembled");

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
            separator: config.separator.clone(),
        })
    }

    /// Dispatcher for use with `tracing::dispatcher::with_default`
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Run `f` with this logger as the thread's default subscriber
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, f)
    }

    pub fn debug(&self, message: &str) {
        self.in_scope(|| tracing::debug!(target: USER_DATA_LOGGER, "{}", message));
    }

    pub fn info(&self, message: &str) {
        self.in_scope(|| tracing::info!(target: USER_DATA_LOGGER, "{}", message));
    }

    pub fn warn(&self, message: &str) {
        self.in_scope(|| tracing::warn!(target: USER_DATA_LOGGER, "{}", message));
    }

    pub fn error(&self, message: &str) {
        self.in_scope(|| tracing::error!(target: USER_DATA_LOGGER, "{}", message));
    }

    /// Log a row as `column=value` pairs at INFO
    pub fn log_row<C, V>(&self, columns: C, values: V)
    where
        C: IntoIterator,
        C::Item: Display,
        V: IntoIterator,
        V::Item: Display,
    {
        self.info(&row_message(columns.into_iter().zip(values), &self.separator));
    }
}

/// Build the `user_data` logger with the default PII configuration
pub fn get_logger() -> Result<UserDataLogger> {
    UserDataLogger::new(&LoggerConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;

    #[test]
    fn test_get_logger_builds() {
        assert!(get_logger().is_ok());
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let config = LoggerConfig::default().with_log_level("chatty");
        assert!(matches!(UserDataLogger::new(&config), Err(FilterError::InvalidLevel(_))));
    }

    #[test]
    fn test_in_scope_returns_value() {
        let logger = get_logger().unwrap();
        assert_eq!(logger.in_scope(|| 42), 42);
    }
}
