use chrono::{DateTime, Local};
use std::fmt::Display;
use tracing::Level;

/// A single log record before rendering
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Logger name (the tracing target)
    pub name: String,
    pub level: Level,
    pub timestamp: DateTime<Local>,
    pub message: String,
}

impl LogRecord {
    pub fn new(name: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level,
            timestamp: Local::now(),
            message: message.into(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Join `key=value` pairs, terminating each one with `separator`.
///
/// This is the line shape the redactor expects, e.g. a database row zipped
/// with its column names: `name=Bob;email=bob@dylan.com;`.
pub fn row_message<K, V, I>(pairs: I, separator: &str) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    pairs
        .into_iter()
        .map(|(key, value)| format!("{key}={value}{separator}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_message_terminates_every_pair() {
        let columns = ["name", "email", "last_login"];
        let values = ["Bob", "bob@dylan.com", "2019-11-14 06:14:24"];
        let line = row_message(columns.iter().zip(values.iter()), ";");
        assert_eq!(line, "name=Bob;email=bob@dylan.com;last_login=2019-11-14 06:14:24;");
    }

    #[test]
    fn test_row_message_mixed_value_types() {
        let pairs: [(&str, &dyn Display); 2] = [("id", &7), ("ip", &"10.0.0.1")];
        let line = row_message(pairs, "|");
        assert_eq!(line, "id=7|ip=10.0.0.1|");
    }

    #[test]
    fn test_row_message_empty() {
        let pairs: Vec<(&str, &str)> = Vec::new();
        assert_eq!(row_message(pairs, ";"), "");
    }
}
