// Redacting formatter and its tracing-subscriber hook
use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::config::LoggerConfig;
use crate::error::Result;
use crate::record::{row_message, LogRecord};
use crate::redactor::FieldRedactor;
use crate::template::{RecordRenderer, TemplateRenderer};

/// Token substituted for sensitive values
pub const REDACTION: &str = "********";
/// Delimiter between `key=value` pairs
pub const SEPARATOR: &str = ";";
/// Output template for rendered records
pub const FORMAT: &str = "[USER_DATA] {name} {level} {asctime}: {message}";

/// Wraps a record renderer and redacts whatever it produces
pub struct RedactingFormatter<R = TemplateRenderer> {
    renderer: R,
    redactor: FieldRedactor,
    redaction_enabled: bool,
}

impl RedactingFormatter<TemplateRenderer> {
    /// Formatter over `fields` using the default token, separator and template
    pub fn new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::with_renderer(
            TemplateRenderer::new(FORMAT)?,
            FieldRedactor::new(fields, REDACTION, SEPARATOR)?,
        ))
    }

    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        let renderer = TemplateRenderer::new(&config.template)?;
        let redactor = FieldRedactor::new(&config.fields, &config.redaction, &config.separator)?;
        tracing::debug!(
            fields = redactor.fields().len(),
            redaction_enabled = config.redaction_enabled,
            "Redacting formatter configured"
        );

        let mut formatter = Self::with_renderer(renderer, redactor);
        formatter.redaction_enabled = config.redaction_enabled;
        Ok(formatter)
    }
}

impl<R: RecordRenderer> RedactingFormatter<R> {
    pub fn with_renderer(renderer: R, redactor: FieldRedactor) -> Self {
        Self {
            renderer,
            redactor,
            redaction_enabled: true,
        }
    }

    pub fn fields(&self) -> &[String] {
        self.redactor.fields()
    }

    pub fn redactor(&self) -> &FieldRedactor {
        &self.redactor
    }

    /// Render `record` and redact the configured fields.
    ///
    /// # Errors
    ///
    /// Returns the renderer's error untouched.
    pub fn format(&self, record: &LogRecord) -> Result<String> {
        let rendered = self.renderer.render(record)?;
        if !self.redaction_enabled {
            return Ok(rendered);
        }
        Ok(self.redactor.redact(&rendered))
    }

    fn record_from_event(&self, event: &Event<'_>) -> LogRecord {
        let metadata = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let separator = self.redactor.separator();
        let fields = row_message(visitor.fields, separator);
        // Structured fields each open their own segment after the message
        let message = match (visitor.message.is_empty(), fields.is_empty()) {
            (_, true) => visitor.message,
            (true, false) => fields,
            (false, false) if visitor.message.ends_with(separator) => visitor.message + &fields,
            (false, false) => format!("{}{separator}{fields}", visitor.message),
        };

        LogRecord::new(metadata.target(), *metadata.level(), message)
    }
}

impl<S, N, R> FormatEvent<S, N> for RedactingFormatter<R>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
    R: RecordRenderer,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let record = self.record_from_event(event);
        // fmt::Error carries no payload; the subscriber drops the line
        let line = self.format(&record).map_err(|_| fmt::Error)?;
        writeln!(writer, "{line}")
    }
}

/// Collects the `message` field and any structured fields of an event
#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: Vec<(&'static str, String)>,
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push((field.name(), format!("{value:?}")));
        }
    }
}
