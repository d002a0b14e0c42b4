// Record rendering
use crate::error::{FilterError, Result};
use crate::record::LogRecord;

use self::patterns::PLACEHOLDER_REGEX;

// Literal pattern, checked by the template tests
#[allow(clippy::unwrap_used)]
mod patterns {
    use lazy_static::lazy_static;
    use regex::Regex;

    lazy_static! {
        pub(super) static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"\{([^{}]*)\}").unwrap();
    }
}

/// Timestamp layout used for `{asctime}`
pub const ASCTIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Turns a log record into text. The redacting formatter wraps one of these.
pub trait RecordRenderer: Send + Sync {
    fn render(&self, record: &LogRecord) -> Result<String>;
}

impl<F> RecordRenderer for F
where
    F: Fn(&LogRecord) -> Result<String> + Send + Sync,
{
    fn render(&self, record: &LogRecord) -> Result<String> {
        self(record)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Name,
    Level,
    Asctime,
    Message,
}

/// Renderer driven by a `{placeholder}` template
///
/// Supported placeholders are `{name}`, `{level}`, `{asctime}` and
/// `{message}`. The template is parsed once, at construction.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    template: String,
    segments: Vec<Segment>,
}

impl TemplateRenderer {
    pub fn new(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal_start = 0;

        for caps in PLACEHOLDER_REGEX.captures_iter(template) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > literal_start {
                segments.push(Segment::Literal(template[literal_start..whole.start()].to_string()));
            }
            segments.push(match name.as_str() {
                "name" => Segment::Name,
                "level" => Segment::Level,
                "asctime" => Segment::Asctime,
                "message" => Segment::Message,
                other => {
                    return Err(FilterError::Template(format!(
                        "unknown placeholder `{{{other}}}` in `{template}`"
                    )))
                }
            });
            literal_start = whole.end();
        }

        if literal_start < template.len() {
            segments.push(Segment::Literal(template[literal_start..].to_string()));
        }

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl RecordRenderer for TemplateRenderer {
    fn render(&self, record: &LogRecord) -> Result<String> {
        let mut line = String::with_capacity(self.template.len() + record.message.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => line.push_str(text),
                Segment::Name => line.push_str(&record.name),
                Segment::Level => line.push_str(record.level.as_str()),
                Segment::Asctime => {
                    line.push_str(&record.timestamp.format(ASCTIME_FORMAT).to_string())
                }
                Segment::Message => line.push_str(&record.message),
            }
        }
        Ok(line)
    }
}
