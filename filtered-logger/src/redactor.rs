use std::borrow::Cow;

use regex::Regex;
use tracing::error;

use crate::error::Result;

/// Field redactor for `key=value` log lines
///
/// The line is walked one separator-delimited segment at a time and only the
/// key at the head of a segment is considered. In the first segment the key
/// may sit behind a free-text prefix (the rendered template), as long as it
/// owns the segment's first `=`. Later segments may only start with
/// whitespace. Values of unlisted keys are never inspected, so
/// `url=https://x.io/?name=bob` stays intact under the field `name`.
#[derive(Debug, Clone)]
pub struct FieldRedactor {
    fields: Vec<String>,
    heads: Option<KeyHeads>,
    redaction: String,
    separator: String,
}

#[derive(Debug, Clone)]
struct KeyHeads {
    /// First segment: optional prefix without `=`, ending on a non-key char
    leading: Regex,
    /// Any later segment: optional whitespace, then the key
    following: Regex,
}

impl KeyHeads {
    fn new(fields: &[String]) -> Result<Self> {
        let alternation = fields
            .iter()
            .map(|field| regex::escape(field))
            .collect::<Vec<_>>()
            .join("|");
        Ok(Self {
            leading: Regex::new(&format!(r"^(?:[^=]*[^\w.\-=])?(?:{alternation})="))?,
            following: Regex::new(&format!(r"^\s*(?:{alternation})="))?,
        })
    }
}

impl FieldRedactor {
    pub fn new<I, S>(
        fields: I,
        redaction: impl Into<String>,
        separator: impl Into<String>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields: Vec<String> = fields
            .into_iter()
            .map(|field| field.as_ref().to_string())
            .filter(|field| !field.is_empty())
            .collect();

        let heads = if fields.is_empty() {
            None
        } else {
            Some(KeyHeads::new(&fields)?)
        };

        Ok(Self {
            fields,
            heads,
            redaction: redaction.into(),
            separator: separator.into(),
        })
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn redaction(&self) -> &str {
        &self.redaction
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Replace the value of every listed field with the redaction token
    pub fn redact(&self, message: &str) -> String {
        let Some(heads) = &self.heads else {
            return message.to_string();
        };

        // An empty separator leaves the whole line as one segment.
        if self.separator.is_empty() {
            return self.redact_segment(&heads.leading, message).into_owned();
        }

        message
            .split(self.separator.as_str())
            .enumerate()
            .map(|(index, segment)| {
                let head = if index == 0 { &heads.leading } else { &heads.following };
                self.redact_segment(head, segment)
            })
            .collect::<Vec<_>>()
            .join(&self.separator)
    }

    fn redact_segment<'a>(&self, head: &Regex, segment: &'a str) -> Cow<'a, str> {
        match head.find(segment) {
            Some(key) => Cow::Owned(format!("{}{}", &segment[..key.end()], self.redaction)),
            None => Cow::Borrowed(segment),
        }
    }
}

/// Obfuscate the values of `fields` in a `separator`-delimited log message.
///
/// If the field pattern can't be compiled the whole message is replaced by
/// `redaction`, so sensitive values never leak through a failed filter.
pub fn filter_datum<S: AsRef<str>>(
    fields: &[S],
    redaction: &str,
    message: &str,
    separator: &str,
) -> String {
    match FieldRedactor::new(fields, redaction, separator) {
        Ok(redactor) => redactor.redact(message),
        Err(e) => {
            error!(error = %e, "Field pattern failed to compile, masking entire message");
            redaction.to_string()
        }
    }
}
