//! Log formatting with PII field redaction
//!
//! Log lines made of `key=value` pairs are scanned for sensitive keys and
//! their values are swapped for a fixed token before the line reaches its
//! sink. The redaction is textual and anchored on the key: `password=abc;`
//! becomes `password=********;` while `username=abc;` is left alone.
//!
//! # Pieces
//!
//! - [`filter_datum`] / [`FieldRedactor`]: the substitution itself
//! - [`RedactingFormatter`]: renders a [`LogRecord`] through a template and
//!   redacts the result; also usable as a `tracing_subscriber` event format
//! - [`UserDataLogger`]: a dedicated, non-propagating `user_data` logger with
//!   one redacting sink
//!
//! # Example
//!
//! ```rust
//! use filtered_logger::{filter_datum, get_logger, PII_FIELDS};
//!
//! let line = filter_datum(
//!     &["password", "ssn"],
//!     "***",
//!     "name=Bob;password=abc123;ssn=000-11-2222;",
//!     ";",
//! );
//! assert_eq!(line, "name=Bob;password=***;ssn=***;");
//!
//! let logger = get_logger()?;
//! logger.log_row(PII_FIELDS, ["Bob", "bob@dylan.com", "555-0100", "000-11-2222", "hunter2"]);
//! // stderr: [USER_DATA] user_data INFO 2024-05-02 09:13:51,042: name=********;email=********;...
//! # Ok::<(), filtered_logger::FilterError>(())
//! ```

pub mod config;
pub mod error;
pub mod formatter;
pub mod logger;
pub mod macros;
pub mod record;
pub mod redactor;
pub mod template;

pub use config::*;
pub use error::*;
pub use formatter::*;
pub use logger::*;
pub use record::*;
pub use redactor::*;
pub use template::*;

/// Fields treated as personally identifiable by default
pub const PII_FIELDS: [&str; 5] = ["name", "email", "phone", "ssn", "password"];

/// Name (tracing target) of the redacting logger
pub const USER_DATA_LOGGER: &str = "user_data";
