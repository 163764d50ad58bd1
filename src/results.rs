use crate::error::ScrapeError;
use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use serde_json::{Value, json};
use std::io::{self, Write};

/// Final result of one scrape: the photo list, or the reason there is none
#[derive(Debug)]
pub enum Outcome {
    /// Photo URLs in extraction order (possibly empty)
    Photos(Vec<String>),
    /// The pipeline stopped at this error
    Failed(ScrapeError),
}

/// The error object written in place of a photo list
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl Outcome {
    /// Whether the scrape ended in an error
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// The JSON value reported for this outcome
    pub fn to_json(&self) -> Value {
        match self {
            Outcome::Photos(urls) => json!(urls),
            Outcome::Failed(err) => json!(ErrorBody {
                error: err.to_string(),
                details: err.details(),
            }),
        }
    }

    /// Writes the outcome as one line of JSON.
    ///
    /// Separators are `", "` and `": "` (spaced, but still a single line) and
    /// the output is pure ASCII: other characters become `\uXXXX` escapes.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        let mut ser = Serializer::with_formatter(&mut out, SpacedFormatter);
        self.to_json().serialize(&mut ser)?;
        writeln!(out)
    }

    /// The serialized line, without the trailing newline
    pub fn to_line(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).trim_end().to_string()
    }
}

impl From<Result<Vec<String>, ScrapeError>> for Outcome {
    fn from(result: Result<Vec<String>, ScrapeError>) -> Self {
        match result {
            Ok(urls) => Outcome::Photos(urls),
            Err(err) => Outcome::Failed(err),
        }
    }
}

/// Single-line JSON with a space after each `,` and `:`, escaping every
/// non-ASCII character as one or two (surrogate pair) `\uXXXX` sequences
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;

            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
