use std::io;

use serde::ser::Error as _;
use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};

use crate::fields::ExtractionResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResult {
    pub error: String,
}

impl ErrorResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// What a single invocation prints: the record or the error, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Extracted(ExtractionResult),
    Failed(ErrorResult),
}

impl Outcome {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Failed(ErrorResult::new(message))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// One line of JSON with `", "` and `": "` separators; non-ASCII text is
    /// written as-is.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut buffer = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut buffer, SpacedFormatter);
        self.serialize(&mut serializer)?;
        String::from_utf8(buffer).map_err(serde_json::Error::custom)
    }
}

impl From<ExtractionResult> for Outcome {
    fn from(result: ExtractionResult) -> Self {
        Self::Extracted(result)
    }
}

struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
