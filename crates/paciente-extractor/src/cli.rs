//! Argument and file checks that run before any extraction is attempted.
//!
//! These failures exit with status 1. Failures inside extraction are reported
//! as an error record with status 0, see [`Pipeline::run`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::output::Outcome;
use crate::pipeline::Pipeline;
use crate::processor::DocumentProcessor;

pub const USAGE: &str = "Usage: pdf_extractor <pdf_path>";
pub const FILE_NOT_FOUND: &str = "File not found";

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub outcome: Outcome,
    pub exit_code: u8,
}

impl Invocation {
    fn completed(outcome: Outcome) -> Self {
        Self {
            outcome,
            exit_code: EXIT_OK,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::error(message),
            exit_code: EXIT_FAILURE,
        }
    }
}

/// Checks the argument count and that the path exists. `args` excludes the
/// program name.
pub fn parse_args<I>(args: I) -> Result<PathBuf, Invocation>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() != 1 {
        tracing::debug!(count = args.len(), "Wrong number of arguments");
        return Err(Invocation::rejected(USAGE));
    }

    let path = PathBuf::from(args.remove(0));
    if !path.exists() {
        return Err(Invocation::rejected(FILE_NOT_FOUND));
    }

    Ok(path)
}

pub fn execute<P: DocumentProcessor>(path: &Path, pipeline: &Pipeline<P>) -> Invocation {
    Invocation::completed(pipeline.run(path))
}

pub fn run<I, P>(args: I, pipeline: &Pipeline<P>) -> Invocation
where
    I: IntoIterator,
    I::Item: Into<OsString>,
    P: DocumentProcessor,
{
    match parse_args(args) {
        Ok(path) => execute(&path, pipeline),
        Err(rejected) => rejected,
    }
}
