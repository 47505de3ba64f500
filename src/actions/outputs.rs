//! Recording named step outputs.
//!
//! On GitHub Actions outputs are appended to the file named by
//! `GITHUB_OUTPUT`. Single-line values use `name=value`; values containing a
//! line break use the heredoc form:
//!
//! ```text
//! response<<ghadelimiter_0
//! first line
//! second line
//! ghadelimiter_0
//! ```

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs::OpenOptions;

use crate::trigger::{TriggerError, TriggerOutputs};

use super::fs::open_parent;

/// Destination for named outputs.
pub trait OutputSink {
    /// Records one output value.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::Io`] when the value cannot be written.
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), TriggerError>;

    /// Records every output of a trigger report.
    ///
    /// # Errors
    ///
    /// Returns the first failure from [`OutputSink::set_output`].
    fn record(&mut self, outputs: &TriggerOutputs) -> Result<(), TriggerError> {
        outputs
            .entries()
            .into_iter()
            .try_for_each(|(name, value)| self.set_output(name, value))
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), TriggerError> {
        (**self).set_output(name, value)
    }
}

/// Appends outputs to the platform output file.
#[derive(Debug, Clone)]
pub struct OutputFile {
    path: Utf8PathBuf,
}

impl OutputFile {
    /// Targets the file at `path`; it is created on first write.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The output file location.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl OutputSink for OutputFile {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), TriggerError> {
        let (dir, file_name) = open_parent(&self.path, "output")?;
        let mut options = OpenOptions::new();
        options.append(true).create(true);
        let mut file = dir
            .open_with(file_name, &options)
            .map_err(|error| io_error(&self.path, &error))?;

        file.write_all(format_entry(name, value).as_bytes())
            .map_err(|error| io_error(&self.path, &error))
    }
}

/// Prints outputs as `name=value` lines when no output file exists.
#[derive(Debug)]
pub struct WriterOutputs<W> {
    writer: W,
}

impl<W: Write> WriterOutputs<W> {
    /// Wraps a writer.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WriterOutputs<W> {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), TriggerError> {
        self.writer
            .write_all(format_entry(name, value).as_bytes())
            .map_err(|error| TriggerError::Io {
                message: format!("failed to write output '{name}': {error}"),
            })
    }
}

fn io_error(path: &Utf8Path, error: &io::Error) -> TriggerError {
    TriggerError::Io {
        message: format!("failed to write output file '{path}': {error}"),
    }
}

/// Formats one output entry, choosing a delimiter absent from the value.
pub(crate) fn format_entry(name: &str, value: &str) -> String {
    if !value.contains(['\n', '\r']) {
        return format!("{name}={value}\n");
    }

    let delimiter = (0_u32..)
        .map(|index| format!("ghadelimiter_{index}"))
        .find(|candidate| !value.contains(candidate.as_str()) && !name.contains(candidate.as_str()))
        .unwrap_or_else(|| "ghadelimiter".to_owned());

    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}
