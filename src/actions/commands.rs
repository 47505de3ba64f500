//! Workflow commands understood by the GitHub Actions runner.

use std::io::Write;

use crate::trigger::TriggerError;

/// Writes `::command::data` lines to the runner log.
#[derive(Debug)]
pub struct WorkflowCommands<W> {
    writer: W,
}

impl<W: Write> WorkflowCommands<W> {
    /// Wraps the writer the runner reads, normally stdout.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Registers a secret so the runner redacts it from all later logs.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::Io`] when the command cannot be written.
    pub fn add_mask(&mut self, secret: &str) -> Result<(), TriggerError> {
        self.issue("add-mask", secret)
    }

    /// Emits a warning annotation.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::Io`] when the command cannot be written.
    pub fn warning(&mut self, message: &str) -> Result<(), TriggerError> {
        self.issue("warning", message)
    }

    /// Emits an error annotation.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::Io`] when the command cannot be written.
    pub fn error(&mut self, message: &str) -> Result<(), TriggerError> {
        self.issue("error", message)
    }

    /// Opens a collapsible log group.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::Io`] when the command cannot be written.
    pub fn group(&mut self, title: &str) -> Result<(), TriggerError> {
        self.issue("group", title)
    }

    /// Closes the current log group.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::Io`] when the command cannot be written.
    pub fn end_group(&mut self) -> Result<(), TriggerError> {
        self.issue("endgroup", "")
    }

    /// Returns the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn issue(&mut self, command: &str, data: &str) -> Result<(), TriggerError> {
        writeln!(self.writer, "::{command}::{}", escape_data(data)).map_err(|error| {
            TriggerError::Io {
                message: format!("failed to write workflow command '{command}': {error}"),
            }
        })
    }
}

fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
