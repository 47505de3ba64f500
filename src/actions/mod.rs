//! GitHub Actions plumbing around the trigger core.
//!
//! Reads the event payload the runner writes to disk, records step outputs
//! and issues workflow commands (secret masking, annotations, log groups).

pub mod commands;
pub mod event;
mod fs;
pub mod outputs;

pub use commands::WorkflowCommands;
pub use event::read_event_file;
pub use outputs::{OutputFile, OutputSink, WriterOutputs};
