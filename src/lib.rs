//! Peqy trigger library crate for starting pull request reviews from CI.
//!
//! The library reads the pull request that triggered a workflow, validates
//! it, and posts it to the Peqy review trigger API with bounded retries and
//! exponential backoff. Outcomes are turned into step outputs and workflow
//! annotations for the GitHub Actions runner.

pub mod actions;
pub mod config;
pub mod run;
pub mod trigger;

pub use actions::{OutputFile, OutputSink, WorkflowCommands, WriterOutputs, read_event_file};
pub use config::TriggerConfig;
pub use run::{RunContext, run_trigger};
pub use trigger::{
    ApiKey, FailPolicy, ReqwestTransport, RequestConfig, RequestExecutor, RequestResult,
    ReviewPayload, TokioSleeper, TriggerError, TriggerOutputs, TriggerReport, Verdict,
};
