//! Peqy trigger CLI entrypoint.

use std::io::{self, Stdout};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use peqy_trigger::{
    OutputFile, OutputSink, ReqwestTransport, RunContext, TokioSleeper, TriggerConfig,
    TriggerError, TriggerOutputs, WorkflowCommands, WriterOutputs, run_trigger,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let mut commands = WorkflowCommands::new(io::stdout());

    let config = match load_config() {
        Ok(config) => config,
        Err(error) => return fail_before_run(&error, &mut commands),
    };
    let transport = match ReqwestTransport::new() {
        Ok(transport) => transport,
        Err(error) => return fail_before_run(&error, &mut commands),
    };

    let mut outputs = output_sink(config.resolve_output_path());
    let report = run_trigger(
        &config,
        RunContext {
            transport: &transport,
            sleeper: &TokioSleeper,
            outputs: &mut outputs,
            commands: &mut commands,
        },
    )
    .await;

    if report.verdict.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Installs the stderr log subscriber, filtered by `PEQY_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("PEQY_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`TriggerError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<TriggerConfig, TriggerError> {
    TriggerConfig::load().map_err(|error| TriggerError::Configuration {
        message: error.to_string(),
    })
}

/// Step outputs go to the runner's output file, or stdout outside a runner.
fn output_sink(path: Option<camino::Utf8PathBuf>) -> Box<dyn OutputSink> {
    match path {
        Some(path) => Box::new(OutputFile::new(path)),
        None => Box::new(WriterOutputs::new(io::stdout())),
    }
}

/// Records `success=false` and reports an error raised before the run.
fn fail_before_run(error: &TriggerError, commands: &mut WorkflowCommands<Stdout>) -> ExitCode {
    let mut outputs = output_sink(TriggerConfig::default().resolve_output_path());
    if let Err(record_error) = outputs.record(&TriggerOutputs::failed()) {
        tracing::error!(error = %record_error, "failed to record outputs");
    }
    if commands.error(&error.to_string()).is_err() {
        tracing::error!(%error, "trigger failed");
    }
    ExitCode::FAILURE
}
