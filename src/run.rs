//! One end-to-end trigger run as performed by the CLI.

use std::io::Write;

use crate::actions::{OutputSink, WorkflowCommands, read_event_file};
use crate::config::TriggerConfig;
use crate::trigger::{
    RequestExecutor, RequestResult, ReviewPayload, Sleeper, Transport, TriggerError,
    TriggerReport, Verdict,
};

/// Collaborators a run talks to.
pub struct RunContext<'deps, T, S, O, W>
where
    T: Transport,
    S: Sleeper,
    O: OutputSink,
    W: Write,
{
    /// HTTP transport.
    pub transport: &'deps T,
    /// Backoff sleeper.
    pub sleeper: &'deps S,
    /// Destination for step outputs.
    pub outputs: &'deps mut O,
    /// Runner log for masks, annotations and groups.
    pub commands: &'deps mut WorkflowCommands<W>,
}

/// Validates inputs, triggers the review and records the outcome.
///
/// Outputs are always recorded, including `success=false` when validation
/// fails before any request is sent. The returned report's verdict decides
/// the exit status.
pub async fn run_trigger<T, S, O, W>(
    config: &TriggerConfig,
    context: RunContext<'_, T, S, O, W>,
) -> TriggerReport
where
    T: Transport,
    S: Sleeper,
    O: OutputSink,
    W: Write,
{
    let RunContext {
        transport,
        sleeper,
        outputs,
        commands,
    } = context;

    mask_api_key(config, commands);
    let outcome = trigger(config, transport, sleeper, commands).await;
    let mut report = TriggerReport::from_outcome(outcome, config.fail_policy());

    if let Err(error) = outputs.record(&report.outputs) {
        tracing::error!(%error, "failed to record outputs");
        if !report.verdict.is_failure() {
            report.verdict = Verdict::Failed(error);
        }
    }

    annotate(&report.verdict, commands);
    report
}

fn mask_api_key<W: Write>(config: &TriggerConfig, commands: &mut WorkflowCommands<W>) {
    let Some(key) = config.api_key.as_deref().map(str::trim) else {
        return;
    };
    if key.is_empty() {
        return;
    }
    if let Err(error) = commands.add_mask(key) {
        tracing::error!(%error, "failed to register API key mask");
    }
}

async fn trigger<T, S, W>(
    config: &TriggerConfig,
    transport: &T,
    sleeper: &S,
    commands: &mut WorkflowCommands<W>,
) -> Result<RequestResult, TriggerError>
where
    T: Transport,
    S: Sleeper,
    W: Write,
{
    let request_config = config.request_config()?;
    let event_name = config.resolve_event_name();
    let event = read_event_file(&config.require_event_path()?)?;
    let payload = ReviewPayload::from_event(&event_name, &event)?;

    let title = format!(
        "Triggering Peqy review for {}/{}#{}",
        payload.owner().as_str(),
        payload.repo().as_str(),
        payload.pr().get()
    );
    let grouped = commands.group(&title).is_ok();
    tracing::info!(
        event = event_name.as_str(),
        sha = payload.sha().as_str(),
        url = request_config.url().as_str(),
        "{title}"
    );

    let outcome = RequestExecutor::new(transport, sleeper)
        .execute(&request_config, &payload)
        .await;

    if grouped && let Err(error) = commands.end_group() {
        tracing::debug!(%error, "failed to close log group");
    }
    outcome
}

fn annotate<W: Write>(verdict: &Verdict, commands: &mut WorkflowCommands<W>) {
    let written = match verdict {
        Verdict::Passed => {
            tracing::info!("review triggered successfully");
            Ok(())
        }
        Verdict::Warned(message) => commands.warning(message),
        Verdict::Failed(error) => commands.error(&error.to_string()),
    };
    if let Err(error) = written {
        tracing::debug!(%error, "failed to write annotation");
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::always;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use tempfile::TempDir;

    use super::{RunContext, run_trigger};
    use crate::actions::{WorkflowCommands, WriterOutputs};
    use crate::config::TriggerConfig;
    use crate::trigger::backoff::MockSleeper;
    use crate::trigger::transport::{MockTransport, TransportResponse};
    use crate::trigger::{TriggerError, Verdict};

    const KEY: &str = "sk-0123456789abcdef0123456789abcdef";
    const SHA: &str = "abc123def4567890abc123def4567890abc123de";

    struct Harness {
        dir: TempDir,
        config: TriggerConfig,
    }

    #[fixture]
    fn harness() -> Harness {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("event.json");
        let event = json!({
            "pull_request": {"number": 9, "head": {"sha": SHA}},
            "repository": {"name": "widgets", "owner": {"login": "acme"}}
        });
        std::fs::write(&path, event.to_string()).expect("event written");

        Harness {
            config: TriggerConfig {
                api_key: Some(KEY.to_owned()),
                event_name: Some("pull_request".to_owned()),
                event_path: Some(path.to_string_lossy().into_owned()),
                ..Default::default()
            },
            dir,
        }
    }

    async fn run(
        config: &TriggerConfig,
        transport: &MockTransport,
    ) -> (crate::trigger::TriggerReport, String, String) {
        let mut sleeper = MockSleeper::new();
        sleeper.expect_sleep().return_const(());
        let mut outputs = WriterOutputs::new(Vec::new());
        let mut commands = WorkflowCommands::new(Vec::new());

        let report = run_trigger(
            config,
            RunContext {
                transport,
                sleeper: &sleeper,
                outputs: &mut outputs,
                commands: &mut commands,
            },
        )
        .await;

        (
            report,
            String::from_utf8(outputs.into_inner()).expect("outputs are UTF-8"),
            String::from_utf8(commands.into_inner()).expect("commands are UTF-8"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn successful_run_records_outputs_and_masks_key(harness: Harness) {
        let mut transport = MockTransport::new();
        transport
            .expect_post()
            .with(always())
            .times(1)
            .returning(|_| Ok(TransportResponse::new(200, "queued")));

        let (report, outputs, commands) = run(&harness.config, &transport).await;

        assert_eq!(report.verdict, Verdict::Passed);
        assert_eq!(outputs, "status-code=200\nresponse=queued\nsuccess=true\n");
        assert!(commands.starts_with(&format!("::add-mask::{KEY}\n")));
        assert!(commands.contains("::group::Triggering Peqy review for acme/widgets#9\n"));
        assert!(commands.contains("::endgroup::\n"));
    }

    #[rstest]
    #[tokio::test]
    async fn tolerated_rejection_emits_warning(mut harness: Harness) {
        harness.config.fail_on_error = Some(false);
        let mut transport = MockTransport::new();
        transport
            .expect_post()
            .times(1)
            .returning(|_| Ok(TransportResponse::new(404, "no such repo")));

        let (report, outputs, commands) = run(&harness.config, &transport).await;

        assert!(!report.verdict.is_failure());
        assert!(outputs.ends_with("success=false\n"));
        assert!(commands.contains("::warning::API request failed with status 404 (Not Found)\n"));
    }

    #[rstest]
    #[tokio::test]
    async fn missing_pull_request_context_fails_without_request(mut harness: Harness) {
        let path = harness.dir.path().join("push.json");
        std::fs::write(&path, r#"{"ref": "refs/heads/main"}"#).expect("event written");
        harness.config.event_path = Some(path.to_string_lossy().into_owned());
        harness.config.event_name = Some("push".to_owned());
        let mut transport = MockTransport::new();
        transport.expect_post().never();

        let (report, outputs, commands) = run(&harness.config, &transport).await;

        assert_eq!(
            report.verdict,
            Verdict::Failed(TriggerError::MissingPullRequestContext {
                event_name: "push".to_owned()
            })
        );
        assert_eq!(outputs, "status-code=\nresponse=\nsuccess=false\n");
        assert!(commands.contains("::error::event 'push' does not include pull request context"));
    }

    #[rstest]
    #[tokio::test]
    async fn error_messages_never_contain_the_key(mut harness: Harness) {
        harness.config.timeout_ms = 10;
        let transport = MockTransport::new();

        let (report, _, commands) = run(&harness.config, &transport).await;

        assert!(report.verdict.is_failure());
        let after_mask = commands
            .split_once('\n')
            .map(|(_, rest)| rest)
            .unwrap_or_default();
        assert!(!after_mask.contains(KEY), "key leaked: {after_mask}");
    }
}
