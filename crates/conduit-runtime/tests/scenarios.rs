//! End-to-end scenarios driving the real subprocess lifecycle against the
//! `fake-agent` fixture: one per provider dialect boundary case, plus the
//! backpressure and cancellation paths.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use conduit_runtime::TextAccumulator;
use conduit_testing::{fake_launch_config, Script};
use conduit_types::{cancel_pair, CancelToken, EventKind, RawEvent, Recorder};
use tokio::sync::mpsc;

#[derive(Default)]
struct Recorded {
    meta: Vec<(String, String)>,
    stream: Vec<Vec<u8>>,
}

#[derive(Clone, Default)]
struct TestRecorder(Arc<Mutex<Recorded>>);

impl TestRecorder {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(Recorded::default())))
    }

    fn meta(&self, key: &str) -> Option<String> {
        self.0
            .lock()
            .unwrap()
            .meta
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn stream_line_count(&self) -> usize {
        self.0.lock().unwrap().stream.len()
    }
}

impl Recorder for TestRecorder {
    fn record_meta(&self, key: &str, value: &str) {
        self.0.lock().unwrap().meta.push((key.to_string(), value.to_string()));
    }
    fn record_stdin(&self, _prompt: &str) {}
    fn record_stdout(&self, _chunk: &[u8]) {}
    fn record_stderr(&self, _chunk: &[u8]) {}
    fn record_stream(&self, line: &[u8]) {
        self.0.lock().unwrap().stream.push(line.to_vec());
    }
}

fn fresh_cancel() -> CancelToken {
    let (handle, token) = cancel_pair();
    // Leak the handle for the duration of the test; nothing in these
    // scenarios needs to trigger cancellation explicitly unless noted.
    std::mem::forget(handle);
    token
}

#[tokio::test]
async fn claude_single_turn_accumulates_text_and_captures_session_id() {
    let script = Script::new()
        .stdout(r#"{"type":"system","subtype":"init","session_id":"abc"}"#)
        .stdout(r#"{"type":"assistant","message":{"content":[{"type":"text","text":"Hi there."}]}}"#)
        .stdout(r#"{"type":"result","subtype":"success","is_error":false,"result":"Hi there."}"#)
        .exit(0);

    let recorder = TestRecorder::new();
    let config = fake_launch_config("claude", &script, Arc::new(recorder.clone()));

    let result = conduit_runtime::run(config, fresh_cancel()).await.expect("claude run succeeds");

    assert_eq!(result.exit_code, Some(0));
    assert_eq!(result.agent_session_id.as_deref(), Some("abc"));
    assert!(result.captured_stdout_text.contains("Hi there."));

    assert_eq!(recorder.stream_line_count(), 3);
    assert_eq!(recorder.meta("agent").as_deref(), Some("claude"));
    let command = recorder.meta("command").expect("command meta recorded");
    assert!(command.contains("--output-format stream-json --verbose"));
}

#[tokio::test]
async fn codex_tool_boundary_yields_the_canonical_sequence() {
    let script = Script::new()
        .stdout(r#"{"type":"thread.started","thread_id":"codex-1"}"#)
        .stdout(r#"{"type":"item.started","item":{"type":"command_execution","id":"cmd-1","command":"ls"}}"#)
        .stdout(
            r#"{"type":"item.completed","item":{"type":"command_execution","id":"cmd-1","aggregated_output":"file.txt","exit_code":0,"status":"completed"}}"#,
        )
        .stdout(r#"{"type":"item.completed","item":{"type":"agent_message","id":"msg-1","text":"Done."}}"#)
        .stdout(r#"{"type":"turn.completed","usage":{"input_tokens":10,"output_tokens":5,"cached_input_tokens":0}}"#)
        .exit(0);

    let recorder = Arc::new(TestRecorder::new());
    let mut config = fake_launch_config("codex", &script, recorder);
    let (sink_tx, mut sink_rx) = mpsc::channel(16);
    config.event_sink = Some(sink_tx);
    config.turn_id = Some("turn-1".to_string());

    let result = conduit_runtime::run(config, fresh_cancel()).await.expect("codex run succeeds");
    assert_eq!(result.agent_session_id.as_deref(), Some("codex-1"));

    let mut events: Vec<RawEvent> = Vec::new();
    while let Some(event) = sink_rx.recv().await {
        events.push(event);
    }

    let kinds: Vec<EventKind> = events.iter().map(|e| e.parsed.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::System,
            EventKind::Assistant,
            EventKind::User,
            EventKind::Assistant,
            EventKind::Result,
        ]
    );
    assert!(events[0].parsed.is_init());
    assert!(events[1].parsed.message.as_ref().unwrap().has_tool_use());
    assert!(events[2].parsed.message.as_ref().unwrap().has_tool_result());
    assert!(events.iter().all(|e| e.turn_id.as_deref() == Some("turn-1")));

    let mut acc = TextAccumulator::new();
    for event in &events {
        acc.feed(&event.parsed);
    }
    assert_eq!(acc.into_text(), "Done.");
}

#[tokio::test]
async fn opencode_tool_use_expands_into_two_events_sharing_raw_bytes_on_the_first() {
    let script = Script::new()
        .stdout(r#"{"type":"step_start","sessionID":"oc-1"}"#)
        .stdout(r#"{"type":"tool_use","id":"tool-1","name":"grep","input":{"pattern":"foo"},"state":{"status":"completed","output":"match found"}}"#)
        .exit(0);

    let recorder = Arc::new(TestRecorder::new());
    let mut config = fake_launch_config("opencode", &script, recorder);
    let (sink_tx, mut sink_rx) = mpsc::channel(16);
    config.event_sink = Some(sink_tx);

    let _ = conduit_runtime::run(config, fresh_cancel()).await.expect("opencode run succeeds");

    let mut events: Vec<RawEvent> = Vec::new();
    while let Some(event) = sink_rx.recv().await {
        events.push(event);
    }

    // One init event, then the two-event tool_use expansion.
    assert_eq!(events.len(), 3);
    assert_eq!(events[1].parsed.kind, EventKind::Assistant);
    assert_eq!(events[2].parsed.kind, EventKind::User);

    let tool_use_id = match &events[1].parsed.message.as_ref().unwrap().content[0] {
        conduit_types::ContentBlock::ToolUse { id, .. } => id.clone(),
        other => panic!("expected tool_use, got {other:?}"),
    };
    let tool_result_id = match &events[2].parsed.message.as_ref().unwrap().content[0] {
        conduit_types::ContentBlock::ToolResult { tool_use_id, .. } => tool_use_id.clone(),
        other => panic!("expected tool_result, got {other:?}"),
    };
    assert_eq!(tool_use_id, tool_result_id);

    // The raw line is attached to the first of the pair only.
    assert!(events[1].raw_bytes.is_some());
    assert!(events[2].raw_bytes.is_none());
}

#[tokio::test]
async fn backpressure_drops_excess_events_without_blocking_the_loop() {
    use conduit_runtime::stream_loop::{self, StreamLoopInput};
    use conduit_types::{CanonicalEvent, NullRecorder};

    // Large enough that every send below succeeds immediately; nothing
    // drains this end until `stream_loop::run` starts below, so a capacity
    // smaller than the send count would deadlock the test itself.
    let (tx, rx) = mpsc::channel::<RawEvent>(5000);
    let (sink_tx, sink_rx) = mpsc::channel::<RawEvent>(1);
    // Fill the sink so every forwarded event is dropped on `try_send`.
    sink_tx
        .try_send(RawEvent::parsed(None, CanonicalEvent::default(), None))
        .unwrap();

    for _ in 0..5000 {
        let event = RawEvent::parsed(
            Some(b"{}".to_vec()),
            CanonicalEvent { kind: EventKind::Assistant, ..Default::default() },
            None,
        );
        tx.send(event).await.unwrap();
    }
    drop(tx);

    let recorder: Arc<dyn Recorder> = Arc::new(NullRecorder);
    let input = StreamLoopInput {
        recorder,
        event_sink: Some(sink_tx),
        turn_id: None,
        cancel: fresh_cancel(),
    };

    let outcome = tokio::time::timeout(Duration::from_secs(2), stream_loop::run(rx, input))
        .await
        .expect("stream loop drains within the bounded window");

    assert!(outcome.events_dropped > 0);
    // The sink never drained, so only the pre-filled occupant is left.
    let mut remaining = sink_rx;
    assert!(remaining.try_recv().is_ok());
    assert!(remaining.try_recv().is_err());
}

#[tokio::test]
async fn cancellation_preserves_the_session_id_captured_before_the_cut() {
    let script = Script::new()
        .stdout(r#"{"type":"thread.started","thread_id":"cancel-thread"}"#)
        .sleep_forever();

    let recorder = Arc::new(TestRecorder::new());
    let config = fake_launch_config("codex", &script, recorder);

    let (handle, token) = cancel_pair();
    let run_fut = conduit_runtime::run(config, token);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.cancel();
    });

    let result = tokio::time::timeout(Duration::from_secs(5), run_fut)
        .await
        .expect("cancellation reaps the fixture within the bounded window");

    match result {
        Err(err) => {
            let partial = err.partial_result().expect("cancelled run carries a partial result");
            assert_eq!(partial.agent_session_id.as_deref(), Some("cancel-thread"));
        }
        Ok(_) => panic!("expected the run to report cancellation"),
    }
}

#[tokio::test]
async fn vibe_argv_prompt_is_observable_in_the_recorded_command_line() {
    const SENTINEL: &str = "PROMPT_SENTINEL_789";

    let script = Script::new().stdout(r#"{"type":"text","text":"ok"}"#).exit(0);

    let recorder = Arc::new(TestRecorder::new());
    let mut config = fake_launch_config("vibe", &script, Arc::clone(&recorder));
    config.prompt = Some(SENTINEL.to_string());

    let _ = conduit_runtime::run(config, fresh_cancel()).await.expect("vibe run succeeds");

    let command = recorder.meta("command").expect("command meta recorded");
    assert!(
        command.contains(SENTINEL),
        "vibe delivers its prompt via argv, so the sentinel must show up in the recorded command line: {command}"
    );
}
