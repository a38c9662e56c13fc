//! Subprocess lifecycle: argv assembly, process-group spawn, stdin/stdout/
//! stderr wiring, the stream loop, and graceful-then-forced cancellation.
//! This module owns the child's stdio exclusively for the duration of one
//! run; nothing else touches it.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Instant;

use conduit_providers::{get_provider, ArgvInput};
use conduit_types::{
    offer_cancellable, CancelToken, DropCounter, Error, LaunchConfig, RawEvent, Recorder, Result,
    RunResult,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStderr, Command};
use tokio::sync::mpsc;

use crate::diag;
use crate::killgroup;
use crate::stream_loop::{self, StreamLoopInput};

const STDERR_CHUNK_BYTES: usize = 8 * 1024;

/// The command line as it was actually spawned — program plus the argv the
/// launch-spec builder assembled (user args plus injected provider flags),
/// not the caller's pre-assembly `config.argv`. This is what the `meta`
/// `command` entry must show so a recording reflects reality.
fn command_line(command: &str, argv: &[String]) -> String {
    std::iter::once(command.to_string())
        .chain(argv.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs one agent to completion, following a nine-step sequence and the
/// `IDLE → ARGV_BUILT → SPAWNED → STREAMING → CHILD_EXITED → REPORTED`
/// state machine (the `Cancelling` substate is handled inside
/// `wait_with_cancellation`).
pub async fn run(config: LaunchConfig, cancel: CancelToken) -> Result<RunResult> {
    let start = Instant::now();
    let recorder = Arc::clone(&config.recorder);

    // 1. Argv assembly, per provider.
    let provider =
        get_provider(&config.agent_name).map_err(|err| Error::SpawnFailure(err.to_string()))?;
    let argv_input = ArgvInput {
        user_args: config.argv.clone(),
        prompt_present: config.prompt.is_some(),
        prompt_text: config.prompt.clone(),
        event_sink_present: config.event_sink.is_some(),
        resume_session_id: config.resume_session_id.clone(),
        model: config.model.clone(),
        reasoning_level: config.reasoning_level.clone(),
        caller_set_rust_log: std::env::var_os("RUST_LOG").is_some()
            || config.env_overlay.contains_key("RUST_LOG"),
    };
    let plan = provider.launch_spec.build(&argv_input);

    // 2/3. Process group + environment overlay (provider defaults first,
    // caller overlay last so duplicate keys resolve last-wins).
    let mut cmd = Command::new(&config.command);
    cmd.args(&plan.argv);
    cmd.current_dir(&config.workdir);
    for (key, value) in &plan.env_overlay {
        cmd.env(key, value);
    }
    for (key, value) in &config.env_overlay {
        cmd.env(key, value);
    }
    cmd.stdin(Stdio::piped());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    killgroup::place_in_new_process_group(&mut cmd);

    let mut child = cmd.spawn().map_err(|err| Error::SpawnFailure(err.to_string()))?;
    let pid = child.id().map(|id| id as i32);

    recorder.record_meta("agent", &config.agent_name);
    recorder.record_meta("command", &command_line(&config.command, &plan.argv));
    recorder.record_meta("workdir", &config.workdir.display().to_string());

    // 4. Stdin: write the prompt if one is present and this provider takes
    // it over stdin (vibe is the one argv exception), then close it.
    if let Some(mut stdin) = child.stdin.take() {
        if plan.prompt_via_stdin {
            if let Some(prompt) = &config.prompt {
                if !prompt.is_empty() {
                    recorder.record_stdin(prompt);
                    if let Err(err) = stdin.write_all(prompt.as_bytes()).await {
                        let _ = child.start_kill();
                        return Err(Error::Io(err));
                    }
                }
            }
        }
        // `stdin` drops here, closing the pipe so the child sees EOF.
    }

    // 5. Stdout piped into the parser; stderr through the multiplexed sink.
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| Error::Fatal("child stdout was not piped".to_string()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| Error::Fatal("child stderr was not piped".to_string()))?;

    let (tx, rx) = mpsc::channel(config.parser_channel_capacity);
    let parser_join = conduit_providers::spawn_parser(
        Arc::clone(&provider.parser),
        BufReader::new(stdout),
        tx,
        cancel.clone(),
    );

    let stderr_join = tokio::spawn(multiplex_stderr(
        stderr,
        Arc::clone(&recorder),
        config.event_sink.clone(),
        config.turn_id.clone(),
        config.stderr_override.clone(),
        config.agent_name.clone(),
        cancel.clone(),
    ));

    // 7/8. Run the stream loop and wait for the child concurrently: the
    // parser task above already observes cancellation and closes its
    // channel, which drains the stream loop; `wait_with_cancellation`
    // independently escalates signals against the process group.
    let stream_input = StreamLoopInput {
        recorder: Arc::clone(&recorder),
        event_sink: config.event_sink.clone(),
        turn_id: config.turn_id.clone(),
        cancel: cancel.clone(),
    };
    let (stream_outcome, wait_result) = tokio::join!(
        stream_loop::run(rx, stream_input),
        wait_with_cancellation(&mut child, pid, cancel.clone(), &config.agent_name),
    );

    let _ = parser_join.await;
    let captured_stderr_text = stderr_join.await.unwrap_or_default();

    let exit_code = match wait_result {
        Ok(code) => code,
        Err(err) => return Err(Error::Fatal(format!("failed waiting for child: {err}"))),
    };

    let result = RunResult {
        exit_code,
        duration_ms: start.elapsed().as_millis() as u64,
        captured_stdout_text: stream_outcome.captured_stdout_text,
        captured_stderr_text,
        agent_session_id: stream_outcome.session_id,
    };

    // 9. Cancellation protocol observed: surface it distinctly, carrying the
    // partial result so the caller can still resume.
    if cancel.is_cancelled() {
        Err(Error::Cancelled(Some(Box::new(result))))
    } else {
        Ok(result)
    }
}

/// Waits for the child, racing against cancellation. On cancellation, sends
/// the graceful signal to the whole process group, polls briefly, escalates
/// to a forced kill if still alive, then reaps with a bounded backstop so
/// the parent never hangs on a descendant that somehow still holds the pipe
/// open.
async fn wait_with_cancellation(
    child: &mut Child,
    pid: Option<i32>,
    mut cancel: CancelToken,
    agent_name: &str,
) -> std::io::Result<Option<i32>> {
    tokio::select! {
        status = child.wait() => status.map(|s| s.code()),
        _ = cancel.cancelled() => {
            if let Some(pid) = pid {
                diag::cancellation_escalated(agent_name, "graceful");
                killgroup::send_graceful_signal(pid);

                let exited = killgroup::poll_until_exited_or_timeout(
                    || child.try_wait().map(|status| status.is_some()),
                    killgroup::GRACEFUL_TIMEOUT,
                )
                .await;

                if !exited {
                    diag::cancellation_escalated(agent_name, "forced");
                    #[cfg(unix)]
                    killgroup::send_forced_signal(pid);
                    #[cfg(windows)]
                    let _ = child.start_kill();
                }
            }

            match tokio::time::timeout(killgroup::WAIT_DELAY, child.wait()).await {
                Ok(status) => status.map(|s| s.code()),
                Err(_) => Ok(None),
            }
        }
    }
}

/// Reads the child's stderr in chunks (not lines — stderr has no line
/// protocol to respect) and fans each chunk out to the in-memory buffer,
/// the recorder, the caller's override (or this process's own stderr by
/// default), and, if an event sink is configured, a non-blocking raw-event
/// forward with dropped-chunk accounting.
async fn multiplex_stderr(
    mut stderr: ChildStderr,
    recorder: Arc<dyn Recorder>,
    event_sink: Option<mpsc::Sender<RawEvent>>,
    turn_id: Option<String>,
    stderr_override: Option<conduit_types::StderrSink>,
    agent_name: String,
    cancel: CancelToken,
) -> String {
    let mut captured = String::new();
    let mut buf = [0u8; STDERR_CHUNK_BYTES];
    let mut drops = DropCounter::new(100);

    loop {
        let n = match stderr.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(_) => break,
        };
        let chunk = &buf[..n];

        recorder.record_stderr(chunk);
        captured.push_str(&String::from_utf8_lossy(chunk));

        match &stderr_override {
            Some(sink) => sink(chunk),
            None => {
                use std::io::Write;
                let _ = std::io::stderr().write_all(chunk);
            }
        }

        if let Some(sink) = &event_sink {
            let event = RawEvent::unknown(chunk.to_vec()).with_turn_id(turn_id.clone());
            if !offer_cancellable(sink, event, &cancel) {
                if drops.record() {
                    diag::drop_diagnostic(&agent_name, turn_id.as_deref(), "stderr", drops.count());
                }
            }
        }
    }

    captured
}
