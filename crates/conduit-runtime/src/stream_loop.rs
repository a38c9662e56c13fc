//! Cooperative consumer that drains the parser channel.
//!
//! Forks on whether the launch config carries an event sink: sink mode
//! forwards events (stamped with the turn id) to the embedder's bounded
//! channel with non-blocking `offer`; legacy mode hands events to the
//! terminal `Renderer` and prints a 30-second heartbeat so a human watching
//! a long-running agent sees liveness.

use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use conduit_types::{offer_cancellable, CancelToken, DropCounter, Recorder};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use tokio::sync::mpsc;
use tokio::time::interval;

use crate::accumulator::TextAccumulator;
use crate::renderer::Renderer;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Result of draining one run's parser channel: the accumulated final
/// assistant text and the first captured session id, if any.
#[derive(Debug, Default, Clone)]
pub struct StreamLoopOutcome {
    pub accumulated_text: String,
    pub session_id: Option<String>,
    pub events_dropped: u64,
    /// Verbatim concatenation of every raw NDJSON line observed, one per
    /// line. Mirrors what the recorder's `stream` events carry, kept here
    /// too so a caller without a recorder still gets full fidelity back.
    pub captured_stdout_text: String,
}

fn append_raw_line(buffer: &mut String, raw: &[u8]) {
    if !buffer.is_empty() {
        buffer.push('\n');
    }
    buffer.push_str(&String::from_utf8_lossy(raw));
}

pub struct StreamLoopInput {
    pub recorder: Arc<dyn Recorder>,
    pub event_sink: Option<mpsc::Sender<conduit_types::RawEvent>>,
    pub turn_id: Option<String>,
    pub cancel: CancelToken,
}

pub async fn run(
    rx: mpsc::Receiver<conduit_types::RawEvent>,
    input: StreamLoopInput,
) -> StreamLoopOutcome {
    match input.event_sink {
        Some(sink) => run_sink_mode(rx, input.recorder, sink, input.turn_id, input.cancel).await,
        None => run_legacy_mode(rx, input.recorder, input.turn_id, input.cancel).await,
    }
}

async fn run_sink_mode(
    mut rx: mpsc::Receiver<conduit_types::RawEvent>,
    recorder: Arc<dyn Recorder>,
    sink: mpsc::Sender<conduit_types::RawEvent>,
    turn_id: Option<String>,
    cancel: CancelToken,
) -> StreamLoopOutcome {
    let mut accumulator = TextAccumulator::new();
    let mut session_id: Option<String> = None;
    let mut drops = DropCounter::new(100);
    let mut captured_stdout_text = String::new();

    while let Some(mut event) = rx.recv().await {
        if let Some(raw) = &event.raw_bytes {
            recorder.record_stream(raw);
            append_raw_line(&mut captured_stdout_text, raw);
        }

        if event.is_error() || event.is_unknown_event() {
            continue;
        }

        if event.parsed.is_init() && session_id.is_none() {
            session_id = Some(event.parsed.session_id.clone());
        }

        event.turn_id = turn_id.clone();

        accumulator.feed(&event.parsed);

        if !offer_cancellable(&sink, event, &cancel) {
            if drops.record() {
                crate::diag::drop_diagnostic("agent", turn_id.as_deref(), "raw_event", drops.count());
            }
        }
    }

    StreamLoopOutcome {
        accumulated_text: accumulator.into_text(),
        session_id,
        events_dropped: drops.count(),
        captured_stdout_text,
    }
}

async fn run_legacy_mode(
    mut rx: mpsc::Receiver<conduit_types::RawEvent>,
    recorder: Arc<dyn Recorder>,
    // The turn id only matters to sink-mode consumers (it is stamped onto
    // forwarded `RawEvent`s); legacy mode has no downstream consumer to
    // stamp, so there is nothing to do with it here.
    _turn_id: Option<String>,
    cancel: CancelToken,
) -> StreamLoopOutcome {
    let renderer = Renderer::new();
    let mut accumulator = TextAccumulator::new();
    let mut session_id: Option<String> = None;
    let mut captured_stdout_text = String::new();
    let start = Instant::now();
    let mut heartbeat = interval(HEARTBEAT_INTERVAL);
    heartbeat.tick().await; // first tick fires immediately; consume it

    loop {
        tokio::select! {
            maybe_event = rx.recv() => {
                let Some(event) = maybe_event else { break };

                if let Some(raw) = &event.raw_bytes {
                    recorder.record_stream(raw);
                    append_raw_line(&mut captured_stdout_text, raw);
                }

                if event.is_error() || event.is_unknown_event() {
                    continue;
                }

                if event.parsed.is_init() && session_id.is_none() {
                    session_id = Some(event.parsed.session_id.clone());
                }

                accumulator.feed(&event.parsed);
                renderer.handle(&event.parsed);
            }
            _ = heartbeat.tick() => {
                print_heartbeat(start.elapsed());
            }
            _ = cancel_observed(&cancel) => {
                break;
            }
        }
    }

    renderer.finish();

    StreamLoopOutcome {
        accumulated_text: accumulator.into_text(),
        session_id,
        events_dropped: 0,
        captured_stdout_text,
    }
}

async fn cancel_observed(cancel: &CancelToken) {
    let mut cancel = cancel.clone();
    cancel.cancelled().await;
}

fn print_heartbeat(elapsed: Duration) {
    let line = format!("[conduit] still running… {}s elapsed", elapsed.as_secs());
    let mut stderr = std::io::stderr();
    if stderr.is_terminal() {
        let _ = writeln!(stderr, "{}", line.dimmed());
    } else {
        let _ = writeln!(stderr, "{line}");
    }
}
