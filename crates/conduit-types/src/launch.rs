use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::raw_event::RawEvent;
use crate::recorder::Recorder;

/// Per-chunk stderr sink an embedder can install in place of the child's
/// stderr being forwarded to this process's own stderr by default.
pub type StderrSink = Arc<dyn Fn(&[u8]) + Send + Sync>;

/// Inputs to one agent run.
///
/// `event_sink` selects which stream-loop path runs: when set, events are
/// forwarded to it (TUI mode); when absent, events go to the terminal
/// renderer instead.
pub struct LaunchConfig {
    pub agent_name: String,
    pub command: String,
    pub argv: Vec<String>,
    pub workdir: PathBuf,
    pub env_overlay: HashMap<String, String>,
    pub prompt: Option<String>,
    pub resume_session_id: Option<String>,
    pub event_sink: Option<mpsc::Sender<RawEvent>>,
    pub turn_id: Option<String>,
    pub recorder: Arc<dyn Recorder>,
    /// Channel capacity between the parser and the stream loop.
    pub parser_channel_capacity: usize,
    /// Profile fields the per-provider launch-spec builder needs to
    /// translate into argv/env — e.g. codex has no `--model` flag of its
    /// own and gemini's reasoning level becomes a `-c` config entry on one
    /// provider, an env var on another.
    pub model: Option<String>,
    pub reasoning_level: Option<String>,
    /// `None` means the child's stderr is forwarded to this process's own
    /// stderr by default.
    pub stderr_override: Option<StderrSink>,
}

impl LaunchConfig {
    pub fn new(agent_name: impl Into<String>, command: impl Into<String>, recorder: Arc<dyn Recorder>) -> Self {
        Self {
            agent_name: agent_name.into(),
            command: command.into(),
            argv: Vec::new(),
            workdir: PathBuf::from("."),
            env_overlay: HashMap::new(),
            prompt: None,
            resume_session_id: None,
            event_sink: None,
            turn_id: None,
            recorder,
            parser_channel_capacity: 64,
            model: None,
            reasoning_level: None,
            stderr_override: None,
        }
    }

    pub fn with_argv(mut self, argv: Vec<String>) -> Self {
        self.argv = argv;
        self
    }

    pub fn with_workdir(mut self, workdir: PathBuf) -> Self {
        self.workdir = workdir;
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_event_sink(mut self, sink: mpsc::Sender<RawEvent>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    pub fn with_stderr_override(mut self, sink: StderrSink) -> Self {
        self.stderr_override = Some(sink);
        self
    }
}
