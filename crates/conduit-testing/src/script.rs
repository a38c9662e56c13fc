use serde::{Deserialize, Serialize};

/// One canned step the `fake-agent` fixture plays back in order. Scripts are
/// handed to the fixture over an environment variable (a real provider CLI's
/// invocation convention is argv/stdin, so the fixture reserves those for
/// faithfully exercising the lifecycle under test rather than for its own
/// configuration).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScriptStep {
    /// Write one line (a trailing newline is added) to stdout.
    Stdout(String),
    /// Write one line to stderr.
    Stderr(String),
    /// Sleep before the next step.
    SleepMs(u64),
    /// Block until stdin reaches EOF.
    DrainStdin,
    /// Exit with this code once reached.
    Exit(i32),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stdout(mut self, line: impl Into<String>) -> Self {
        self.steps.push(ScriptStep::Stdout(line.into()));
        self
    }

    pub fn stderr(mut self, line: impl Into<String>) -> Self {
        self.steps.push(ScriptStep::Stderr(line.into()));
        self
    }

    pub fn sleep_ms(mut self, ms: u64) -> Self {
        self.steps.push(ScriptStep::SleepMs(ms));
        self
    }

    /// A sleep long enough to outlast any test timeout, for scenarios that
    /// need a child hung until it is killed by cancellation.
    pub fn sleep_forever(self) -> Self {
        self.sleep_ms(600_000)
    }

    pub fn drain_stdin(mut self) -> Self {
        self.steps.push(ScriptStep::DrainStdin);
        self
    }

    pub fn exit(mut self, code: i32) -> Self {
        self.steps.push(ScriptStep::Exit(code));
        self
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("Script always serializes")
    }

    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).expect("CONDUIT_FAKE_SCRIPT must be valid JSON")
    }
}
