use conduit_types::RawEvent;

/// One NDJSON line translated into zero, one, or two canonical events.
///
/// Shared shape every dialect parser implements: one line in, zero or more
/// canonical events out. The per-line translation is kept as a plain,
/// synchronous function so it can be unit-tested and snapshot-tested
/// without an executor; `crate::stream::spawn_parser` is the generic driver
/// that turns a `DialectParser` into the actual channel-producing task.
pub trait DialectParser: Send + Sync {
    /// Unique provider id (e.g. "claude", "codex").
    fn id(&self) -> &'static str;

    /// Translate one line (without its trailing newline) into canonical
    /// events. An empty `Vec` means the line was skipped without emission
    /// (blank lines, or `role∈{user,system}` for vibe). Most dialects emit
    /// exactly one `RawEvent`; opencode's `tool_use`
    /// translation emits two.
    fn parse_line(&self, line: &[u8]) -> Vec<RawEvent>;
}

/// Inputs to a provider's argv/env assembly.
#[derive(Debug, Clone, Default)]
pub struct ArgvInput {
    /// Flags the caller already supplied (profile or user override). The
    /// builder must not duplicate a flag already present here.
    pub user_args: Vec<String>,
    pub prompt_present: bool,
    /// The resolved prompt text itself. Only consulted by dialects with an
    /// argv-delivery exception (vibe's `-p <prompt>`); every other provider
    /// only needs to know whether a prompt exists (`prompt_present`).
    pub prompt_text: Option<String>,
    pub event_sink_present: bool,
    pub resume_session_id: Option<String>,
    pub model: Option<String>,
    pub reasoning_level: Option<String>,
    /// `RUST_LOG` (or equivalent) already set by the caller's environment;
    /// used only to decide whether a provider default should be installed.
    pub caller_set_rust_log: bool,
}

/// Output of a provider's argv/env assembly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgvPlan {
    pub argv: Vec<String>,
    pub env_overlay: Vec<(String, String)>,
    /// `true` when the prompt must be delivered over stdin; `false` for the
    /// documented vibe exception (prompt as an argv flag).
    pub prompt_via_stdin: bool,
}

/// Per-provider argv/env translation. Never resolves prompts or session
/// IDs itself — only shapes argv/env around the values it is given.
pub trait ProviderLaunchSpec: Send + Sync {
    fn build(&self, input: &ArgvInput) -> ArgvPlan;
}

/// Bundles a dialect's parser and launch-spec builder under one provider
/// identity.
pub struct Provider {
    pub name: &'static str,
    pub parser: std::sync::Arc<dyn DialectParser>,
    pub launch_spec: std::sync::Arc<dyn ProviderLaunchSpec>,
}

impl Provider {
    pub fn id(&self) -> &'static str {
        self.name
    }
}
