/// Narrow seam the core calls into for durable recording. The persistent
/// store itself is an external collaborator out of scope for this crate;
/// this trait is the boundary the lifecycle and stream loop are written
/// against.
pub trait Recorder: Send + Sync {
    /// `meta` entries: `agent=<name>`, `command=<cmdline>`, `workdir=<abs>`.
    fn record_meta(&self, key: &str, value: &str);

    /// The full prompt written to the child's stdin, once per run.
    fn record_stdin(&self, prompt: &str);

    /// Raw stdout chunk, as received from the child.
    fn record_stdout(&self, chunk: &[u8]);

    /// Raw stderr chunk, as received from the child.
    fn record_stderr(&self, chunk: &[u8]);

    /// One verbatim NDJSON line from the child's stdout. Persisted as
    /// `claude_stream` in the store for historical reasons; the trait
    /// method name stays provider-neutral.
    fn record_stream(&self, line: &[u8]);
}

/// No-op recorder for embedders and tests that don't need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRecorder;

impl Recorder for NullRecorder {
    fn record_meta(&self, _key: &str, _value: &str) {}
    fn record_stdin(&self, _prompt: &str) {}
    fn record_stdout(&self, _chunk: &[u8]) {}
    fn record_stderr(&self, _chunk: &[u8]) {}
    fn record_stream(&self, _line: &[u8]) {}
}
