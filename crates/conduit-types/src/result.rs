/// Outputs of one run.
///
/// `exit_code` is `Some(0)` iff the child exited normally with code 0.
/// `None` means the child did not report a numeric exit code: this
/// happens on the partial `RunResult` attached to a cancelled-and-killed
/// run, but also whenever the OS reports the child as signal-terminated
/// outside of that path (e.g. the provider binary itself segfaults).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunResult {
    pub exit_code: Option<i32>,
    pub duration_ms: u64,
    pub captured_stdout_text: String,
    pub captured_stderr_text: String,
    /// The first session id observed on a `system/init` event. Once set it
    /// is never overwritten within the same run.
    pub agent_session_id: Option<String>,
}

impl RunResult {
    pub fn is_clean_exit(&self) -> bool {
        self.exit_code == Some(0)
    }
}
