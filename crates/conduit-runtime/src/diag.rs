//! Stderr diagnostics for drop counters and cancellation escalation.
//! Colorized with `owo-colors` and gated by `is-terminal` so piped output
//! stays plain text.

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

fn color_enabled() -> bool {
    std::io::stderr().is_terminal()
}

pub fn drop_diagnostic(provider: &str, turn_id: Option<&str>, kind: &str, drop_count: u64) {
    let turn = turn_id.unwrap_or("-");
    let line = format!(
        "[conduit:{provider}] dropped event (turn={turn} kind={kind}) — drop #{drop_count}"
    );
    if color_enabled() {
        eprintln!("{}", line.yellow());
    } else {
        eprintln!("{line}");
    }
}

pub fn cancellation_escalated(agent_name: &str, stage: &str) {
    let line = format!("[conduit:{agent_name}] cancellation escalating: {stage}");
    if color_enabled() {
        eprintln!("{}", line.dimmed());
    } else {
        eprintln!("{line}");
    }
}
