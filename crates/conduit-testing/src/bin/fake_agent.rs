//! Stand-in provider CLI driven entirely by a `Script` passed over
//! `CONDUIT_FAKE_SCRIPT`, so integration tests can exercise the real
//! subprocess lifecycle (process groups, signals, stdin/stdout/stderr
//! plumbing) without needing an actual claude/codex/gemini/opencode/vibe
//! binary installed.

use std::io::{Read, Write};

use conduit_testing::{Script, ScriptStep};

fn main() {
    let raw = std::env::var("CONDUIT_FAKE_SCRIPT").unwrap_or_default();
    let script = if raw.is_empty() { Script::new() } else { Script::from_json(&raw) };

    let mut exit_code = 0;
    for step in &script.steps {
        match step {
            ScriptStep::Stdout(line) => {
                println!("{line}");
                let _ = std::io::stdout().flush();
            }
            ScriptStep::Stderr(line) => {
                eprintln!("{line}");
            }
            ScriptStep::SleepMs(ms) => {
                std::thread::sleep(std::time::Duration::from_millis(*ms));
            }
            ScriptStep::DrainStdin => {
                let mut buf = Vec::new();
                let _ = std::io::stdin().read_to_end(&mut buf);
            }
            ScriptStep::Exit(code) => {
                exit_code = *code;
            }
        }
    }

    std::process::exit(exit_code);
}
