use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Thin binary wiring `conduit-providers`' registry and `conduit-runtime`'s
/// lifecycle together. Not a full product surface (no TUI, profile
/// management, or recording-store layer) — this is a manual smoke-test
/// harness and an embedding example.
#[derive(Parser)]
#[command(name = "conduit")]
#[command(about = "Run a coding-assistant agent CLI and normalize its event stream", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch one agent turn and print its normalized event stream.
    Run(RunArgs),

    /// List the provider dialects this build knows how to drive.
    Providers,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Provider dialect to drive (claude, codex, gemini, opencode, vibe, generic).
    #[arg(long)]
    pub agent: String,

    /// Path to the agent binary. Defaults to `agent` looked up on PATH.
    #[arg(long)]
    pub command: Option<String>,

    /// Prompt text. Mutually exclusive with --prompt-file; omit both to
    /// run with no prompt (the child still gets stdin closed immediately).
    #[arg(long)]
    pub prompt: Option<String>,

    /// Read the prompt from a file instead of --prompt.
    #[arg(long)]
    pub prompt_file: Option<PathBuf>,

    /// Working directory for the child. Defaults to the current directory.
    #[arg(long)]
    pub workdir: Option<PathBuf>,

    /// Resume a prior provider-issued session id.
    #[arg(long)]
    pub resume: Option<String>,

    /// Model name, translated into the provider's own flag/env by the
    /// launch-spec builder.
    #[arg(long)]
    pub model: Option<String>,

    /// Reasoning level, translated the same way.
    #[arg(long)]
    pub reasoning_level: Option<String>,

    /// A correlation id stamped onto every emitted event.
    #[arg(long)]
    pub turn_id: Option<String>,

    /// Append a JSONL recording of every meta/stdin/stdout/stderr/stream
    /// event to this file instead of discarding them.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Extra argv passed straight through to the provider's launch-spec
    /// builder as already-supplied user args (e.g. `--dangerously-skip-permissions`).
    #[arg(last = true)]
    pub extra_args: Vec<String>,
}
