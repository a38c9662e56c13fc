//! Thin CLI wiring `conduit-providers` and `conduit-runtime` together: a
//! `clap`-derived `Cli` plus a library-level `run` function the binary's
//! `main` calls into, with `anyhow` at this binary edge and each library
//! crate's own hand-rolled `Error` underneath.

mod args;
mod recorder;

pub use args::{Cli, Commands, RunArgs};

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use conduit_types::{cancel_pair, CancelToken, LaunchConfig, NullRecorder, Recorder};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

use crate::recorder::FileRecorder;

pub fn run(cli: Cli) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    runtime.block_on(async move {
        match cli.command {
            Commands::Providers => print_providers(),
            Commands::Run(args) => run_agent(args).await,
        }
    })
}

fn print_providers() -> Result<()> {
    for name in conduit_providers::provider_names() {
        println!("{name}");
    }
    Ok(())
}

async fn run_agent(args: RunArgs) -> Result<()> {
    let prompt = resolve_prompt(&args)?;
    let recorder: Arc<dyn Recorder> = match &args.log_file {
        Some(path) => Arc::new(
            FileRecorder::create(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?,
        ),
        None => Arc::new(NullRecorder),
    };

    let command = args.command.clone().unwrap_or_else(|| args.agent.clone());
    let mut config = LaunchConfig::new(args.agent.clone(), command, recorder);
    config.argv = args.extra_args;
    config.workdir = args.workdir.unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    config.prompt = prompt;
    config.resume_session_id = args.resume;
    config.model = args.model;
    config.reasoning_level = args.reasoning_level;
    config.turn_id = args.turn_id;

    let (cancel_handle, cancel_token) = cancel_pair();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_handle.cancel();
        }
    });

    let result = conduit_runtime::run(config, cancel_token).await;
    ctrl_c.abort();

    match result {
        Ok(run_result) => {
            print_summary(&args.agent, &run_result);
            if !run_result.is_clean_exit() {
                std::process::exit(run_result.exit_code.unwrap_or(1));
            }
            Ok(())
        }
        Err(err) => {
            if let Some(partial) = err.partial_result() {
                print_summary(&args.agent, partial);
            }
            Err(anyhow::anyhow!(err.to_string()))
        }
    }
}

fn resolve_prompt(args: &RunArgs) -> Result<Option<String>> {
    match (&args.prompt, &args.prompt_file) {
        (Some(_), Some(_)) => {
            anyhow::bail!("--prompt and --prompt-file are mutually exclusive")
        }
        (Some(text), None) => Ok(Some(text.clone())),
        (None, Some(path)) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read prompt file {}", path.display()))?;
            Ok(Some(text))
        }
        (None, None) => Ok(None),
    }
}

fn print_summary(agent: &str, result: &conduit_types::RunResult) {
    let mut stderr = std::io::stderr();
    let color = stderr.is_terminal();
    let line = format!(
        "[conduit:{agent}] exit={} duration={}ms session={}",
        result.exit_code.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string()),
        result.duration_ms,
        result.agent_session_id.as_deref().unwrap_or("-"),
    );
    let rendered = if color {
        if result.is_clean_exit() { line.green().to_string() } else { line.red().to_string() }
    } else {
        line
    };
    let _ = writeln!(stderr, "{rendered}");
}
