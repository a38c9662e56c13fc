use crate::launch_common::{has_flag, push_flag_if_absent};
use crate::traits::{ArgvInput, ArgvPlan, ProviderLaunchSpec};

const DEFAULT_RUST_LOG: &str = "error,codex_core::rollout::list=off";

/// `exec` subcommand, with `exec resume <id>` when resuming. Strips
/// `--full-auto` (superseded by the bypass flag below) and injects
/// `--skip-git-repo-check`/`--json` unless already present. Installs a
/// quiet default `RUST_LOG` only when the caller hasn't set one.
pub struct CodexLaunchSpec;

impl ProviderLaunchSpec for CodexLaunchSpec {
    fn build(&self, input: &ArgvInput) -> ArgvPlan {
        let mut argv = vec!["exec".to_string()];

        if let Some(id) = &input.resume_session_id {
            argv.push("resume".to_string());
            argv.push(id.clone());
        }

        let passthrough: Vec<String> = input
            .user_args
            .iter()
            .filter(|a| a.as_str() != "--full-auto")
            .cloned()
            .collect();
        argv.extend(passthrough.iter().cloned());

        push_flag_if_absent(&mut argv, &passthrough, "--skip-git-repo-check");
        push_flag_if_absent(&mut argv, &passthrough, "--json");

        if !has_flag(&passthrough, "--dangerously-bypass-approvals-and-sandbox")
            && !has_flag(&passthrough, "--yolo")
        {
            argv.push("--dangerously-bypass-approvals-and-sandbox".to_string());
        }

        let env_overlay = if input.caller_set_rust_log {
            Vec::new()
        } else {
            vec![("RUST_LOG".to_string(), DEFAULT_RUST_LOG.to_string())]
        };

        ArgvPlan {
            argv,
            env_overlay,
            prompt_via_stdin: true,
        }
    }
}
