use crate::launch_common::push_flag_if_absent;
use crate::traits::{ArgvInput, ArgvPlan, ProviderLaunchSpec};

/// Required flags: `--print --output-format stream-json --verbose`.
/// Prompt delivery: stdin. Resume: `--resume <id>`. The sandbox-disabling
/// flag `--dangerously-skip-permissions` is a pass-through the caller opts
/// into via `user_args`; it is never force-injected.
pub struct ClaudeLaunchSpec;

impl ProviderLaunchSpec for ClaudeLaunchSpec {
    fn build(&self, input: &ArgvInput) -> ArgvPlan {
        let mut argv = input.user_args.clone();

        push_flag_if_absent(&mut argv, &input.user_args, "--print");
        if !input.user_args.iter().any(|a| a == "--output-format") {
            argv.push("--output-format".to_string());
            argv.push("stream-json".to_string());
        }
        push_flag_if_absent(&mut argv, &input.user_args, "--verbose");

        if let Some(id) = &input.resume_session_id {
            argv.push("--resume".to_string());
            argv.push(id.clone());
        }

        ArgvPlan {
            argv,
            env_overlay: Vec::new(),
            prompt_via_stdin: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injects_required_flags_when_absent() {
        let plan = ClaudeLaunchSpec.build(&ArgvInput::default());
        assert!(plan.argv.contains(&"--print".to_string()));
        assert!(plan.argv.windows(2).any(|w| w == ["--output-format", "stream-json"]));
        assert!(plan.argv.contains(&"--verbose".to_string()));
        assert!(plan.prompt_via_stdin);
    }

    #[test]
    fn does_not_duplicate_user_supplied_flag() {
        let input = ArgvInput {
            user_args: vec!["--print".to_string(), "--dangerously-skip-permissions".to_string()],
            ..Default::default()
        };
        let plan = ClaudeLaunchSpec.build(&input);
        assert_eq!(plan.argv.iter().filter(|a| *a == "--print").count(), 1);
        assert!(plan.argv.contains(&"--dangerously-skip-permissions".to_string()));
    }

    #[test]
    fn resume_session_id_appends_resume_flag() {
        let input = ArgvInput {
            resume_session_id: Some("abc".to_string()),
            ..Default::default()
        };
        let plan = ClaudeLaunchSpec.build(&input);
        assert!(plan.argv.windows(2).any(|w| w == ["--resume", "abc"]));
    }
}
