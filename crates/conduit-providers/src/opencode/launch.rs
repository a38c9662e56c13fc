use crate::traits::{ArgvInput, ArgvPlan, ProviderLaunchSpec};

/// opencode has no session-resume flag; `resume_session_id` is accepted but
/// ignored (the caller decides whether that's an error upstream of launch).
pub struct OpencodeLaunchSpec;

impl ProviderLaunchSpec for OpencodeLaunchSpec {
    fn build(&self, input: &ArgvInput) -> ArgvPlan {
        let mut argv = vec!["run".to_string()];
        argv.extend(input.user_args.iter().cloned());

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
    fn run_subcommand_comes_first() {
        let plan = OpencodeLaunchSpec.build(&ArgvInput::default());
        assert_eq!(plan.argv[0], "run");
        assert!(plan.prompt_via_stdin);
    }

    #[test]
    fn passes_through_user_args_after_run() {
        let input = ArgvInput { user_args: vec!["--model".to_string(), "gpt".to_string()], ..Default::default() };
        let plan = OpencodeLaunchSpec.build(&input);
        assert_eq!(plan.argv, vec!["run", "--model", "gpt"]);
    }
}
