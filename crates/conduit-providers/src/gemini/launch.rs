use crate::traits::{ArgvInput, ArgvPlan, ProviderLaunchSpec};

/// `--output-format stream-json`, plus `-p ""` to force non-interactive mode
/// when a prompt is present (the prompt itself still goes over stdin).
pub struct GeminiLaunchSpec;

impl ProviderLaunchSpec for GeminiLaunchSpec {
    fn build(&self, input: &ArgvInput) -> ArgvPlan {
        let mut argv = input.user_args.clone();

        if !input.user_args.iter().any(|a| a == "--output-format") {
            argv.push("--output-format".to_string());
            argv.push("stream-json".to_string());
        }

        if input.prompt_present && !input.user_args.iter().any(|a| a == "-p") {
            argv.push("-p".to_string());
            argv.push(String::new());
        }

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
