use crate::traits::{ArgvInput, ArgvPlan, ProviderLaunchSpec};

/// The one dialect that delivers its prompt over argv (`-p <prompt>`)
/// instead of stdin. Output mode toggles on whether an event sink is
/// attached; model selection goes through `VIBE_ACTIVE_MODEL`, not a flag.
pub struct VibeLaunchSpec;

impl ProviderLaunchSpec for VibeLaunchSpec {
    fn build(&self, input: &ArgvInput) -> ArgvPlan {
        let mut argv = input.user_args.clone();

        if let Some(prompt) = &input.prompt_text {
            argv.push("-p".to_string());
            argv.push(prompt.clone());
        }

        if !input.user_args.iter().any(|a| a == "--output") {
            argv.push("--output".to_string());
            argv.push(if input.event_sink_present { "streaming" } else { "text" }.to_string());
        }

        let env_overlay = input
            .model
            .as_ref()
            .map(|m| vec![("VIBE_ACTIVE_MODEL".to_string(), m.clone())])
            .unwrap_or_default();

        ArgvPlan {
            argv,
            env_overlay,
            prompt_via_stdin: false,
        }
    }
}
