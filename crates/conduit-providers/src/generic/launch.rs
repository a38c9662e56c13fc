use crate::traits::{ArgvInput, ArgvPlan, ProviderLaunchSpec};

/// The escape hatch for an agent CLI with no dedicated dialect: no required
/// flags, no sandbox policy, no resume support. The caller's own args pass
/// through untouched and the prompt goes over stdin like every non-vibe
/// provider.
pub struct GenericLaunchSpec;

impl ProviderLaunchSpec for GenericLaunchSpec {
    fn build(&self, input: &ArgvInput) -> ArgvPlan {
        ArgvPlan {
            argv: input.user_args.clone(),
            env_overlay: Vec::new(),
            prompt_via_stdin: true,
        }
    }
}
