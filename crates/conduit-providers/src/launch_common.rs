/// Shared helpers for the per-provider `ProviderLaunchSpec` implementations.
/// Argv assembly must never duplicate a flag the caller already supplied,
/// so every provider checks `user_args` before injecting its own required
/// flags.
pub(crate) fn has_flag(user_args: &[String], flag: &str) -> bool {
    user_args.iter().any(|a| a == flag)
}

/// Append `flag` (and, if given, its value token) to `argv` unless the
/// caller's own args already contain it.
pub(crate) fn push_flag_if_absent(argv: &mut Vec<String>, user_args: &[String], flag: &str) {
    if !has_flag(user_args, flag) {
        argv.push(flag.to_string());
    }
}
