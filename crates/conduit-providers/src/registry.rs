use std::sync::Arc;

use crate::error::{Error, Result};
use crate::traits::Provider;

use crate::claude::{ClaudeLaunchSpec, ClaudeParser};
use crate::codex::{CodexLaunchSpec, CodexParser};
use crate::gemini::{GeminiLaunchSpec, GeminiParser};
use crate::generic::{GenericLaunchSpec, GenericParser};
use crate::opencode::{OpencodeLaunchSpec, OpencodeParser};
use crate::vibe::{VibeLaunchSpec, VibeParser};

/// Every provider name this crate knows how to build, in a flat const slice
/// rather than behind a lock: the registry never mutates at runtime, so a
/// `Mutex<HashMap<..>>` buys nothing here.
const PROVIDER_NAMES: &[&str] = &["claude", "codex", "gemini", "opencode", "vibe", "generic"];

pub fn provider_names() -> &'static [&'static str] {
    PROVIDER_NAMES
}

pub fn get_provider(name: &str) -> Result<Provider> {
    match name {
        "claude" => Ok(Provider {
            name: "claude",
            parser: Arc::new(ClaudeParser),
            launch_spec: Arc::new(ClaudeLaunchSpec),
        }),
        "codex" => Ok(Provider {
            name: "codex",
            parser: Arc::new(CodexParser),
            launch_spec: Arc::new(CodexLaunchSpec),
        }),
        "gemini" => Ok(Provider {
            name: "gemini",
            parser: Arc::new(GeminiParser),
            launch_spec: Arc::new(GeminiLaunchSpec),
        }),
        "opencode" => Ok(Provider {
            name: "opencode",
            parser: Arc::new(OpencodeParser),
            launch_spec: Arc::new(OpencodeLaunchSpec),
        }),
        "vibe" => Ok(Provider {
            name: "vibe",
            parser: Arc::new(VibeParser),
            launch_spec: Arc::new(VibeLaunchSpec),
        }),
        "generic" => Ok(Provider {
            name: "generic",
            parser: Arc::new(GenericParser),
            launch_spec: Arc::new(GenericLaunchSpec),
        }),
        other => Err(Error::UnknownProvider(other.to_string())),
    }
}
