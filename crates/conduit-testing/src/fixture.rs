use std::sync::Arc;

use conduit_types::{LaunchConfig, Recorder};

use crate::process::FakeAgentProcess;
use crate::script::Script;

/// Builds a `LaunchConfig` that points at the compiled `fake-agent` fixture
/// instead of a real provider binary, primed with `script` via its env var.
/// `agent_name` still selects the dialect parser and launch-spec (the
/// fixture's stdout must match that provider's wire format for the scenario
/// under test); the fixture itself ignores whatever argv the launch-spec
/// builder assembles.
pub fn fake_launch_config(
    agent_name: impl Into<String>,
    script: &Script,
    recorder: Arc<dyn Recorder>,
) -> LaunchConfig {
    let binary = FakeAgentProcess::binary_path();
    let mut config = LaunchConfig::new(agent_name, binary.display().to_string(), recorder);
    config.env_overlay.insert("CONDUIT_FAKE_SCRIPT".to_string(), script.to_json());
    config
}
