//! Fake-provider process harness and shared fixtures for conduit
//! integration tests.

pub mod fixture;
pub mod process;
pub mod script;

pub use fixture::fake_launch_config;
pub use process::FakeAgentProcess;
pub use script::{Script, ScriptStep};
