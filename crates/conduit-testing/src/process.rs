//! Background process management for the `fake-agent` fixture binary.
//!
//! Spawn, optionally with piped stdio, poll for exit with a timeout, and
//! kill on drop so a test that panics mid-assertion never leaks a child.

use std::io::{BufRead, BufReader};
use std::process::{Child, ChildStderr, ChildStdout, Command, Stdio};
use std::time::Duration;

use crate::script::Script;

pub struct FakeAgentProcess {
    child: Child,
}

impl FakeAgentProcess {
    /// A `Command` for the compiled fixture binary, primed with `script`.
    pub fn command(script: &Script) -> Command {
        let mut command = Command::new(Self::binary_path());
        command.env("CONDUIT_FAKE_SCRIPT", script.to_json());
        command
    }

    pub fn binary_path() -> std::path::PathBuf {
        assert_cmd::cargo::cargo_bin("fake-agent")
    }

    pub fn spawn(script: &Script) -> std::io::Result<Self> {
        let child = Self::command(script).spawn()?;
        Ok(Self { child })
    }

    pub fn spawn_piped(script: &Script) -> std::io::Result<Self> {
        let mut command = Self::command(script);
        command.stdin(Stdio::piped());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());
        let child = command.spawn()?;
        Ok(Self { child })
    }

    pub fn wait_timeout(
        &mut self,
        timeout: Duration,
    ) -> std::io::Result<Option<std::process::ExitStatus>> {
        let start = std::time::Instant::now();
        loop {
            match self.child.try_wait()? {
                Some(status) => return Ok(Some(status)),
                None => {
                    if start.elapsed() > timeout {
                        return Ok(None);
                    }
                    std::thread::sleep(Duration::from_millis(20));
                }
            }
        }
    }

    pub fn kill(&mut self) -> std::io::Result<()> {
        self.child.kill()
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    pub fn stdout(&mut self) -> Option<&mut ChildStdout> {
        self.child.stdout.as_mut()
    }

    pub fn stderr(&mut self) -> Option<&mut ChildStderr> {
        self.child.stderr.as_mut()
    }

    /// Reads every stdout line up to EOF. Only useful once the script has
    /// run its course (or the child has been killed and the pipe closed).
    pub fn read_stdout_lines(&mut self) -> std::io::Result<Vec<String>> {
        let Some(stdout) = self.stdout() else {
            return Ok(Vec::new());
        };
        BufReader::new(stdout).lines().collect()
    }
}

impl Drop for FakeAgentProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
    }
}
