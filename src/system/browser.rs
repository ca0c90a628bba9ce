//! Opening resolved links in the desktop browser

use std::process::{Command, Stdio};

use tracing::debug;

use crate::errors::{ClicklinkError, Result};

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserOpener;

impl BrowserOpener {
    pub fn new() -> Self {
        Self
    }

    /// Hand `url` to the platform's default URL handler without waiting for it
    pub fn open(&self, url: &str) -> Result<()> {
        launch(platform_command(url))
    }
}

/// Start `command` detached; only a failure to start is reported
fn launch(mut command: Command) -> Result<()> {
    debug!("BrowserOpener: launching {:?}", command);

    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ClicklinkError::file_operation(format!("Cannot launch browser: {}", e)))?;

    // 回收子进程，避免留下僵尸进程
    std::thread::spawn(move || {
        if let Ok(status) = child.wait()
            && !status.success()
        {
            debug!("BrowserOpener: launcher exited with {}", status);
        }
    });
    Ok(())
}

#[cfg(target_os = "macos")]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(windows)]
fn platform_command(url: &str) -> Command {
    // start 的第一个参数是窗口标题
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(not(any(target_os = "macos", windows)))]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_missing_launcher_is_an_error() {
        let err = launch(Command::new("clicklink-no-such-launcher")).unwrap_err();
        assert!(matches!(err, ClicklinkError::FileOperation(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_launch_does_not_wait_for_exit() {
        let mut cmd = Command::new("sleep");
        cmd.arg("5");

        let started = Instant::now();
        launch(cmd).unwrap();
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
