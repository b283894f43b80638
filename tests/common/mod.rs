//! Common helpers for Wampa integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Poll period handed to the binary so tests stay fast
pub const FAST_POLL_MS: &str = "20";

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Wait until `path` holds exactly `want`.
pub fn wait_for_content(path: &Path, want: &str, timeout: Duration) -> bool {
    let end = Instant::now() + timeout;
    loop {
        if fs::read_to_string(path).is_ok_and(|c| c == want) {
            return true;
        }
        if Instant::now() >= end {
            return false;
        }
        thread::sleep(Duration::from_millis(20));
    }
}

pub fn wampa(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_wampa"));
    cmd.current_dir(dir)
        .env_remove("WAMPA_LOG")
        .env_remove("WAMPA_WATCH_MODE")
        .env_remove("WAMPA_POLL_INTERVAL_MS")
        .env_remove("WAMPA_MAX_REMOTE_SIZE")
        .env("NO_COLOR", "1");
    cmd
}

/// Running `wampa` process, killed on drop
pub struct WampaProcess {
    child: Option<Child>,
}

impl WampaProcess {
    pub fn spawn(dir: &Path, args: &[&str]) -> Self {
        let child = wampa(dir)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to start wampa");
        Self { child: Some(child) }
    }

    /// Stop the process and collect what it printed.
    pub fn stop(mut self) -> Output {
        let mut child = self.child.take().expect("process already stopped");
        let _ = child.kill();
        child.wait_with_output().expect("failed to collect wampa output")
    }
}

impl Drop for WampaProcess {
    fn drop(&mut self) {
        if let Some(child) = self.child.as_mut() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
