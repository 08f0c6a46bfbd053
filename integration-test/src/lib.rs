//! Test driver for bojtier integration tests.
//!
//! Spawns a workspace binary with the given arguments, environment and
//! working directory, waits for it and captures stdout, stderr and the exit
//! code for assertions.

use std::process::{Command, Stdio};

/// Output captured from a completed run.
#[derive(Debug)]
pub struct RunOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    /// Assert the exit code, dumping both streams on mismatch.
    pub fn expect_exit(self, expected_code: i32) -> RunOutput {
        assert_eq!(
            self.code, expected_code,
            "expected exit code {expected_code}, got {}\nstdout:\n{}\nstderr:\n{}",
            self.code, self.stdout, self.stderr
        );
        self
    }

    /// Stdout without the leading program banner line.
    pub fn body(&self) -> &str {
        self.stdout.split_once('\n').map_or("", |(_, rest)| rest)
    }
}

/// Run `binary` with `args` and additional `env`.
pub fn run(binary: &str, args: &[&str], env: &[(&str, &str)]) -> std::io::Result<RunOutput> {
    run_in(binary, args, env, None)
}

/// Like `run`, but with an optional working directory.
pub fn run_in(
    binary: &str,
    args: &[&str],
    env: &[(&str, &str)],
    cwd: Option<&str>,
) -> std::io::Result<RunOutput> {
    let mut cmd = Command::new(binary);
    cmd.args(args);
    // Keep help output free of escapes unless a test opts back in
    cmd.env("NO_COLOR", "1");
    for (k, v) in env {
        cmd.env(k, v);
    }
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    cmd.stdin(Stdio::null());

    let output = cmd.output()?;
    Ok(RunOutput {
        code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
