//! # External Command Execution
//!
//! Every external tool (git, doxygen, sphinx-build, conan) is invoked through
//! the [`CommandRunner`] trait. The default implementation, [`SystemRunner`],
//! spawns real processes with `std::process::Command`; tests substitute a
//! recording runner so the surrounding workflows can be exercised without any
//! of those tools installed.
//!
//! Commands run to completion before the next step starts. There are no
//! timeouts and no retries: a failing command is reported to the caller
//! immediately.

use std::fmt;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};

/// A single external command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name, resolved through `PATH`.
    pub program: String,
    pub args: Vec<String>,
    /// Extra environment variables, added to the inherited environment.
    pub envs: Vec<(String, String)>,
    /// Data written to the child's stdin. Kept out of [`fmt::Display`].
    pub stdin: Option<String>,
    /// Capture stdout/stderr instead of streaming them to the terminal.
    pub capture: bool,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            stdin: None,
            capture: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn capture_output(mut self) -> Self {
        self.capture = true;
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub code: Option<i32>,
    /// Captured stdout; empty unless the invocation captured output.
    pub stdout: String,
    /// Captured stderr; empty unless the invocation captured output.
    pub stderr: String,
}

impl Outcome {
    /// A successful outcome with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed outcome with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    fn status_text(&self) -> String {
        match self.code {
            Some(code) => code.to_string(),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Trait for running external commands - allows mocking in tests
pub trait CommandRunner {
    /// Run the command to completion.
    ///
    /// A non-zero exit is *not* an error at this level; it is reported in the
    /// returned [`Outcome`]. An error means the command could not be run at
    /// all, for example because the program is not installed.
    fn run(&self, invocation: &Invocation) -> Result<Outcome>;
}

/// Run a command and turn a non-zero exit status into [`Error::CommandFailed`].
pub fn run_checked<R>(runner: &R, invocation: &Invocation) -> Result<Outcome>
where
    R: CommandRunner + ?Sized,
{
    let outcome = runner.run(invocation)?;
    if outcome.success() {
        Ok(outcome)
    } else {
        Err(Error::CommandFailed {
            command: invocation.to_string(),
            status: outcome.status_text(),
            stderr: outcome.stderr.trim().to_string(),
        })
    }
}

/// The default implementation of `CommandRunner`, which spawns real
/// processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<Outcome> {
        debug!("Running: {}", invocation);

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        for (key, value) in &invocation.envs {
            command.env(key, value);
        }
        command.stdin(if invocation.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });
        if invocation.capture {
            command.stdout(Stdio::piped()).stderr(Stdio::piped());
        }

        let mut child = command.spawn().map_err(|err| spawn_error(&invocation.program, err))?;

        if let Some(input) = &invocation.stdin {
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(input.as_bytes())?;
                // Dropping the handle closes the pipe so the child sees EOF
            }
        }

        let output = child.wait_with_output()?;
        Ok(Outcome {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

fn spawn_error(program: &str, err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::NotFound {
        Error::ToolValidation {
            tool: program.to_string(),
            message: "not found on PATH".to_string(),
        }
    } else {
        Error::ToolValidation {
            tool: program.to_string(),
            message: format!("failed to start: {}", err),
        }
    }
}

/// A `CommandRunner` that records invocations and replays scripted outcomes.
///
/// Unscripted commands succeed with empty output. Programs registered with
/// [`RecordingRunner::missing`] fail as if they were not installed.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingRunner {
    calls: std::cell::RefCell<Vec<Invocation>>,
    scripted: Vec<(String, Outcome)>,
    missing: Vec<String>,
}

#[cfg(test)]
impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `outcome` for any invocation whose rendered command line starts
    /// with `prefix`.
    pub fn script(mut self, prefix: &str, outcome: Outcome) -> Self {
        self.scripted.push((prefix.to_string(), outcome));
        self
    }

    /// Treat `program` as not installed.
    pub fn missing(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Rendered command lines of all recorded invocations.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<Outcome> {
        self.calls.borrow_mut().push(invocation.clone());

        if self.missing.contains(&invocation.program) {
            return Err(spawn_error(
                &invocation.program,
                io::Error::from(io::ErrorKind::NotFound),
            ));
        }

        let line = invocation.to_string();
        let outcome = self
            .scripted
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, outcome)| outcome.clone())
            .unwrap_or_else(|| Outcome::ok(""));
        Ok(outcome)
    }
}
