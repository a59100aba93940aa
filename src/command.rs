use crate::ExecutionError;
use log::debug;
use std::fmt;
use std::process::{Command, Stdio};

/// A program and its arguments, passed to the child as discrete tokens. No shell is involved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
}

/// Runs external commands on behalf of the configurator.
///
/// Implementations block until the command finishes. Any nonzero exit, and any failure to start
/// the process, is reported as [`ExecutionError`].
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ExecutionError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ExecutionError> {
        (**self).run(invocation)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for Box<R> {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ExecutionError> {
        (**self).run(invocation)
    }
}

/// Spawns real processes with [`std::process::Command`].
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ExecutionError> {
        debug!(">>> {}", invocation);

        let output = Command::new(invocation.program())
            .args(invocation.args())
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ExecutionError {
                command: invocation.to_string(),
                status: None,
                stderr: e.to_string().into_bytes(),
            })?;

        if !output.status.success() {
            let e = ExecutionError {
                command: invocation.to_string(),
                status: output.status.code(),
                stderr: output.stderr,
            };
            debug!("<<< {}", e);
            return Err(e);
        }

        Ok(CommandOutput {
            stdout: output.stdout,
        })
    }
}
