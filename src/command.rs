use anyhow::Result;
use std::io::Write;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// Outcome of dispatching one command line, telling the loop whether to go on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Read and run the next line.
    Continue,
    /// Stop the loop and exit successfully.
    Terminate,
}

/// What a finished command hands back to the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub continuation: Continuation,
    pub status: ExitCode,
}

impl Outcome {
    /// Keep the loop running, recording `status` as the last exit code.
    pub fn proceed(status: ExitCode) -> Self {
        Self {
            continuation: Continuation::Continue,
            status,
        }
    }

    pub fn terminate() -> Self {
        Self {
            continuation: Continuation::Terminate,
            status: 0,
        }
    }
}

/// Output and error writers handed to commands run in-process.
///
/// External programs do not use these: they inherit the interpreter's own
/// standard streams.
pub struct Streams<'a> {
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

impl<'a> Streams<'a> {
    pub fn new(out: &'a mut dyn Write, err: &'a mut dyn Write) -> Self {
        Self { out, err }
    }
}

/// Object-safe trait for any command that can be executed by the shell.
///
/// An `Err` is a recoverable failure: the interpreter reports it and keeps
/// running.
pub trait ExecutableCommand {
    fn execute(self: Box<Self>, streams: &mut Streams<'_>) -> Result<Outcome>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`.
pub trait CommandFactory {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>>;
}
