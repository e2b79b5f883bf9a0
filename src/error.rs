use rustyline::error::ReadlineError;
use std::collections::TryReserveError;
use std::io;
use thiserror::Error;

/// Errors that stop the interpreter with a failure status.
///
/// Everything a single command can get wrong is reported and survived; these
/// mean the input side of the loop cannot go on.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("allocation error")]
    Allocation(#[from] TryReserveError),
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
    #[error("line editor failed: {0}")]
    Editor(#[from] ReadlineError),
}
