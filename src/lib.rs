//! A minimal interactive command interpreter.
//!
//! Each iteration of the loop reads one line, splits it into whitespace-delimited
//! tokens and either runs a built-in command (`cd`, `help`, `exit`) in-process or
//! launches an external program and waits for it to finish.
//!
//! The main entry point is [`Interpreter`]. Lines are supplied by any
//! [`reader::LineSource`]; the public modules [`command`] and [`tokenizer`]
//! expose the pieces the loop is built from.

mod builtin;
pub mod command;
mod error;
mod external;
mod interpreter;
pub mod reader;
pub mod tokenizer;

pub use builtin::Builtin;
pub use command::{Continuation, ExitCode, Outcome, Streams};
pub use error::ShellError;
pub use interpreter::Interpreter;
