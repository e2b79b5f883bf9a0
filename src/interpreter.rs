use crate::command::{CommandFactory, Continuation, ExitCode, Outcome, Streams};
use crate::error::ShellError;
use crate::reader::LineSource;
use crate::tokenizer;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate: builtins and external programs.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Stopped,
}

/// The read-tokenize-dispatch loop.
///
/// The interpreter holds an ordered list of [`CommandFactory`] objects that are
/// queried by name; the first one to recognize a name runs it. The list never
/// changes once the interpreter is built. See [`Default`] for the factories
/// included out of the box.
///
/// Example
/// ```
/// use lsh::{Continuation, Interpreter, Streams};
/// let mut sh = Interpreter::default();
/// let (mut out, mut err) = (Vec::new(), Vec::new());
/// let next = sh.execute(&["exit", "0"], &mut Streams::new(&mut out, &mut err));
/// assert_eq!(next, Continuation::Terminate);
/// ```
pub struct Interpreter {
    commands: Vec<Box<dyn CommandFactory>>,
    last_status: ExitCode,
    trace: bool,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            commands,
            last_status: 0,
            trace: false,
        }
    }

    /// Report every tokenized line and exit status on the error stream.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Exit status of the most recent command, 0 before any has run.
    pub fn last_status(&self) -> ExitCode {
        self.last_status
    }

    /// Dispatches one argument vector and tells the caller whether to go on.
    ///
    /// An empty vector is a no-op. Failures of individual commands are written
    /// to `streams.err` and never stop the loop. Diagnostics that cannot be
    /// written to `streams.err` are dropped.
    pub fn execute(&mut self, argv: &[&str], streams: &mut Streams<'_>) -> Continuation {
        let Some((&name, args)) = argv.split_first() else {
            return Continuation::Continue;
        };
        if self.trace {
            let _ = writeln!(streams.err, "lsh: trace: argv = {:?}", argv);
        }

        let Some(cmd) = self
            .commands
            .iter()
            .find_map(|factory| factory.try_create(name, args))
        else {
            self.last_status = 127;
            let _ = writeln!(streams.err, "lsh: {}: command not found", name);
            return Continuation::Continue;
        };

        match cmd.execute(streams) {
            Ok(Outcome {
                continuation,
                status,
            }) => {
                self.last_status = status;
                if self.trace {
                    let _ = writeln!(streams.err, "lsh: trace: {} exited with {}", name, status);
                }
                continuation
            }
            Err(err) => {
                self.last_status = 1;
                let _ = writeln!(streams.err, "lsh: {:#}", err);
                Continuation::Continue
            }
        }
    }

    /// Runs the loop until `exit` is entered or `source` runs dry.
    ///
    /// Returns `Err` only for failures that make reading further lines
    /// impossible; the caller should exit with a failure status.
    pub fn repl(
        &mut self,
        source: &mut dyn LineSource,
        prompt: &str,
        streams: &mut Streams<'_>,
    ) -> Result<(), ShellError> {
        let mut state = State::Running;
        while state == State::Running {
            let Some(line) = source.read_line(prompt)? else {
                state = State::Stopped;
                continue;
            };
            let argv = tokenizer::split_into_tokens(&line)?;
            if self.execute(&argv, streams) == Continuation::Terminate {
                state = State::Stopped;
            }
        }
        streams.out.flush().map_err(ShellError::Write)?;
        Ok(())
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the default set of commands:
    /// - built-ins: `cd`, `help`, `exit`
    /// - external command launcher
    fn default() -> Self {
        use crate::builtin::Builtin;
        use crate::external::ExternalCommand;
        Self::new(vec![
            Box::new(Factory::<Builtin>::default()),
            Box::new(Factory::<ExternalCommand>::default()),
        ])
    }
}
