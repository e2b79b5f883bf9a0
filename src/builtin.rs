use crate::command::{CommandFactory, ExecutableCommand, Outcome, Streams};
use crate::interpreter::Factory;
use anyhow::{Context, Result, bail};
use std::env;

/// Built-in commands known to the shell at compile time.
///
/// Builtins run in-process; the interpreter consults them before searching
/// `PATH` for an external program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    ChangeDirectory,
    Help,
    Exit,
}

/// Names and commands, in the order `help` lists them.
const TABLE: [(&str, Builtin); 3] = [
    ("cd", Builtin::ChangeDirectory),
    ("help", Builtin::Help),
    ("exit", Builtin::Exit),
];

impl Builtin {
    /// Finds the builtin called exactly `name`.
    pub fn lookup(name: &str) -> Option<Builtin> {
        TABLE
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|&(_, builtin)| builtin)
    }

    /// Canonical name of the command, e.g. "cd" or "exit".
    pub fn name(self) -> &'static str {
        TABLE
            .iter()
            .find(|(_, builtin)| *builtin == self)
            .map(|&(name, _)| name)
            .unwrap_or_default()
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        TABLE.iter().map(|&(name, _)| name)
    }

    /// Runs the builtin with `args`, the operands after the command name.
    pub fn run(self, args: &[&str], streams: &mut Streams<'_>) -> Result<Outcome> {
        match self {
            Builtin::ChangeDirectory => change_directory(args),
            Builtin::Help => help(streams),
            Builtin::Exit => Ok(Outcome::terminate()),
        }
    }
}

fn change_directory(args: &[&str]) -> Result<Outcome> {
    let Some(target) = args.first() else {
        bail!("expected argument to \"cd\"");
    };
    env::set_current_dir(target).with_context(|| format!("cd: {}", target))?;
    Ok(Outcome::proceed(0))
}

fn help(streams: &mut Streams<'_>) -> Result<Outcome> {
    let out = &mut *streams.out;
    writeln!(out, "LSH")?;
    writeln!(out, "Type program names and arguments, and hit enter.")?;
    writeln!(out, "The following are built in:")?;
    for name in Builtin::names() {
        writeln!(out, "  {}", name)?;
    }
    writeln!(out, "Use the man command for information on other programs.")?;
    out.flush()?;
    Ok(Outcome::proceed(0))
}

/// A builtin bound to its operands, ready to run.
struct Invocation {
    builtin: Builtin,
    args: Vec<String>,
}

impl ExecutableCommand for Invocation {
    fn execute(self: Box<Self>, streams: &mut Streams<'_>) -> Result<Outcome> {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        self.builtin.run(&args, streams)
    }
}

impl CommandFactory for Factory<Builtin> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        let builtin = Builtin::lookup(name)?;
        Some(Box::new(Invocation {
            builtin,
            args: args.iter().map(|x| x.to_string()).collect(),
        }))
    }
}
