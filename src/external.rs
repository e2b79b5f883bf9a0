use crate::command::{CommandFactory, ExecutableCommand, ExitCode, Outcome, Streams};
use crate::interpreter::Factory;
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Searched when `PATH` is not set at all, as `execvp` does.
const DEFAULT_SEARCH_PATH: &str = "/bin:/usr/bin";

/// A program outside the shell, resolved to an executable path.
pub struct ExternalCommand {
    /// Argument 0 as the user typed it.
    name: String,
    program: PathBuf,
    args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(name: String, program: PathBuf, args: Vec<String>) -> Self {
        Self {
            name,
            program,
            args,
        }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        let search_paths = search_paths(env::var_os("PATH"));
        let program = find_command_path(&search_paths, Path::new(name))?;
        Some(Box::new(ExternalCommand::new(
            name.to_string(),
            program.into_owned(),
            args.iter().map(|x| x.to_string()).collect(),
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    /// Spawns the program with inherited environment, working directory and
    /// standard streams, then blocks until it exits or is killed.
    fn execute(self: Box<Self>, streams: &mut Streams<'_>) -> Result<Outcome> {
        // the child shares our terminal; anything buffered must land first
        streams.out.flush()?;
        streams.err.flush()?;

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        set_arg0(&mut cmd, &self.name);

        let mut child = cmd.spawn().with_context(|| self.name.clone())?;
        // `wait` does not return for a stopped child, only for exit or signal.
        let exit_status = child
            .wait()
            .with_context(|| format!("{}: wait failed", self.name))?;
        Ok(Outcome::proceed(exit_code(exit_status)))
    }
}

/// The directory list to search; an unset `PATH` falls back to the default.
/// A `PATH` that is set but empty stays empty.
fn search_paths(path_var: Option<OsString>) -> OsString {
    path_var.unwrap_or_else(|| OsString::from(DEFAULT_SEARCH_PATH))
}

#[cfg(unix)]
fn set_arg0(cmd: &mut Command, name: &str) {
    use std::os::unix::process::CommandExt;
    cmd.arg0(name);
}

#[cfg(not(unix))]
fn set_arg0(_cmd: &mut Command, _name: &str) {}

fn exit_code(exit_status: ExitStatus) -> ExitCode {
    match exit_status.code() {
        Some(code) => code,
        None => terminated_by_signal(exit_status),
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    match exit_status.signal() {
        Some(signal) => 128 + signal,
        None => -1,
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}

/// Resolves a command name to an executable the way `execvp` does.
///
/// A name containing a path separator is used as given if it names a file.
/// A bare name is looked up in each directory of `search_paths` in order,
/// skipping entries that are not executable files. An empty name never
/// resolves.
pub fn find_command_path<'a>(search_paths: &OsStr, path: &'a Path) -> Option<Cow<'a, Path>> {
    let mut components = path.components();
    match (components.next(), components.next()) {
        (None, _) => None,
        (Some(_), None) if !path.is_absolute() && !path.starts_with(".") => {
            find_in_path(search_paths, path.as_os_str()).map(Cow::Owned)
        }
        _ => is_executable(path).then_some(Cow::Borrowed(path)),
    }
}

fn find_in_path(search_paths: &OsStr, cmd: &OsStr) -> Option<PathBuf> {
    env::split_paths(search_paths)
        .map(|dir| {
            // an empty PATH entry means the current directory
            if dir.as_os_str().is_empty() {
                PathBuf::from(".").join(cmd)
            } else {
                dir.join(cmd)
            }
        })
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
