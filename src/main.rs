use argh::FromArgs;
use lsh::reader::{EditorReader, LineSource, StreamReader};
use lsh::{Interpreter, ShellError, Streams};
use std::io::{self, IsTerminal};
use std::process::ExitCode;

#[derive(FromArgs)]
/// A minimal interactive command interpreter.
struct Args {
    #[argh(option, default = "String::from(\"> \")")]
    /// text printed before each command line is read.
    prompt: String,

    #[argh(switch)]
    /// print each tokenized command line and exit status to standard error.
    trace: bool,

    #[argh(switch)]
    /// read plain lines even when standard input is a terminal.
    no_editor: bool,
}

fn run(args: &Args) -> Result<(), ShellError> {
    let mut sh = Interpreter::default().with_trace(args.trace);
    let mut source: Box<dyn LineSource> = if io::stdin().is_terminal() && !args.no_editor {
        Box::new(EditorReader::new()?)
    } else {
        Box::new(StreamReader::new(io::stdin().lock(), io::stdout()))
    };
    let mut out = io::stdout();
    let mut err = io::stderr();
    sh.repl(
        source.as_mut(),
        &args.prompt,
        &mut Streams::new(&mut out, &mut err),
    )
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lsh: {}", err);
            ExitCode::FAILURE
        }
    }
}
