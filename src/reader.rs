//! Sources of command lines for the interpreter loop.

use crate::error::ShellError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{BufRead, Write};

const INITIAL_CAPACITY: usize = 1024;

/// Anything the loop can pull command lines from.
pub trait LineSource {
    /// Shows `prompt` and reads the next line, without its trailing newline.
    ///
    /// `Ok(None)` means input is exhausted and the shell should stop.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError>;
}

/// Reads lines byte by byte from a buffered stream, writing prompts to `out`.
pub struct StreamReader<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> StreamReader<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.out)
    }

    /// Reads one line, growing the buffer by doubling as needed.
    ///
    /// A final line without a newline is still returned; the call after it
    /// reports end of input.
    fn read_raw(&mut self) -> Result<Option<Vec<u8>>, ShellError> {
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(INITIAL_CAPACITY)?;

        loop {
            let byte = match self.next_byte()? {
                Some(b'\n') => return Ok(Some(buffer)),
                Some(byte) => byte,
                None if buffer.is_empty() => return Ok(None),
                None => return Ok(Some(buffer)),
            };
            if buffer.len() == buffer.capacity() {
                buffer.try_reserve_exact(buffer.capacity())?;
            }
            buffer.push(byte);
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>, ShellError> {
        loop {
            let available = match self.input.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ShellError::Read(e)),
            };
            let byte = available.first().copied();
            if byte.is_some() {
                self.input.consume(1);
            }
            return Ok(byte);
        }
    }
}

impl<R: BufRead, W: Write> LineSource for StreamReader<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        write!(self.out, "{}", prompt).map_err(ShellError::Write)?;
        self.out.flush().map_err(ShellError::Write)?;
        Ok(self
            .read_raw()?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
    }
}

/// Interactive line source backed by the `rustyline` editor, with history.
pub struct EditorReader {
    editor: DefaultEditor,
}

impl EditorReader {
    pub fn new() -> Result<Self, ShellError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorReader {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufReader, Cursor};

    fn reader(input: &[u8]) -> StreamReader<Cursor<Vec<u8>>, Vec<u8>> {
        StreamReader::new(Cursor::new(input.to_vec()), Vec::new())
    }

    #[test]
    fn test_reads_lines_without_newline() {
        let mut r = reader(b"ls -l\ncd /tmp\n");
        assert_eq!(r.read_line("> ").unwrap().as_deref(), Some("ls -l"));
        assert_eq!(r.read_line("> ").unwrap().as_deref(), Some("cd /tmp"));
        assert_eq!(r.read_line("> ").unwrap(), None);
    }

    #[test]
    fn test_immediate_end_of_input() {
        let mut r = reader(b"");
        assert_eq!(r.read_line("> ").unwrap(), None);
    }

    #[test]
    fn test_blank_line_is_not_end_of_input() {
        let mut r = reader(b"\n");
        assert_eq!(r.read_line("> ").unwrap().as_deref(), Some(""));
        assert_eq!(r.read_line("> ").unwrap(), None);
    }

    #[test]
    fn test_final_line_without_newline() {
        let mut r = reader(b"help");
        assert_eq!(r.read_line("> ").unwrap().as_deref(), Some("help"));
        assert_eq!(r.read_line("> ").unwrap(), None);
    }

    #[test]
    fn test_carriage_return_is_kept_for_tokenizer() {
        let mut r = reader(b"exit\r\n");
        assert_eq!(r.read_line("").unwrap().as_deref(), Some("exit\r"));
    }

    #[test]
    fn test_long_line_is_not_truncated() {
        let long = "x".repeat(INITIAL_CAPACITY * 5 + 7);
        let input = format!("{}\n", long);
        // tiny BufReader capacity forces many refills
        let mut r = StreamReader::new(BufReader::with_capacity(3, input.as_bytes()), Vec::new());
        assert_eq!(r.read_line("").unwrap(), Some(long));
    }

    #[test]
    fn test_prompt_written_before_each_read() {
        let mut r = reader(b"a\nb\n");
        r.read_line("$ ").unwrap();
        r.read_line("$ ").unwrap();
        r.read_line("$ ").unwrap();
        let (_, prompts) = r.into_parts();
        assert_eq!(String::from_utf8(prompts).unwrap(), "$ $ $ ");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct UnreadableInput;

    impl io::Read for UnreadableInput {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        }
    }

    #[test]
    fn test_prompt_write_failure_is_a_write_error() {
        let mut r = StreamReader::new(Cursor::new(b"help\n".to_vec()), BrokenPipe);
        let err = r.read_line("> ").unwrap_err();
        assert!(matches!(err, ShellError::Write(_)), "got {:?}", err);
        assert!(err.to_string().starts_with("failed to write output"));
    }

    #[test]
    fn test_input_failure_is_a_read_error() {
        let mut r = StreamReader::new(BufReader::new(UnreadableInput), Vec::new());
        let err = r.read_line("> ").unwrap_err();
        assert!(matches!(err, ShellError::Read(_)), "got {:?}", err);
        assert!(err.to_string().starts_with("failed to read input"));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut r = reader(b"echo \xff\n");
        assert_eq!(r.read_line("").unwrap().as_deref(), Some("echo \u{FFFD}"));
    }
}
