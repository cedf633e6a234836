//! Line acquisition: a byte-at-a-time reader and the sources the loop pulls from.

use crate::buffer::GrowableBuffer;
use crate::error::ShellError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{ErrorKind, Read, Write};

/// Bytes allocated for a line before the first growth.
pub const LINE_INITIAL_CAPACITY: usize = 1024;
/// Bytes added each time a line outgrows its buffer.
pub const LINE_GROWTH_INCREMENT: usize = 512;

/// Reads newline-terminated lines from any byte stream.
///
/// Each line is accumulated in a fresh [`GrowableBuffer`], so an arbitrarily long
/// line is returned whole. Wrap unbuffered handles such as stdin in a
/// [`std::io::BufReader`]; this reader pulls one byte per call.
pub struct LineReader<R> {
    inner: R,
    last_growths: usize,
}

impl<R: Read> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            last_growths: 0,
        }
    }

    /// Read up to (and excluding) the next `\n`.
    ///
    /// Returns `Ok(None)` only when the stream ended before any byte of a new
    /// line was read. A trailing line without a terminator is returned as usual.
    pub fn read_line(&mut self) -> Result<Option<String>, ShellError> {
        let mut buf =
            GrowableBuffer::with_capacity(LINE_INITIAL_CAPACITY, LINE_GROWTH_INCREMENT, "input")?;
        let mut saw_any = false;

        while let Some(byte) = self.next_byte()? {
            saw_any = true;
            if byte == b'\n' {
                break;
            }
            buf.push(byte)?;
        }

        self.last_growths = buf.growths();
        if !saw_any {
            return Ok(None);
        }
        let bytes = buf.into_vec();
        Ok(Some(match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }))
    }

    /// How many times the buffer of the last line read had to grow.
    pub fn last_growths(&self) -> usize {
        self.last_growths
    }

    fn next_byte(&mut self) -> Result<Option<u8>, ShellError> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Where the interpreter loop gets its next line from.
pub trait LineSource {
    /// Show `prompt` and read one line. `Ok(None)` means input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError>;
}

/// Prints the prompt to a writer and reads with a [`LineReader`].
pub struct PlainSource<R, W> {
    reader: LineReader<R>,
    prompt_out: W,
}

impl<R: Read, W: Write> PlainSource<R, W> {
    pub fn new(input: R, prompt_out: W) -> Self {
        Self {
            reader: LineReader::new(input),
            prompt_out,
        }
    }
}

impl<R: Read, W: Write> LineSource for PlainSource<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        self.prompt_out.write_all(prompt.as_bytes())?;
        self.prompt_out.flush()?;
        self.reader.read_line()
    }
}

/// Interactive source backed by rustyline, with in-memory history.
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    pub fn new() -> Result<Self, ShellError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            // ^C drops the current line, like other interactive shells.
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
