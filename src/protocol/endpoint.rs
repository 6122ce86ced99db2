use std::io::{BufRead, BufReader, BufWriter, Read, Write};

use super::commands::Reply;

pub struct CommandReader<I: Read> {
    inner: BufReader<I>,
}
impl<I: Read> CommandReader<I> {
    // Creates a new command reader with the given input stream.
    pub fn new(input: I) -> Self {
        Self {
            inner: BufReader::new(input),
        }
    }

    /// Reads a line, returning `None` once the input is exhausted.
    pub fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut buffer = String::new();
        if self.inner.read_line(&mut buffer)? == 0 {
            return Ok(None);
        }
        Ok(Some(buffer))
    }
}

pub struct ReplyWriter<O: Write> {
    inner: BufWriter<O>,
}
impl<O: Write> ReplyWriter<O> {
    // Creates a new reply writer with the given output stream.
    pub fn new(output: O) -> Self {
        Self {
            inner: BufWriter::new(output),
        }
    }

    /// Sends a reply.
    pub fn send(&mut self, reply: Reply) -> std::io::Result<()> {
        write!(self.inner, "{reply}")?;
        self.inner.flush()
    }

    /// Writes the prompt shown before each command.
    pub fn prompt(&mut self) -> std::io::Result<()> {
        write!(self.inner, "> ")?;
        self.inner.flush()
    }

    pub fn into_inner(self) -> std::io::Result<O> {
        self.inner.into_inner().map_err(|e| e.into_error())
    }
}
