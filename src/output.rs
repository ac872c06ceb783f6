//! Line output

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::Print;

/// Writes rendered lines, optionally numbered
pub struct Output<W: Write> {
    writer: W,
    line_numbers: bool,
    line: usize,
}

impl<W: Write> Output<W> {
    /// Wrap a writer
    pub fn new(writer: W, line_numbers: bool) -> Self {
        Self {
            writer,
            line_numbers,
            line: 0,
        }
    }

    /// Write one rendered line and a newline
    ///
    /// The number prefix is never colored.
    pub fn write_line(&mut self, rendered: &str) -> io::Result<()> {
        self.line += 1;
        if self.line_numbers {
            queue!(self.writer, Print(format!("{:>6}  ", self.line)))?;
        }
        queue!(self.writer, Print(rendered), Print('\n'))?;
        Ok(())
    }

    /// Number of lines written so far
    pub fn lines_written(&self) -> usize {
        self.line
    }

    /// Flush output buffer
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}
