use crate::error::Result;
use serde_json::Value;
use std::io::Write;

/// Writes rehydrated posts as a stream of JSON values.
///
/// Values are separated by a single newline; no newline follows the last.
pub struct PostWriter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> PostWriter<W> {
    pub fn new(writer: W) -> Self {
        PostWriter { writer, written: 0 }
    }

    pub fn write_post(&mut self, post: &Value) -> Result<()> {
        if self.written > 0 {
            self.writer.write_all(b"\n")?;
        }
        serde_json::to_writer(&mut self.writer, post).map_err(std::io::Error::from)?;
        self.written += 1;
        Ok(())
    }

    /// Number of posts written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
