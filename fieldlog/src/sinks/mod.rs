//! Output destinations for formatted records

pub mod buffer;
pub mod console;

pub use buffer::SharedBuffer;
pub use console::ConsoleWriter;

use std::io::{self, Write};
use tracing_subscriber::fmt::MakeWriter;

/// The single destination a logger writes to
#[derive(Debug, Clone, Default)]
pub enum Sink {
    #[default]
    Stdout,
    Stderr,
    Buffer(SharedBuffer),
}

impl Sink {
    /// Flush whatever the destination buffers
    pub fn flush(&self) {
        let _ = self.make_writer().flush();
    }
}

impl From<SharedBuffer> for Sink {
    fn from(buffer: SharedBuffer) -> Self {
        Sink::Buffer(buffer)
    }
}

/// Writer handed to the engine for one record
pub enum SinkWriter {
    Console(ConsoleWriter),
    Buffer(SharedBuffer),
}

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            SinkWriter::Console(w) => w.write(buf),
            SinkWriter::Buffer(w) => w.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            SinkWriter::Console(w) => w.write_all(buf),
            SinkWriter::Buffer(w) => w.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            SinkWriter::Console(w) => w.flush(),
            SinkWriter::Buffer(w) => w.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for Sink {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        match self {
            Sink::Stdout => SinkWriter::Console(ConsoleWriter::stdout()),
            Sink::Stderr => SinkWriter::Console(ConsoleWriter::stderr()),
            Sink::Buffer(buffer) => SinkWriter::Buffer(buffer.clone()),
        }
    }
}
