use std::io::{self, StderrLock, StdoutLock, Write};

/// Locked handle on stdout or stderr.
///
/// The lock is held for the writer's lifetime, which the engine scopes to a
/// single record, so records from different threads never interleave.
pub enum ConsoleWriter {
    Stdout(StdoutLock<'static>),
    Stderr(StderrLock<'static>),
}

impl ConsoleWriter {
    pub fn stdout() -> Self {
        ConsoleWriter::Stdout(io::stdout().lock())
    }

    pub fn stderr() -> Self {
        ConsoleWriter::Stderr(io::stderr().lock())
    }
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            ConsoleWriter::Stdout(out) => out.write(buf),
            ConsoleWriter::Stderr(err) => err.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            ConsoleWriter::Stdout(out) => out.flush(),
            ConsoleWriter::Stderr(err) => err.flush(),
        }
    }
}
