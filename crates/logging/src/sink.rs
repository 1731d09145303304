// crates/logging/src/sink.rs
use std::io::{self, Write};

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

use crate::flags::StderrMode;

/// Routes formatted events to stdout or stderr according to [`StderrMode`].
pub(crate) struct LogWriter {
    pub(crate) mode: StderrMode,
}

pub(crate) enum StdWriter {
    Out(io::Stdout),
    Err(io::Stderr),
}

impl Write for StdWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            StdWriter::Out(w) => w.write(buf),
            StdWriter::Err(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            StdWriter::Out(w) => w.flush(),
            StdWriter::Err(w) => w.flush(),
        }
    }
}

impl LogWriter {
    pub(crate) fn to_stderr(&self, level: &Level) -> bool {
        match self.mode {
            StderrMode::All => true,
            StderrMode::Errors => *level <= Level::WARN,
        }
    }
}

impl<'a> MakeWriter<'a> for LogWriter {
    type Writer = StdWriter;

    fn make_writer(&'a self) -> Self::Writer {
        StdWriter::Err(io::stderr())
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        if self.to_stderr(meta.level()) {
            StdWriter::Err(io::stderr())
        } else {
            StdWriter::Out(io::stdout())
        }
    }
}
