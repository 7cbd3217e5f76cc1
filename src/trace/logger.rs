use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::trace::trace::TraceEvent;

/// JSONL record of hint operations, one `TraceEvent` per line.
///
/// The trace belongs to a single `Hinter`, so writes go straight through a
/// line-buffered file. The first write failure turns tracing off; hinting
/// itself never notices.
#[derive(Debug)]
pub struct TraceLogger {
    sink: Option<LineWriter<File>>,
    recorded: usize,
}

impl TraceLogger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                debug!(path = %path.display(), "tracing hint operations");
                Self {
                    sink: Some(LineWriter::new(file)),
                    recorded: 0,
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not open trace file, tracing disabled");
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self {
            sink: None,
            recorded: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Events written since the trace was opened.
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    pub fn record(&mut self, event: &TraceEvent) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        let written = serde_json::to_writer(&mut *sink, event)
            .map_err(std::io::Error::from)
            .and_then(|()| sink.write_all(b"\n"));
        match written {
            Ok(()) => self.recorded += 1,
            Err(e) => {
                warn!(operation = event.operation, error = %e, "could not write trace event, tracing disabled");
                self.sink = None;
            }
        }
    }
}
