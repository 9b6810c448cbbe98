use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{AnalyzerError, Result};
use crate::formats::FormatHint;
use crate::models::LogEntry;
use crate::parser::LineParser;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Whether a path is read through the gzip decoder
pub fn is_gzip(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("gz"))
}

/// Decode a raw line, dropping bytes that are not valid UTF-8
pub fn decode_lossy(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Lazy sequence of entries parsed from one file.
///
/// Blank lines are skipped and do not count toward the entry cap. The
/// underlying handle is released when the reader is dropped. After a read
/// error the error is yielded once and the sequence ends.
pub struct LogReader {
    path: PathBuf,
    reader: Box<dyn BufRead>,
    parser: LineParser,
    hint: FormatHint,
    max_entries: Option<usize>,
    produced: usize,
    buf: Vec<u8>,
    finished: bool,
}

impl LogReader {
    /// Open `path`, decompressing transparently when it ends in `.gz`.
    /// A cap of `Some(0)` means unlimited.
    pub fn open(
        path: impl AsRef<Path>,
        parser: LineParser,
        hint: FormatHint,
        max_entries: Option<usize>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| AnalyzerError::io(path, e))?;

        let reader: Box<dyn BufRead> = if is_gzip(path) {
            Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, file))
        };

        Ok(Self::from_reader(path, reader, parser, hint, max_entries))
    }

    /// Wrap an already-open reader; `label` names it in errors
    pub fn from_reader(
        label: impl Into<PathBuf>,
        reader: Box<dyn BufRead>,
        parser: LineParser,
        hint: FormatHint,
        max_entries: Option<usize>,
    ) -> Self {
        Self {
            path: label.into(),
            reader,
            parser,
            hint,
            max_entries: max_entries.filter(|&cap| cap > 0),
            produced: 0,
            buf: Vec::new(),
            finished: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries yielded so far
    pub fn produced(&self) -> usize {
        self.produced
    }

    fn cap_reached(&self) -> bool {
        self.max_entries.map_or(false, |cap| self.produced >= cap)
    }
}

impl Iterator for LogReader {
    type Item = Result<LogEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished && !self.cap_reached() {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.finished = true,
                Ok(_) => {
                    let line = decode_lossy(&self.buf);
                    if let Some(entry) = self.parser.parse(&line, self.hint) {
                        self.produced += 1;
                        return Some(Ok(entry));
                    }
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(AnalyzerError::io(&self.path, e)));
                }
            }
        }
        None
    }
}
