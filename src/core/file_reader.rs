//! Line-oriented file reading
//!
//! Provides consistent handling for:
//! - Non-UTF-8 bytes (lossy conversion, replaced with U+FFFD)
//! - `\n` and `\r\n` line terminators
//! - Directories passed where a file is expected

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Lines of an open file, read lazily.
///
/// The handle is closed when the reader is dropped.
pub struct LineReader {
    reader: BufReader<File>,
    buffer: Vec<u8>,
    done: bool,
}

impl LineReader {
    /// Open a file for line-by-line reading
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        if file.metadata()?.is_dir() {
            return Err(io::Error::new(io::ErrorKind::Other, "is a directory"));
        }

        Ok(Self {
            reader: BufReader::new(file),
            buffer: Vec::new(),
            done: false,
        })
    }
}

impl Iterator for LineReader {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => Some(Ok(decode_line(&self.buffer))),
            Err(e) => {
                // A failed read is reported once, then iteration stops
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Decode one raw line, dropping its terminator
fn decode_line(raw: &[u8]) -> String {
    let mut end = raw.len();
    if end > 0 && raw[end - 1] == b'\n' {
        end -= 1;
        if end > 0 && raw[end - 1] == b'\r' {
            end -= 1;
        }
    }
    String::from_utf8_lossy(&raw[..end]).into_owned()
}
