use crate::source::{Compression, SourceError};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Line iterator over a plain or gzip-compressed file.
///
/// Lines are split on `\n` with any trailing `\r` removed. Bytes that are not
/// valid UTF-8 are replaced rather than failing the read; such a line simply
/// will not match the access log grammar.
pub struct LineReader {
    path: PathBuf,
    reader: Box<dyn BufRead>,
    buf: Vec<u8>,
    line: u64,
}

impl LineReader {
    pub fn open(path: &Path, compression: Compression) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|e| SourceError::open(path, e))?;

        let reader: Box<dyn BufRead> = match compression {
            Compression::None => Box::new(BufReader::new(file)),
            // Rotated archives are sometimes concatenated gzip members.
            Compression::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(BufReader::new(file)))),
        };

        Ok(Self::from_reader(path, reader))
    }

    fn from_reader(path: impl Into<PathBuf>, reader: Box<dyn BufRead>) -> Self {
        Self {
            path: path.into(),
            reader,
            buf: Vec::new(),
            line: 0,
        }
    }
}

impl Iterator for LineReader {
    type Item = Result<String, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();

        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line += 1;
                let mut end = self.buf.len();
                if self.buf[..end].ends_with(b"\n") {
                    end -= 1;
                }
                if self.buf[..end].ends_with(b"\r") {
                    end -= 1;
                }
                Some(Ok(String::from_utf8_lossy(&self.buf[..end]).into_owned()))
            }
            Err(e) => Some(Err(SourceError::Read {
                path: self.path.clone(),
                line: self.line,
                source: e,
            })),
        }
    }
}
