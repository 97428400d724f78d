//! Line-oriented text input of k-mer count records.

use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
};

use crate::{KeyCodec, KmerBinError, PackedInt, Record};

/// Maximum accepted text line length in bytes.
pub const MAX_LINE_LEN: usize = 1024;

pub type BoxedLineReader = Box<dyn BufRead + Send>;

/// Streaming reader for text k-mer count files.
///
/// Each line holds one record, `<ACGT run><separator><count>`, with the
/// trailing newline optional. The codec sits behind an abstract handle so
/// the reader works unchanged with any key encoding.
///
/// Parse failures follow a stop-and-error policy: the failing line yields an
/// error and iteration terminates, so malformed input is never silently
/// skipped. Lines longer than [`MAX_LINE_LEN`] fail with `LineOverflow`
/// rather than being truncated.
///
/// # Examples
///
/// ```rust
/// use kmerbin::{ConstantLengthKmerCodec, TextRecordReader};
/// use std::io::Cursor;
///
/// # fn main() -> kmerbin::Result<()> {
/// let codec = ConstantLengthKmerCodec::<u64, u32>::new(4)?;
/// let input = Cursor::new("AAAA 1\nACGT 12\n");
/// let mut reader = TextRecordReader::new(input, Box::new(codec));
///
/// while let Some(record) = reader.read_next()? {
///     println!("{} -> {}", record.key, record.value);
/// }
/// # Ok(())
/// # }
/// ```
pub struct TextRecordReader<R: BufRead, K: PackedInt, V: PackedInt> {
    /// Inner line source
    inner: R,

    /// Codec converting one line to a record
    codec: Box<dyn KeyCodec<K, V>>,

    /// Reusable line buffer
    line: Vec<u8>,

    /// Set on clean end-of-input or after the first error
    done: bool,
}

impl<R: BufRead, K: PackedInt, V: PackedInt> TextRecordReader<R, K, V> {
    pub fn new(inner: R, codec: Box<dyn KeyCodec<K, V>>) -> Self {
        Self {
            inner,
            codec,
            line: Vec::with_capacity(MAX_LINE_LEN),
            done: false,
        }
    }

    /// Reads and parses the next line.
    ///
    /// Returns `Ok(None)` on clean end-of-input. A parse failure or an
    /// overlong line returns the error and terminates iteration; subsequent
    /// calls yield `Ok(None)`.
    pub fn read_next(&mut self) -> crate::Result<Option<Record<K, V>>> {
        if self.done {
            return Ok(None);
        }

        self.line.clear();
        // limit covers a full-length line plus its CRLF terminator; the
        // overflow check below runs on the stripped length
        let n = self
            .inner
            .by_ref()
            .take(MAX_LINE_LEN as u64 + 2)
            .read_until(b'\n', &mut self.line)?;
        if n == 0 {
            self.done = true;
            return Ok(None);
        }

        if self.line.last() == Some(&b'\n') {
            self.line.pop();
        }
        if self.line.last() == Some(&b'\r') {
            self.line.pop();
        }
        if self.line.len() > MAX_LINE_LEN {
            self.done = true;
            return Err(KmerBinError::LineOverflow { max: MAX_LINE_LEN });
        }

        let line = String::from_utf8_lossy(&self.line);
        match self.codec.convert_record(&line) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                self.done = true;
                Err(e)
            }
        }
    }
}

impl<R: BufRead, K: PackedInt, V: PackedInt> Iterator for TextRecordReader<R, K, V> {
    type Item = crate::Result<Record<K, V>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_next() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl<K: PackedInt, V: PackedInt> TextRecordReader<BoxedLineReader, K, V> {
    /// Opens a text file, stripping one trailing newline/carriage-return
    /// from the path string first.
    ///
    /// # Errors
    ///
    /// Returns `Open` with the offending path if the file cannot be opened.
    pub fn from_path<P: AsRef<str>>(path: P, codec: Box<dyn KeyCodec<K, V>>) -> crate::Result<Self> {
        let file: File = super::open_read(path.as_ref())?;
        Ok(Self::new(Box::new(BufReader::new(file)), codec))
    }
}
