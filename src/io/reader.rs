//! Buffered binary input of fixed-size k-mer records.

use std::io::{BufReader, Read};

use crate::{KmerBinError, PackedInt, Record};

use super::writer::BATCH_RECORDS;

pub type BoxedReader = Box<dyn Read + Send>;

/// Buffered reader for flat binary record containers.
///
/// Mirrors [`BinaryRecordWriter`](crate::BinaryRecordWriter): each refill
/// fetches up to the batch capacity of records in one bulk read, and records
/// are handed out of the buffer one at a time, always as whole units.
/// Round-trips preserve strict FIFO order; no reordering, merging or
/// deduplication happens at this layer.
///
/// A refill whose byte count is not a multiple of the record size fails with
/// `TruncatedRecord` rather than silently dropping the partial tail. A
/// refill that yields zero records signals terminal end-of-stream.
///
/// # Examples
///
/// ```rust
/// use kmerbin::{BinaryRecordReader, BinaryRecordWriter, Record};
/// use std::io::Cursor;
///
/// # fn main() -> kmerbin::Result<()> {
/// let mut writer = BinaryRecordWriter::new(Vec::new());
/// writer.write_record(Record::new(107u64, 5u32))?;
/// writer.finish()?;
///
/// let mut reader = BinaryRecordReader::new(Cursor::new(writer.into_inner()));
/// let mut record = Record::<u64, u32>::default();
/// assert!(reader.read_next(&mut record)?);
/// assert_eq!(record, Record::new(107, 5));
/// assert!(!reader.read_next(&mut record)?);
/// # Ok(())
/// # }
/// ```
pub struct BinaryRecordReader<R: Read, K: PackedInt, V: PackedInt> {
    /// Inner reader providing the data stream
    inner: R,

    /// Buffer holding one batch of encoded records
    buffer: Vec<u8>,

    /// Current record position in the buffer (in records, not bytes)
    pos: usize,

    /// Number of records currently buffered
    cap: usize,

    /// Total number of bytes read from the inner reader
    bytes_read: usize,

    /// Flag indicating end of stream has been reached (terminal)
    eof: bool,

    _marker: std::marker::PhantomData<(K, V)>,
}

impl<R: Read, K: PackedInt, V: PackedInt> BinaryRecordReader<R, K, V> {
    /// Creates a reader with the default batch capacity of
    /// [`BATCH_RECORDS`](crate::BATCH_RECORDS) records.
    pub fn new(inner: R) -> Self {
        Self::with_capacity(inner, BATCH_RECORDS)
    }

    /// Creates a reader with an explicit batch capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(inner: R, capacity: usize) -> Self {
        assert!(capacity > 0, "batch capacity must be non-zero");
        Self {
            inner,
            buffer: vec![0u8; capacity * Record::<K, V>::WIRE_SIZE],
            pos: 0,
            cap: 0,
            bytes_read: 0,
            eof: false,
            _marker: std::marker::PhantomData,
        }
    }

    /// Total bytes consumed from the inner reader so far.
    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    /// Refills the buffer with one bulk read of up to the batch capacity.
    ///
    /// Returns `Ok(true)` if at least one record was read, `Ok(false)` on
    /// end of stream.
    ///
    /// # Errors
    ///
    /// - `Io` when the underlying read fails.
    /// - `TruncatedRecord` when the refill is not a whole number of records.
    fn fill(&mut self) -> crate::Result<bool> {
        let mut read = 0;
        while read < self.buffer.len() {
            match self.inner.read(&mut self.buffer[read..]) {
                Ok(0) => break,
                Ok(n) => read += n,
                Err(e) => return Err(e.into()),
            }
        }
        let size = Record::<K, V>::WIRE_SIZE;
        if read % size != 0 {
            let non_rem = read - read % size;
            return Err(KmerBinError::TruncatedRecord {
                pos: self.bytes_read + non_rem,
            });
        }
        self.pos = 0;
        self.cap = read / size;
        self.bytes_read += read;
        Ok(read > 0)
    }

    /// Copies the next record into `out`.
    ///
    /// Returns `Ok(true)` and advances on success; `Ok(false)` on terminal
    /// end of stream (`out` is left untouched). Records always surface as
    /// whole units.
    pub fn read_next(&mut self, out: &mut Record<K, V>) -> crate::Result<bool> {
        if self.eof {
            return Ok(false);
        }
        if self.pos >= self.cap {
            if !self.fill()? {
                self.eof = true;
                return Ok(false);
            }
        }
        let size = Record::<K, V>::WIRE_SIZE;
        *out = Record::read_le(&self.buffer[self.pos * size..]);
        self.pos += 1;
        Ok(true)
    }
}

impl<R: Read, K: PackedInt, V: PackedInt> Iterator for BinaryRecordReader<R, K, V> {
    type Item = crate::Result<Record<K, V>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = Record::default();
        match self.read_next(&mut record) {
            Ok(true) => Some(Ok(record)),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl<K: PackedInt, V: PackedInt> BinaryRecordReader<BoxedReader, K, V> {
    /// Opens a binary container file, stripping one trailing
    /// newline/carriage-return from the path string first.
    ///
    /// # Errors
    ///
    /// Returns `Open` with the offending path if the file cannot be opened.
    pub fn from_path<P: AsRef<str>>(path: P) -> crate::Result<Self> {
        let file = super::open_read(path.as_ref())?;
        Ok(Self::new(Box::new(BufReader::new(file))))
    }
}

/// Loads an entire binary container into memory at once.
///
/// The fastest path when all records are needed in memory. The container
/// size must be an exact multiple of the record size.
///
/// # Errors
///
/// - `Open` when the file cannot be opened.
/// - `InvalidContainerSize` when the file is not a whole number of records.
///
/// # Examples
///
/// ```rust,no_run
/// use kmerbin::load_to_vec;
///
/// # fn main() -> kmerbin::Result<()> {
/// let records = load_to_vec::<_, u64, u32>("shard_00.kmc")?;
/// println!("loaded {} records", records.len());
/// # Ok(())
/// # }
/// ```
pub fn load_to_vec<P: AsRef<str>, K: PackedInt, V: PackedInt>(
    path: P,
) -> crate::Result<Vec<Record<K, V>>> {
    let mut file = super::open_read(path.as_ref())?;
    let expected = file.metadata()?.len() as usize;

    let mut bytes = Vec::with_capacity(expected);
    file.read_to_end(&mut bytes)?;

    let size = Record::<K, V>::WIRE_SIZE;
    if bytes.len() % size != 0 {
        return Err(KmerBinError::InvalidContainerSize);
    }

    let mut records = Vec::with_capacity(bytes.len() / size);
    for chunk in bytes.chunks_exact(size) {
        records.push(Record::read_le(chunk));
    }
    Ok(records)
}
