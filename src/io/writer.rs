//! Buffered binary output of fixed-size k-mer records.

use std::io::{BufWriter, Write};

use crate::{PackedInt, Record};

/// Records per bulk write.
pub const BATCH_RECORDS: usize = 16;

pub type BoxedWriter = Box<dyn Write + Send>;

/// Buffered writer for flat binary record containers.
///
/// Records accumulate in a fixed-capacity batch; when the batch reaches
/// capacity, all of it goes to the sink in one bulk write and the batch
/// resets. There is no per-record flush - batching amortizes I/O cost over
/// large record counts. The container is a bare sequence of records with no
/// header or footer.
///
/// [`finish`](Self::finish) flushes the partial batch and the sink; it is
/// idempotent and also runs on drop (with errors ignored there, so explicit
/// calls are recommended).
///
/// # Examples
///
/// ```rust
/// use kmerbin::{BinaryRecordWriter, Record};
///
/// # fn main() -> kmerbin::Result<()> {
/// let mut writer = BinaryRecordWriter::new(Vec::new());
/// writer.write_record(Record::new(107u64, 5u32))?;
/// writer.finish()?;
///
/// let buffer = writer.into_inner();
/// assert_eq!(buffer.len(), 12); // 8-byte key + 4-byte value
/// # Ok(())
/// # }
/// ```
pub struct BinaryRecordWriter<W: Write, K: PackedInt, V: PackedInt> {
    /// Inner writer providing the data sink
    inner: W,

    /// Records awaiting the next bulk write, in insertion order
    batch: Vec<Record<K, V>>,

    /// Batch capacity in records
    capacity: usize,

    /// Encoding scratch for one bulk write
    scratch: Vec<u8>,

    /// Number of records written so far
    records_written: u64,

    /// Set once finish() has run
    finished: bool,
}

impl<W: Write, K: PackedInt, V: PackedInt> BinaryRecordWriter<W, K, V> {
    /// Creates a writer with the default batch capacity of
    /// [`BATCH_RECORDS`] records.
    pub fn new(inner: W) -> Self {
        Self::with_capacity(inner, BATCH_RECORDS)
    }

    /// Creates a writer with an explicit batch capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(inner: W, capacity: usize) -> Self {
        assert!(capacity > 0, "batch capacity must be non-zero");
        Self {
            inner,
            batch: Vec::with_capacity(capacity),
            capacity,
            scratch: vec![0u8; capacity * Record::<K, V>::WIRE_SIZE],
            records_written: 0,
            finished: false,
        }
    }

    /// Returns the number of records written so far.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Encodes the batch and writes it to the sink in one bulk write.
    fn flush_batch(&mut self) -> crate::Result<()> {
        if self.batch.is_empty() {
            return Ok(());
        }
        let size = Record::<K, V>::WIRE_SIZE;
        for (i, record) in self.batch.iter().enumerate() {
            record.write_le(&mut self.scratch[i * size..(i + 1) * size]);
        }
        self.inner.write_all(&self.scratch[..self.batch.len() * size])?;
        self.batch.clear();
        Ok(())
    }

    /// Appends one record to the batch, bulk-writing when it fills.
    pub fn write_record(&mut self, record: Record<K, V>) -> crate::Result<()> {
        self.batch.push(record);
        self.records_written += 1;
        if self.batch.len() == self.capacity {
            self.flush_batch()?;
        }
        Ok(())
    }

    /// Writes a slice of records in order.
    pub fn write_batch(&mut self, records: &[Record<K, V>]) -> crate::Result<()> {
        for record in records {
            self.write_record(*record)?;
        }
        Ok(())
    }

    /// Writes records from an iterator in order.
    pub fn write_iter<I>(&mut self, records: I) -> crate::Result<()>
    where
        I: Iterator<Item = Record<K, V>>,
    {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Flushes the remaining partial batch in one bulk write and flushes the
    /// sink.
    ///
    /// Safe to call with an empty batch, and idempotent: a second call is a
    /// no-op, not an error.
    pub fn finish(&mut self) -> crate::Result<()> {
        if self.finished {
            return Ok(());
        }
        self.flush_batch()?;
        self.inner.flush()?;
        self.finished = true;
        Ok(())
    }

    /// Consumes the writer and returns the underlying sink.
    ///
    /// The writer should be finished before calling this.
    pub fn into_inner(self) -> W {
        use std::mem::ManuallyDrop;
        let mut manual = ManuallyDrop::new(self);
        // reclaim the heap buffers; only the sink leaves this scope
        drop(std::mem::take(&mut manual.batch));
        drop(std::mem::take(&mut manual.scratch));
        unsafe { std::ptr::read(&manual.inner) }
    }
}

/// Flushes pending records when dropped.
///
/// Errors during the automatic flush are ignored, so explicit `finish()`
/// calls are recommended for proper error handling.
impl<W: Write, K: PackedInt, V: PackedInt> Drop for BinaryRecordWriter<W, K, V> {
    fn drop(&mut self) {
        self.finish().ok();
    }
}

impl<K: PackedInt, V: PackedInt> BinaryRecordWriter<BoxedWriter, K, V> {
    /// Creates (or truncates) a file and writes records to it.
    ///
    /// One trailing newline/carriage-return is stripped from the path string
    /// before the file is created.
    ///
    /// # Errors
    ///
    /// Returns `Open` with the offending path if the file cannot be created.
    pub fn from_path<P: AsRef<str>>(path: P) -> crate::Result<Self> {
        let file = super::create_write(path.as_ref())?;
        Ok(Self::new(Box::new(BufWriter::new(file))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestWriter = BinaryRecordWriter<Vec<u8>, u64, u32>;
    const SIZE: usize = Record::<u64, u32>::WIRE_SIZE;

    #[test]
    fn test_writer_creation() {
        let writer = TestWriter::new(Vec::new());
        assert_eq!(writer.records_written(), 0);

        let buffer = writer.into_inner();
        assert!(buffer.is_empty()); // no header, no magic
    }

    #[test]
    fn test_single_record_write() {
        let mut writer = TestWriter::new(Vec::new());
        writer.write_record(Record::new(107, 5)).unwrap();
        assert_eq!(writer.records_written(), 1);

        writer.finish().unwrap();
        let buffer = writer.into_inner();
        assert_eq!(buffer.len(), SIZE);
    }

    #[test]
    fn test_no_flush_below_capacity() {
        let mut writer = TestWriter::new(Vec::new());
        for i in 0..BATCH_RECORDS - 1 {
            writer.write_record(Record::new(i as u64, 0)).unwrap();
        }
        // nothing reaches the sink until the batch fills
        assert!(writer.inner.is_empty());

        writer.write_record(Record::new(99, 0)).unwrap();
        assert_eq!(writer.inner.len(), BATCH_RECORDS * SIZE);
    }

    #[test]
    fn test_bulk_write_at_capacity() {
        let mut writer = TestWriter::with_capacity(Vec::new(), 4);
        for i in 0..9 {
            writer.write_record(Record::new(i, i as u32)).unwrap();
        }
        // two full batches went out, one record is still pending
        assert_eq!(writer.inner.len(), 8 * SIZE);

        writer.finish().unwrap();
        assert_eq!(writer.inner.len(), 9 * SIZE);
    }

    #[test]
    fn test_finish_empty() {
        let mut writer = TestWriter::new(Vec::new());
        writer.finish().unwrap();
        let buffer = writer.into_inner();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_finish_idempotent() {
        let mut writer = TestWriter::new(Vec::new());
        writer.write_record(Record::new(1, 2)).unwrap();
        writer.finish().unwrap();
        // second finish is a no-op, not an error
        writer.finish().unwrap();
        assert_eq!(writer.into_inner().len(), SIZE);
    }

    #[test]
    fn test_write_batch_and_iter() {
        let mut writer = TestWriter::new(Vec::new());

        let records = vec![Record::new(1, 2), Record::new(3, 4)];
        writer.write_batch(&records).unwrap();
        assert_eq!(writer.records_written(), 2);

        writer.write_iter((0..5).map(|i| Record::new(i, i as u32))).unwrap();
        assert_eq!(writer.records_written(), 7);

        writer.finish().unwrap();
        assert_eq!(writer.into_inner().len(), 7 * SIZE);
    }

    #[test]
    fn test_record_order_preserved() {
        let mut writer = TestWriter::with_capacity(Vec::new(), 4);
        for i in 0..10u64 {
            writer.write_record(Record::new(i, i as u32)).unwrap();
        }
        writer.finish().unwrap();

        let buffer = writer.into_inner();
        for i in 0..10usize {
            let record = Record::<u64, u32>::read_le(&buffer[i * SIZE..]);
            assert_eq!(record, Record::new(i as u64, i as u32));
        }
    }

    #[test]
    fn test_drop_flushes() {
        // sink survives the writer through a shared Vec is not possible with
        // plain Vec, so write through a file instead
        let path = std::env::temp_dir()
            .join(format!("kmerbin_drop_{}.kmc", std::process::id()))
            .to_string_lossy()
            .into_owned();

        {
            let mut writer = BinaryRecordWriter::<_, u64, u32>::from_path(&path).unwrap();
            writer.write_record(Record::new(1, 2)).unwrap();
            // dropped without finish()
        }

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), SIZE);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_from_path_open_failure() {
        let result = BinaryRecordWriter::<_, u64, u32>::from_path("/no/such/dir/out.kmc");
        assert!(matches!(
            result,
            Err(crate::KmerBinError::Open { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "batch capacity")]
    fn test_zero_capacity_panics() {
        let _ = TestWriter::with_capacity(Vec::new(), 0);
    }
}
