//! # kmerbin - Compact Binary Encoding and Sharded I/O for K-mer Records
//!
//! `kmerbin` is a Rust library for packing fixed-length genomic k-mers into
//! compact integer keys, partitioning those keys into shard groups by
//! high-bit prefix, and streaming fixed-size key/value records to and from
//! raw binary containers with batched I/O. It is the storage-layer building
//! block of a larger k-mer counting/assembly pipeline.
//!
//! ## Format Specification
//!
//! ### Key packing
//!
//! A k-mer of length L over {A, C, G, T} is read as a base-4 number with the
//! most-significant symbol first, 2 bits per symbol (A=0, C=1, G=2, T=3),
//! into an unsigned integer of at least 2L bits. Key width is chosen per
//! configuration through the [`PackedInt`] trait (u16/u32/u64/u128).
//!
//! ### Binary container
//!
//! A container is a flat sequence of fixed-size records, each exactly
//! `size_of(Key) + size_of(Value)` bytes: the key then the value, both
//! little-endian, with no padding, header, magic or checksum. Key and value
//! widths are agreed out-of-band by configuration shared with the rest of
//! the pipeline - an explicit limitation of the format.
//!
//! ### Text input
//!
//! One record per line: `<ACGT run><separator><count>`, trailing newline
//! optional. A line not beginning with A/C/G/T is rejected; lines longer
//! than [`MAX_LINE_LEN`] bytes fail explicitly.
//!
//! ## Basic Usage
//!
//! ### Writing and reading records
//!
//! ```rust
//! use kmerbin::{BinaryRecordReader, BinaryRecordWriter, Record};
//! use std::io::Cursor;
//!
//! # fn main() -> kmerbin::Result<()> {
//! let records = vec![
//!     Record::new(0x1100u64, 3u32),
//!     Record::new(0x1101u64, 7u32),
//! ];
//!
//! // Write to a buffer (records are batched, finish flushes the tail)
//! let mut writer = BinaryRecordWriter::new(Vec::new());
//! writer.write_batch(&records)?;
//! writer.finish()?;
//!
//! // Read them back in the exact order written
//! let reader = BinaryRecordReader::new(Cursor::new(writer.into_inner()));
//! let read: Vec<_> = reader.collect::<kmerbin::Result<Vec<_>>>()?;
//! assert_eq!(records, read);
//! # Ok(())
//! # }
//! ```
//!
//! ### Parsing text and sharding by group
//!
//! ```rust
//! use kmerbin::{ConstantLengthKmerCodec, GroupPartitioner, KeyCodec};
//!
//! # fn main() -> kmerbin::Result<()> {
//! let codec = ConstantLengthKmerCodec::<u64, u32>::new(4)?;
//! let partitioner = GroupPartitioner::<u64>::new(4, 2)?;
//!
//! let (key, count) = codec.convert("CGGT 12")?;
//! assert_eq!(key, 107);
//! assert_eq!(count, 12);
//!
//! // top 2 bits route the record to shard 1
//! let (grp, key_in_group) = partitioner.split(key);
//! assert_eq!((grp, key_in_group), (1, 43));
//!
//! // shards recombine losslessly
//! assert_eq!(partitioner.combine(grp, key_in_group), 107);
//! # Ok(())
//! # }
//! ```
//!
//! ### File I/O
//!
//! ```rust,no_run
//! use kmerbin::{BinaryRecordReader, ConstantLengthKmerCodec, TextRecordReader};
//!
//! # fn main() -> kmerbin::Result<()> {
//! // Text input; one trailing newline in the path string is stripped
//! let codec = ConstantLengthKmerCodec::<u64, u32>::new(21)?;
//! let reader = TextRecordReader::from_path("counts.txt\n", Box::new(codec))?;
//! for result in reader {
//!     let record = result?;
//!     // route the record to its shard...
//! }
//!
//! // Binary shard back in
//! let reader = BinaryRecordReader::<_, u64, u32>::from_path("shard_00.kmc")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, KmerBinError>`. Failures are typed per
//! kind (open, parse, overlong line, truncated record) and nothing is
//! retried internally; the pipeline layer decides skip-vs-abort policy.
//!
//! ```rust
//! use kmerbin::{ConstantLengthKmerCodec, KeyCodec, KmerBinError};
//!
//! # fn main() {
//! let codec = ConstantLengthKmerCodec::<u64, u32>::new(4).unwrap();
//! match codec.convert("N 1") {
//!     Err(KmerBinError::InvalidSymbol { line }) => {
//!         println!("rejected: {}", line);
//!     }
//!     Err(e) => println!("other error: {}", e),
//!     Ok(_) => unreachable!(),
//! }
//! # }
//! ```

mod constructs;
mod error;
mod human;
mod io;

pub use constructs::{ConstantLengthKmerCodec, GroupPartitioner, KeyCodec, PackedInt, Record};
pub use error::{KmerBinError, Result};
pub use human::human;
pub use io::{
    load_to_vec, BinaryRecordReader, BinaryRecordWriter, BoxedLineReader, BoxedReader,
    BoxedWriter, MmapReader, TextRecordReader, BATCH_RECORDS, MAX_LINE_LEN,
};
