mod mmap;
mod reader;
mod text;
mod writer;

pub use mmap::MmapReader;
pub use reader::{load_to_vec, BinaryRecordReader, BoxedReader};
pub use text::{BoxedLineReader, TextRecordReader, MAX_LINE_LEN};
pub use writer::{BinaryRecordWriter, BoxedWriter, BATCH_RECORDS};

use crate::KmerBinError;
use std::fs::File;

/// Strips exactly one trailing newline or carriage return from a path
/// string. No other sanitization is performed.
pub(crate) fn normalize_path(path: &str) -> &str {
    path.strip_suffix('\n')
        .or_else(|| path.strip_suffix('\r'))
        .unwrap_or(path)
}

/// Opens a file for reading, failing fast with the normalized path attached.
pub(crate) fn open_read(path: &str) -> crate::Result<File> {
    let path = normalize_path(path);
    File::open(path).map_err(|source| KmerBinError::Open {
        path: path.to_string(),
        source,
    })
}

/// Creates (or truncates) a file for writing, failing fast with the
/// normalized path attached.
pub(crate) fn create_write(path: &str) -> crate::Result<File> {
    let path = normalize_path(path);
    File::create(path).map_err(|source| KmerBinError::Open {
        path: path.to_string(),
        source,
    })
}
