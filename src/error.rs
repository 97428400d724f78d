//! Error handling for the kmerbin library.
//!
//! This module defines all error types that can occur during k-mer record
//! operations, including I/O errors, text parse errors, and configuration
//! validation errors.

use thiserror::Error;

/// A specialized `Result` type for kmerbin operations.
///
/// This type is used throughout the kmerbin library for any operation that
/// can fail. It's equivalent to `std::result::Result<T, KmerBinError>`.
///
/// # Examples
///
/// ```rust
/// use kmerbin::{GroupPartitioner, Result};
///
/// fn build_partitioner() -> Result<GroupPartitioner<u64>> {
///     GroupPartitioner::new(21, 10)
/// }
/// ```
pub type Result<T> = std::result::Result<T, KmerBinError>;

/// Error types for kmerbin operations.
///
/// This enum covers all possible error conditions that can occur when parsing
/// text records, reading or writing binary containers, or constructing codecs
/// and partitioners. Each variant provides specific context about what went
/// wrong.
///
/// Nothing is retried internally: every failure surfaces to the caller, and
/// the pipeline layer decides skip-vs-abort policy per failure kind.
///
/// # Examples
///
/// ```rust
/// use kmerbin::{ConstantLengthKmerCodec, KeyCodec, KmerBinError};
///
/// let codec = ConstantLengthKmerCodec::<u64, u32>::new(4).unwrap();
///
/// match codec.convert("NACGT 12") {
///     Err(KmerBinError::InvalidSymbol { line }) => {
///         println!("Rejected line: {}", line);
///     }
///     Err(e) => println!("Other error: {}", e),
///     Ok(_) => unreachable!(),
/// }
/// ```
#[derive(Error, Debug)]
pub enum KmerBinError {
    /// I/O error from the underlying reader or writer.
    ///
    /// This wraps standard I/O errors that can occur when reading from or
    /// writing to files or other I/O sources.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// A file could not be opened at the given (normalized) path.
    ///
    /// Open failures are reported immediately at construction time, with the
    /// offending path attached, rather than deferred to the first read or
    /// write.
    #[error("failed to open {path}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A text line does not begin with one of A/C/G/T.
    ///
    /// Lines with an invalid leading symbol are rejected outright; a zero key
    /// is never produced for invalid input.
    #[error("invalid leading symbol (expected A/C/G/T) in line: {line:?}")]
    InvalidSymbol { line: String },

    /// The value token of a text line is missing or not a decimal integer.
    #[error("missing or malformed count value in line: {line:?}")]
    InvalidValue { line: String },

    /// A text line exceeds the fixed input line-length bound.
    ///
    /// Overlong lines fail explicitly instead of being silently truncated.
    #[error("line exceeds the maximum length of {max} bytes")]
    LineOverflow { max: usize },

    /// Incomplete record data at the specified byte position.
    ///
    /// This occurs when a binary stream ends in the middle of a record,
    /// indicating the container was truncated or corrupted during writing.
    #[error("truncated record at position {pos}")]
    TruncatedRecord { pos: usize },

    /// Container size is not a multiple of the record size.
    ///
    /// Reported by the bulk loaders, which see the whole container at once
    /// rather than a stream position.
    #[error("invalid container size - not a multiple of record size")]
    InvalidContainerSize,

    /// Record index is out of bounds for random access.
    #[error("invalid index ({idx}) - must be less than {max}")]
    InvalidIndex { idx: usize, max: usize },

    /// The configured k-mer length does not fit the chosen key width.
    ///
    /// A k-mer of length L needs 2L bits; configurations where the key type
    /// cannot hold them are rejected at construction.
    #[error(
        "invalid k-mer length {kmer_length}: needs {needed} bits but key type holds {available}"
    )]
    InvalidKmerLength {
        kmer_length: u8,
        needed: u32,
        available: u32,
    },

    /// The configured split-bit count is out of range.
    ///
    /// Group ids are `u32`, so `split_bits` must satisfy
    /// `split_bits <= 2 * kmer_length` and `split_bits <= 32`.
    #[error("invalid split bits {split_bits} for k-mer length {kmer_length}")]
    InvalidSplitBits { split_bits: u8, kmer_length: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_error_display_messages() {
        let err = KmerBinError::Open {
            path: "shard_07.kmc".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let display = format!("{}", err);
        assert!(display.contains("shard_07.kmc"));

        let err = KmerBinError::InvalidSymbol {
            line: "XACGT 3".to_string(),
        };
        let display = format!("{}", err);
        assert!(display.contains("XACGT 3"));
        assert!(display.contains("A/C/G/T"));

        let err = KmerBinError::InvalidValue {
            line: "ACGT".to_string(),
        };
        let display = format!("{}", err);
        assert!(display.contains("ACGT"));

        let err = KmerBinError::LineOverflow { max: 1024 };
        let display = format!("{}", err);
        assert!(display.contains("1024"));

        let err = KmerBinError::TruncatedRecord { pos: 4096 };
        let display = format!("{}", err);
        assert!(display.contains("4096"));

        let err = KmerBinError::InvalidContainerSize;
        let display = format!("{}", err);
        assert!(display.contains("not a multiple"));

        let err = KmerBinError::InvalidIndex { idx: 100, max: 50 };
        let display = format!("{}", err);
        assert!(display.contains("100"));
        assert!(display.contains("50"));

        let err = KmerBinError::InvalidKmerLength {
            kmer_length: 33,
            needed: 66,
            available: 64,
        };
        let display = format!("{}", err);
        assert!(display.contains("33"));
        assert!(display.contains("66"));
        assert!(display.contains("64"));

        let err = KmerBinError::InvalidSplitBits {
            split_bits: 50,
            kmer_length: 21,
        };
        let display = format!("{}", err);
        assert!(display.contains("50"));
        assert!(display.contains("21"));
    }

    #[test]
    fn test_error_debug() {
        let err = KmerBinError::TruncatedRecord { pos: 17 };
        let debug = format!("{:?}", err);
        assert!(debug.contains("TruncatedRecord"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: KmerBinError = io_err.into();

        match err {
            KmerBinError::Io(inner) => {
                assert_eq!(inner.kind(), std::io::ErrorKind::NotFound);
            }
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_source_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Access denied");
        let err = KmerBinError::Open {
            path: "counts.txt".to_string(),
            source: io_err,
        };

        let source = err.source();
        assert!(source.is_some());

        if let Some(source) = source {
            let io_source = source.downcast_ref::<std::io::Error>();
            assert!(io_source.is_some());
            assert_eq!(
                io_source.unwrap().kind(),
                std::io::ErrorKind::PermissionDenied
            );
        }
    }

    #[test]
    fn test_error_send_sync() {
        fn is_send<T: Send>() {}
        fn is_sync<T: Sync>() {}

        is_send::<KmerBinError>();
        is_sync::<KmerBinError>();
    }

    #[test]
    fn test_result_type_alias() {
        fn test_function() -> Result<i32> {
            Ok(42)
        }

        fn failing_function() -> Result<i32> {
            Err(KmerBinError::InvalidContainerSize)
        }

        assert_eq!(test_function().unwrap(), 42);
        assert!(failing_function().is_err());
    }
}
