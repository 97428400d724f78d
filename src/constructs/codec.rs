use crate::{KmerBinError, PackedInt, Record};
use std::marker::PhantomData;

/// 256-entry symbol table: ASCII -> 2-bit value (A=0, C=1, G=2, T=3),
/// 0xFF for everything else. Uppercase only, matching the text format.
static SYMBOL_TABLE: [u8; 256] = {
    const X: u8 = 0xFF;
    let mut t = [X; 256];
    t[b'A' as usize] = 0;
    t[b'C' as usize] = 1;
    t[b'G' as usize] = 2;
    t[b'T' as usize] = 3;
    t
};

#[inline]
fn symbol_value(b: u8) -> Option<u8> {
    let v = SYMBOL_TABLE[b as usize];
    if v <= 3 {
        Some(v)
    } else {
        None
    }
}

/// Conversion contract from a text line to a packed (key, value) pair.
///
/// Callers hold the codec behind an abstract handle (see
/// [`TextRecordReader`](crate::TextRecordReader)) so that new encodings can
/// be added without touching any reader or writer code.
pub trait KeyCodec<K: PackedInt, V: PackedInt>: Send {
    /// Converts one line to a (key, value) pair.
    fn convert(&self, line: &str) -> crate::Result<(K, V)>;

    /// Converts one line to a key only, skipping value parsing.
    ///
    /// Used when only key-set construction matters; the value token is
    /// neither parsed nor required to be present.
    fn convert_key(&self, line: &str) -> crate::Result<K>;

    /// Convenience wrapper producing a [`Record`].
    fn convert_record(&self, line: &str) -> crate::Result<Record<K, V>> {
        let (key, value) = self.convert(line)?;
        Ok(Record::new(key, value))
    }
}

/// Codec for constant-length k-mers.
///
/// Each k-mer is a string of `kmer_length` symbols over {A, C, G, T},
/// read as a base-4 number with the most-significant symbol first
/// (A=0, C=1, G=2, T=3). The text form is `<ACGT run><separator><count>`.
///
/// The run length is not enforced against `kmer_length`: the scan packs
/// every leading symbol, so a longer run produces a key wider than
/// `2 * kmer_length` bits, and symbols packed beyond the width of `K`
/// shift out from the most-significant end.
///
/// # Examples
///
/// ```rust
/// use kmerbin::{ConstantLengthKmerCodec, KeyCodec};
///
/// # fn main() -> kmerbin::Result<()> {
/// let codec = ConstantLengthKmerCodec::<u64, u32>::new(4)?;
/// let (key, value) = codec.convert("ACGT 12")?;
/// assert_eq!(key, 0b00_01_10_11);
/// assert_eq!(value, 12);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConstantLengthKmerCodec<K: PackedInt, V: PackedInt> {
    kmer_length: u8,
    _marker: PhantomData<(K, V)>,
}

impl<K: PackedInt, V: PackedInt> ConstantLengthKmerCodec<K, V> {
    /// Creates a codec for k-mers of the given length.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKmerLength` when `2 * kmer_length` exceeds the bit
    /// width of the key type `K`.
    pub fn new(kmer_length: u8) -> crate::Result<Self> {
        let needed = 2 * kmer_length as u32;
        if needed > K::BITS {
            return Err(KmerBinError::InvalidKmerLength {
                kmer_length,
                needed,
                available: K::BITS,
            });
        }
        Ok(Self {
            kmer_length,
            _marker: PhantomData,
        })
    }

    pub fn kmer_length(&self) -> u8 {
        self.kmer_length
    }

    /// Packs the leading A/C/G/T run of `line`, returning the key and the
    /// byte offset of the first non-symbol character.
    fn pack_symbols(&self, line: &str) -> crate::Result<(K, usize)> {
        let bytes = line.as_bytes();
        let mut key = K::ZERO;
        let mut idx = 0;
        while idx < bytes.len() {
            match symbol_value(bytes[idx]) {
                Some(v) => {
                    key = (key << 2) | K::from_symbol(v);
                    idx += 1;
                }
                None => break,
            }
        }
        if idx == 0 {
            return Err(KmerBinError::InvalidSymbol {
                line: line.to_string(),
            });
        }
        Ok((key, idx))
    }
}

impl<K: PackedInt, V: PackedInt> KeyCodec<K, V> for ConstantLengthKmerCodec<K, V> {
    fn convert(&self, line: &str) -> crate::Result<(K, V)> {
        let (key, idx) = self.pack_symbols(line)?;

        // value token: skip ASCII whitespace, take the maximal digit run
        let rest = line[idx..].trim_start_matches(|c: char| c.is_ascii_whitespace());
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let digits = &rest[..end];
        if digits.is_empty() {
            return Err(KmerBinError::InvalidValue {
                line: line.to_string(),
            });
        }
        let value = digits.parse::<V>().map_err(|_| KmerBinError::InvalidValue {
            line: line.to_string(),
        })?;

        Ok((key, value))
    }

    fn convert_key(&self, line: &str) -> crate::Result<K> {
        let (key, _) = self.pack_symbols(line)?;
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> ConstantLengthKmerCodec<u64, u32> {
        ConstantLengthKmerCodec::new(4).unwrap()
    }

    #[test]
    fn test_known_encoding() {
        // ACGT = 0*64 + 1*16 + 2*4 + 3 = 27
        let (key, value) = codec().convert("ACGT 12").unwrap();
        assert_eq!(key, 27);
        assert_eq!(value, 12);
    }

    #[test]
    fn test_most_significant_symbol_first() {
        let (key, _) = codec().convert("TAAA 1").unwrap();
        assert_eq!(key, 3 << 6);

        let (key, _) = codec().convert("AAAT 1").unwrap();
        assert_eq!(key, 3);
    }

    #[test]
    fn test_positional_sum() {
        // key = sum of value(s_i) * 4^(L-1-i)
        let line = "GATC 9";
        let (key, value) = codec().convert(line).unwrap();
        assert_eq!(key, 2 * 64 + 3 * 4 + 1); // A contributes 0 at 4^2
        assert_eq!(value, 9);
    }

    #[test]
    fn test_invalid_leading_symbol() {
        let result = codec().convert("NACGT 12");
        assert!(matches!(result, Err(KmerBinError::InvalidSymbol { .. })));

        // lowercase is not part of the alphabet
        let result = codec().convert("acgt 12");
        assert!(matches!(result, Err(KmerBinError::InvalidSymbol { .. })));

        let result = codec().convert("");
        assert!(matches!(result, Err(KmerBinError::InvalidSymbol { .. })));
    }

    #[test]
    fn test_scan_stops_at_first_invalid_symbol() {
        // the N ends the run; "CGT" is junk before the value and is skipped
        // by neither branch, so the value parse must fail
        let result = codec().convert("ACNGT 12");
        assert!(matches!(result, Err(KmerBinError::InvalidValue { .. })));

        // separator directly after the run works
        let (key, value) = codec().convert("AC 7").unwrap();
        assert_eq!(key, 1);
        assert_eq!(value, 7);
    }

    #[test]
    fn test_missing_value() {
        let result = codec().convert("ACGT");
        assert!(matches!(result, Err(KmerBinError::InvalidValue { .. })));

        let result = codec().convert("ACGT   ");
        assert!(matches!(result, Err(KmerBinError::InvalidValue { .. })));

        let result = codec().convert("ACGT x");
        assert!(matches!(result, Err(KmerBinError::InvalidValue { .. })));
    }

    #[test]
    fn test_value_overflow_rejected() {
        let codec = ConstantLengthKmerCodec::<u64, u16>::new(4).unwrap();
        let result = codec.convert("ACGT 70000");
        assert!(matches!(result, Err(KmerBinError::InvalidValue { .. })));
    }

    #[test]
    fn test_tab_separator_and_trailing_junk() {
        let (key, value) = codec().convert("ACGT\t12").unwrap();
        assert_eq!(key, 27);
        assert_eq!(value, 12);

        // digits run ends at the first non-digit
        let (_, value) = codec().convert("ACGT 12 extra").unwrap();
        assert_eq!(value, 12);
    }

    #[test]
    fn test_separator_is_ascii_whitespace_only() {
        // U+00A0 (no-break space) is whitespace but not ASCII; it must
        // not be skipped, so no digit run follows the k-mer
        let result = codec().convert("ACGT\u{A0}12");
        assert!(matches!(result, Err(KmerBinError::InvalidValue { .. })));

        let (key, value) = codec().convert("ACGT \t 12").unwrap();
        assert_eq!(key, 27);
        assert_eq!(value, 12);
    }

    #[test]
    fn test_run_longer_than_kmer_length() {
        // scan length is not enforced: 5 symbols against L=4 still pack
        let (key, value) = codec().convert("CAAAA 1").unwrap();
        assert_eq!(key, 1 << 8);
        assert_eq!(value, 1);

        // once the run exceeds the key width, the leading symbols shift
        // out from the top: 9 symbols into a 16-bit key keep the last 8
        let codec = ConstantLengthKmerCodec::<u16, u32>::new(8).unwrap();
        let (key, _) = codec.convert("TAAAAAAAA 1").unwrap();
        assert_eq!(key, 0);
    }

    #[test]
    fn test_convert_key_skips_value() {
        // no value token required in key-only mode
        let key = codec().convert_key("ACGT").unwrap();
        assert_eq!(key, 27);

        let result = codec().convert_key("ZZZ");
        assert!(matches!(result, Err(KmerBinError::InvalidSymbol { .. })));
    }

    #[test]
    fn test_convert_record() {
        let record = codec().convert_record("ACGT 12").unwrap();
        assert_eq!(record, Record::new(27u64, 12u32));
    }

    #[test]
    fn test_kmer_length_validation() {
        // 2*16 = 32 bits fits u32, 2*17 does not
        assert!(ConstantLengthKmerCodec::<u32, u32>::new(16).is_ok());
        let result = ConstantLengthKmerCodec::<u32, u32>::new(17);
        assert!(matches!(
            result,
            Err(KmerBinError::InvalidKmerLength {
                kmer_length: 17,
                needed: 34,
                available: 32,
            })
        ));

        assert!(ConstantLengthKmerCodec::<u64, u32>::new(32).is_ok());
        assert!(ConstantLengthKmerCodec::<u64, u32>::new(33).is_err());
        assert!(ConstantLengthKmerCodec::<u128, u32>::new(64).is_ok());
    }

    #[test]
    fn test_codec_as_trait_object() {
        let codec: Box<dyn KeyCodec<u64, u32>> = Box::new(codec());
        let (key, value) = codec.convert("TTTT 3").unwrap();
        assert_eq!(key, 255);
        assert_eq!(value, 3);
    }
}
