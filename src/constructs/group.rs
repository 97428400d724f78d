use crate::{KmerBinError, PackedInt};
use std::marker::PhantomData;

/// Splits keys into (group id, key-in-group) pairs by their highest bits.
///
/// A key of `2 * kmer_length` bits is divided into the top `split_bits` bits
/// (the group id, used to route the record to a shard) and the remaining low
/// bits (the key within that shard). The mapping is a bijection between the
/// full key space and group x remainder space, so shards can be recombined
/// losslessly. Pure bit arithmetic, no state.
///
/// # Examples
///
/// ```rust
/// use kmerbin::GroupPartitioner;
///
/// # fn main() -> kmerbin::Result<()> {
/// // L=4, B=2: key 107 = 0b01_101011
/// let partitioner = GroupPartitioner::<u64>::new(4, 2)?;
/// let (grp, key_in_group) = partitioner.split(107);
/// assert_eq!((grp, key_in_group), (1, 43));
/// assert_eq!(partitioner.combine(grp, key_in_group), 107);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GroupPartitioner<K: PackedInt> {
    kmer_length: u8,
    split_bits: u8,
    _marker: PhantomData<K>,
}

impl<K: PackedInt> GroupPartitioner<K> {
    /// Creates a partitioner for keys of `2 * kmer_length` bits, grouped by
    /// the top `split_bits` bits.
    ///
    /// # Errors
    ///
    /// - `InvalidKmerLength` when `2 * kmer_length` exceeds the key width.
    /// - `InvalidSplitBits` when `split_bits > 2 * kmer_length` or
    ///   `split_bits > 32` (group ids are `u32`).
    pub fn new(kmer_length: u8, split_bits: u8) -> crate::Result<Self> {
        let needed = 2 * kmer_length as u32;
        if needed > K::BITS {
            return Err(KmerBinError::InvalidKmerLength {
                kmer_length,
                needed,
                available: K::BITS,
            });
        }
        if split_bits as u32 > needed || split_bits > 32 {
            return Err(KmerBinError::InvalidSplitBits {
                split_bits,
                kmer_length,
            });
        }
        Ok(Self {
            kmer_length,
            split_bits,
            _marker: PhantomData,
        })
    }

    pub fn kmer_length(&self) -> u8 {
        self.kmer_length
    }

    pub fn split_bits(&self) -> u8 {
        self.split_bits
    }

    /// Number of groups, `2 ^ split_bits`.
    pub fn num_groups(&self) -> u64 {
        1u64 << self.split_bits
    }

    /// Number of low bits kept inside the group.
    #[inline]
    fn low_bits(&self) -> u32 {
        2 * self.kmer_length as u32 - self.split_bits as u32
    }

    /// Splits a key into (group id, key-in-group).
    ///
    /// `grp = key >> (2L - B)`, `key_in_group = key & ((1 << (2L - B)) - 1)`.
    #[inline]
    pub fn split(&self, key: K) -> (u32, K) {
        let low_bits = self.low_bits();
        // shift-by-width is avoided explicitly at both boundaries
        if low_bits == K::BITS {
            return (0, key);
        }
        let grp = (key >> low_bits).low_u32();
        let key_in_group = if low_bits == 0 {
            K::ZERO
        } else {
            key & (K::MAX >> (K::BITS - low_bits))
        };
        (grp, key_in_group)
    }

    /// Recombines a (group id, key-in-group) pair into the original key.
    ///
    /// `key = (grp << (2L - B)) | key_in_group`.
    #[inline]
    pub fn combine(&self, grp: u32, key_in_group: K) -> K {
        let low_bits = self.low_bits();
        if low_bits == K::BITS {
            return key_in_group;
        }
        (K::from_group(grp) << low_bits) | key_in_group
    }
}
