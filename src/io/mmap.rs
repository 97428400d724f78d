//! Memory-mapped random access to binary record containers.

use std::{marker::PhantomData, sync::Arc};

use memmap2::Mmap;

use crate::{KmerBinError, PackedInt, Record};

/// Memory-mapped reader with random access by record index.
///
/// The whole container is mapped once and validated to be an exact multiple
/// of the record size. Records decode on access; the map itself is shared
/// behind an `Arc`, so clones are cheap.
#[derive(Clone)]
pub struct MmapReader<K: PackedInt, V: PackedInt> {
    map: Arc<Mmap>,
    /// Number of records in the map
    len: usize,
    _marker: PhantomData<(K, V)>,
}

impl<K: PackedInt, V: PackedInt> MmapReader<K, V> {
    /// Maps a binary container file, stripping one trailing
    /// newline/carriage-return from the path string first.
    ///
    /// # Errors
    ///
    /// - `Open` when the file cannot be opened.
    /// - `InvalidContainerSize` when the mapped size is not a whole number
    ///   of records.
    pub fn new<P: AsRef<str>>(path: P) -> crate::Result<Self> {
        let file = super::open_read(path.as_ref())?;
        let map = unsafe { Arc::new(Mmap::map(&file)?) };

        if map.len() % Record::<K, V>::WIRE_SIZE != 0 {
            return Err(KmerBinError::InvalidContainerSize);
        }
        let len = map.len() / Record::<K, V>::WIRE_SIZE;

        Ok(Self {
            map,
            len,
            _marker: PhantomData,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Decodes the record at `idx`.
    pub fn get(&self, idx: usize) -> crate::Result<Record<K, V>> {
        if idx >= self.len {
            return Err(KmerBinError::InvalidIndex { idx, max: self.len });
        }
        let start = idx * Record::<K, V>::WIRE_SIZE;
        Ok(Record::read_le(&self.map[start..]))
    }

    /// Iterates all records in container order.
    pub fn iter(&self) -> impl Iterator<Item = Record<K, V>> + '_ {
        (0..self.len).map(move |idx| {
            let start = idx * Record::<K, V>::WIRE_SIZE;
            Record::read_le(&self.map[start..])
        })
    }
}
