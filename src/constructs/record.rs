use byteorder::{ByteOrder, LittleEndian};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::io::{Read, Write};
use std::ops::{BitAnd, BitOr, Shl, Shr};
use std::str::FromStr;

/// Fixed-width unsigned integer usable as a packed key or value.
///
/// The trait carries the byte width of the wire encoding, the little-endian
/// slice codec, and the small amount of integer arithmetic the codec and
/// partitioner need. Implemented for `u16`, `u32`, `u64` and `u128`; the
/// key width is chosen per configuration so that `2 * kmer_length` bits fit.
pub trait PackedInt:
    Copy
    + Eq
    + Ord
    + Hash
    + Default
    + Debug
    + Display
    + FromStr
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Width of the wire encoding in bytes.
    const WIDTH: usize;
    /// Width of the wire encoding in bits.
    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;
    const MAX: Self;

    /// Widens a 2-bit symbol value into this type.
    fn from_symbol(value: u8) -> Self;
    /// Widens a group id into this type.
    fn from_group(grp: u32) -> Self;
    /// Truncates to the low 32 bits.
    fn low_u32(self) -> u32;

    /// Decodes from the first `WIDTH` bytes of `buf`, little-endian.
    fn read_le(buf: &[u8]) -> Self;
    /// Encodes into the first `WIDTH` bytes of `buf`, little-endian.
    fn write_le(self, buf: &mut [u8]);
}

macro_rules! impl_packed_int {
    ($t:ty, $read:ident, $write:ident) => {
        impl PackedInt for $t {
            const WIDTH: usize = std::mem::size_of::<$t>();
            const BITS: u32 = (std::mem::size_of::<$t>() as u32) * 8;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn from_symbol(value: u8) -> Self {
                value as $t
            }

            #[inline]
            fn from_group(grp: u32) -> Self {
                grp as $t
            }

            #[inline]
            fn low_u32(self) -> u32 {
                self as u32
            }

            #[inline]
            fn read_le(buf: &[u8]) -> Self {
                LittleEndian::$read(buf)
            }

            #[inline]
            fn write_le(self, buf: &mut [u8]) {
                LittleEndian::$write(buf, self)
            }
        }
    };
}

impl_packed_int!(u16, read_u16, write_u16);
impl_packed_int!(u32, read_u32, write_u32);
impl_packed_int!(u64, read_u64, write_u64);
impl_packed_int!(u128, read_u128, write_u128);

/// Widest supported record: u128 key + u128 value.
const MAX_WIRE_SIZE: usize = 32;

/// A single (key, value) record.
///
/// The wire form is the key followed by the value, each little-endian, with
/// no padding between fields or between consecutive records. Containers are
/// flat sequences of these `K::WIDTH + V::WIDTH` byte units with no header,
/// footer or checksum; the widths themselves are agreed out-of-band by the
/// configuration shared with the rest of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record<K: PackedInt, V: PackedInt> {
    /// Packed k-mer key, most-significant symbol first, 2 bits per symbol.
    pub key: K,
    /// Associated count or weight.
    pub value: V,
}

impl<K: PackedInt, V: PackedInt> Record<K, V> {
    /// Size of one encoded record in bytes.
    pub const WIRE_SIZE: usize = K::WIDTH + V::WIDTH;

    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Decodes a record from the first `WIRE_SIZE` bytes of `buf`.
    #[inline]
    pub fn read_le(buf: &[u8]) -> Self {
        Self {
            key: K::read_le(&buf[..K::WIDTH]),
            value: V::read_le(&buf[K::WIDTH..Self::WIRE_SIZE]),
        }
    }

    /// Encodes the record into the first `WIRE_SIZE` bytes of `buf`.
    #[inline]
    pub fn write_le(&self, buf: &mut [u8]) {
        self.key.write_le(&mut buf[..K::WIDTH]);
        self.value.write_le(&mut buf[K::WIDTH..Self::WIRE_SIZE]);
    }

    pub fn write_bytes<W: Write>(&self, writer: &mut W) -> Result<(), std::io::Error> {
        let mut buffer = [0u8; MAX_WIRE_SIZE];
        self.write_le(&mut buffer[..Self::WIRE_SIZE]);
        writer.write_all(&buffer[..Self::WIRE_SIZE])
    }

    pub fn from_bytes<R: Read>(reader: &mut R) -> Result<Self, std::io::Error> {
        let mut buffer = [0u8; MAX_WIRE_SIZE];
        reader.read_exact(&mut buffer[..Self::WIRE_SIZE])?;
        Ok(Self::read_le(&buffer[..Self::WIRE_SIZE]))
    }
}
