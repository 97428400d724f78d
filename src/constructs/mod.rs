mod codec;
mod group;
mod record;

pub use codec::{ConstantLengthKmerCodec, KeyCodec};
pub use group::GroupPartitioner;
pub use record::{PackedInt, Record};
