//! Streaming codec for the NBT binary tree format.
//!
//! NBT is a sequence of typed, optionally-named tags nested through two
//! container kinds: compounds (named members, terminated by an End byte)
//! and lists (unnamed same-typed elements behind a declared length). The
//! crate exposes the two halves of the codec:
//!
//! - [`NbtReader`], a pull-model parser: each call yields one top-level tag
//!   as an owned [`NbtTag`] tree, with an optional selector that decides
//!   per tag whether its payload is materialized or discarded without
//!   allocation.
//! - [`NbtWriter`], a push-model emitter over any [`bytes::BufMut`] sink,
//!   enforcing the container contracts (name presence, list element type,
//!   declared list length) before any byte is committed.
//!
//! Both engines track nesting on their own frame stacks, so adversarially
//! deep documents cannot overflow the native call stack. After a format
//! violation an engine is poisoned: the stream's framing cannot be
//! trusted past the error, so every later call fails with a state error.
//!
//! ```
//! use nbt::{NbtReader, NbtTag, NbtValue, NbtWriter, ReadOutcome};
//!
//! let mut writer = NbtWriter::new(Vec::new());
//! writer.begin_compound(Some("root")).unwrap();
//! writer.write_tag(&NbtTag::named("flag", NbtValue::Bool(true))).unwrap();
//! writer.end_compound().unwrap();
//! let bytes = writer.finish().unwrap();
//!
//! let mut reader = NbtReader::new(&bytes);
//! match reader.read_next_tag().unwrap() {
//!     ReadOutcome::Tag(tag) => assert_eq!(tag.name(), Some("root")),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

use thiserror::Error;

pub mod grammar;
mod reader;
mod stream;
mod tag;
mod value;
mod writer;

pub use reader::{NbtReader, ReadOutcome, ReaderFrame, ReaderState, TagCandidate};
pub use stream::ByteSource;
pub use tag::TagType;
pub use value::{NbtTag, NbtValue};
pub use writer::{NbtWriter, WriterFrame, WriterState};

/// The byte stream does not satisfy the NBT grammar. Never retried
/// internally; the engine that raised it is poisoned.
#[derive(Debug, Error)]
pub enum NbtFormatError {
    #[error("invalid NBT tag type byte {value:#04x} at position {pos}")]
    InvalidTagByte { value: u8, pos: usize },
    #[error("nonempty NBT list at position {pos} declares End as its element type")]
    InvalidListElementType { pos: usize },
    #[error("unexpected NBT compound end tag at position {pos}")]
    UnexpectedEnd { pos: usize },
    #[error("negative NBT length {length} at position {pos}")]
    NegativeLength { length: i32, pos: usize },
    #[error("sudden end of data at position {pos}: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        needed: usize,
        remaining: usize,
        pos: usize,
    },
    #[error("{tag_type} tag requires a name in this context")]
    MissingName { tag_type: TagType },
    #[error("list element may not carry a name (got {name:?})")]
    UnexpectedName { name: String },
    #[error("list declared element type {declared} but got {actual}")]
    ListElementTypeMismatch { declared: TagType, actual: TagType },
    #[error("list already holds its declared {declared} elements")]
    ListOverrun { declared: i32 },
    #[error("length {length} exceeds the 32-bit wire limit")]
    LengthTooLong { length: usize },
    #[error("string of {length} bytes exceeds the 16-bit wire limit")]
    StringTooLong { length: usize },
    #[error("NBT string decoding error")]
    StringDecoding(#[from] simd_cesu8::DecodingError),
}

/// The caller violated an engine's contract: operating on a poisoned
/// engine, or closing a container whose declaration was not honored.
#[derive(Debug, Error)]
pub enum NbtStateError {
    #[error("reader cannot continue after a previous parsing error")]
    ReaderPoisoned,
    #[error("writer cannot continue after a previous error")]
    WriterPoisoned,
    #[error("list closed after {written} of {declared} declared elements")]
    ListLengthMismatch { declared: i32, written: i32 },
    #[error("{depth} containers still open")]
    UnclosedContainers { depth: usize },
    #[error("no compound is open")]
    NotInCompound,
    #[error("no list is open")]
    NotInList,
}

#[derive(Debug, Error)]
pub enum NbtError {
    #[error(transparent)]
    Format(#[from] NbtFormatError),
    #[error(transparent)]
    State(#[from] NbtStateError),
}
