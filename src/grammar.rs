//! Byte-level grammar rules shared by the reader and writer engines.
//!
//! Everything here is a pure function over type codes and lengths; none of
//! it touches the byte stream.

use crate::tag::TagType;
use crate::NbtFormatError;

/// Payload width in bytes for the fixed-width scalar kinds, `None` for
/// containers, strings, arrays and `End`.
#[inline]
pub fn fixed_payload_width(tag_type: TagType) -> Option<usize> {
    match tag_type {
        TagType::Bool | TagType::Byte => Some(1),
        TagType::Short => Some(2),
        TagType::Int | TagType::Float => Some(4),
        TagType::Long | TagType::Double => Some(8),
        _ => None,
    }
}

/// Element width in bytes for the raw array kinds.
#[inline]
pub fn array_element_width(tag_type: TagType) -> Option<usize> {
    match tag_type {
        TagType::ByteArray => Some(1),
        TagType::IntArray => Some(4),
        TagType::LongArray => Some(8),
        _ => None,
    }
}

/// Where a tag is about to be serialized, which decides whether it must
/// carry a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameContext {
    Root,
    CompoundMember,
    ListElement,
}

/// Root tags and compound members must be named; list elements must not be.
pub fn validate_name_presence(
    context: NameContext,
    tag_type: TagType,
    name: Option<&str>,
) -> Result<(), NbtFormatError> {
    match (context, name) {
        (NameContext::Root | NameContext::CompoundMember, None) => {
            Err(NbtFormatError::MissingName { tag_type })
        }
        (NameContext::ListElement, Some(name)) => Err(NbtFormatError::UnexpectedName {
            name: name.to_owned(),
        }),
        _ => Ok(()),
    }
}

/// A list element's type must equal the type declared in the list header.
pub fn validate_list_element_type(
    declared: TagType,
    actual: TagType,
) -> Result<(), NbtFormatError> {
    if declared == actual {
        Ok(())
    } else {
        Err(NbtFormatError::ListElementTypeMismatch { declared, actual })
    }
}

/// Declared list/array lengths are signed on the wire; anything negative is
/// malformed. Returns the length as a usize for indexing.
pub fn validate_declared_length(declared: i32, pos: usize) -> Result<usize, NbtFormatError> {
    if declared < 0 {
        Err(NbtFormatError::NegativeLength {
            length: declared,
            pos,
        })
    } else {
        Ok(declared as usize)
    }
}

/// A list header may only declare `End` elements when the list is empty.
pub fn validate_list_header(
    element_type: TagType,
    declared_length: i32,
    pos: usize,
) -> Result<usize, NbtFormatError> {
    let len = validate_declared_length(declared_length, pos)?;
    if element_type == TagType::End && len > 0 {
        return Err(NbtFormatError::InvalidListElementType { pos });
    }
    Ok(len)
}
