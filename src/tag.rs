use std::fmt::{Debug, Display};

/// NBT type code, the single byte that prefixes every tag on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TagType {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
    Bool = 13,
}

impl TagType {
    #[inline]
    pub fn to_u8(self) -> u8 {
        <Self as Into<u8>>::into(self)
    }

    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        if value > 13 {
            panic!("invalid tag type value");
        }

        // SAFETY: TagType covers all u8s in 0..=13, and is a "fieldless" enum with #[repr(u8)], so transmuting from u8 is safe.
        // https://doc.rust-lang.org/nomicon/other-reprs.html#repru-repri
        unsafe { std::mem::transmute(value) }
    }

    #[inline]
    pub const unsafe fn from_u8_unchecked(value: u8) -> Self {
        std::mem::transmute(value)
    }

    /// Whether this type is one of the two container kinds.
    #[inline]
    pub fn is_container(self) -> bool {
        matches!(self, TagType::List | TagType::Compound)
    }
}

impl TryFrom<u8> for TagType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < 14 {
            // SAFETY: TagType covers all u8s in 0..=13, and is a "fieldless" enum with #[repr(u8)], so transmuting from u8 is safe.
            // https://doc.rust-lang.org/nomicon/other-reprs.html#repru-repri
            Ok(unsafe { std::mem::transmute(value) })
        } else {
            Err(value)
        }
    }
}

impl Into<u8> for TagType {
    #[inline]
    fn into(self) -> u8 {
        // SAFETY: TagType is a "fieldless" enum with #[repr(u8)], so transmuting to u8 is safe.
        // https://doc.rust-lang.org/nomicon/other-reprs.html#repru-repri
        unsafe { std::mem::transmute(self) }
    }
}

impl Display for TagType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <TagType as Debug>::fmt(self, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn byte_round_trip() {
        for value in 0u8..=13 {
            let tag = TagType::try_from(value).unwrap();
            assert_eq!(tag.to_u8(), value);
            assert_eq!(TagType::from_u8(value), tag);
        }
    }

    #[test]
    fn rejects_unknown_bytes() {
        assert_eq!(TagType::try_from(14), Err(14));
        assert_eq!(TagType::try_from(0xFF), Err(0xFF));
    }

    #[test]
    fn bool_is_distinct_from_byte() {
        assert_ne!(TagType::Bool.to_u8(), TagType::Byte.to_u8());
    }
}
