//! Owned NBT value representations.

use crate::tag::TagType;

/// One node of the NBT tree: an optional name and a typed payload.
///
/// A tag carries a name exactly when it is a direct compound member or the
/// document root; list elements are stored as bare [`NbtValue`]s and never
/// have one. The engines enforce this at the codec boundary rather than at
/// construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct NbtTag {
    name: Option<String>,
    value: NbtValue,
}

impl NbtTag {
    /// Makes an unnamed tag.
    pub fn new(value: NbtValue) -> Self {
        Self { name: None, value }
    }

    /// Makes a named tag.
    pub fn named(name: impl Into<String>, value: NbtValue) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }

    pub(crate) fn from_parts(name: Option<String>, value: NbtValue) -> Self {
        Self { name, value }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn value(&self) -> &NbtValue {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut NbtValue {
        &mut self.value
    }

    pub fn into_value(self) -> NbtValue {
        self.value
    }

    #[inline]
    pub fn tag_type(&self) -> TagType {
        self.value.tag_type()
    }
}

/// The payload of one tag. Containers own their children outright, so
/// cloning a value duplicates the whole subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum NbtValue {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    /// `element_type` is kept even when `elements` is empty so that empty
    /// lists round-trip with the declared type they were read with.
    List {
        element_type: TagType,
        elements: Vec<NbtValue>,
    },
    Compound(Vec<NbtTag>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl NbtValue {
    #[inline]
    pub fn tag_type(&self) -> TagType {
        match self {
            NbtValue::Bool(_) => TagType::Bool,
            NbtValue::Byte(_) => TagType::Byte,
            NbtValue::Short(_) => TagType::Short,
            NbtValue::Int(_) => TagType::Int,
            NbtValue::Long(_) => TagType::Long,
            NbtValue::Float(_) => TagType::Float,
            NbtValue::Double(_) => TagType::Double,
            NbtValue::ByteArray(_) => TagType::ByteArray,
            NbtValue::String(_) => TagType::String,
            NbtValue::List { .. } => TagType::List,
            NbtValue::Compound(_) => TagType::Compound,
            NbtValue::IntArray(_) => TagType::IntArray,
            NbtValue::LongArray(_) => TagType::LongArray,
        }
    }

    /// The zero/empty payload for `tag_type`, or `None` for [`TagType::End`]
    /// which has no payload.
    pub fn default_for(tag_type: TagType) -> Option<NbtValue> {
        Some(match tag_type {
            TagType::End => return None,
            TagType::Bool => NbtValue::Bool(false),
            TagType::Byte => NbtValue::Byte(0),
            TagType::Short => NbtValue::Short(0),
            TagType::Int => NbtValue::Int(0),
            TagType::Long => NbtValue::Long(0),
            TagType::Float => NbtValue::Float(0.0),
            TagType::Double => NbtValue::Double(0.0),
            TagType::ByteArray => NbtValue::ByteArray(Vec::new()),
            TagType::String => NbtValue::String(String::new()),
            TagType::List => NbtValue::List {
                element_type: TagType::End,
                elements: Vec::new(),
            },
            TagType::Compound => NbtValue::Compound(Vec::new()),
            TagType::IntArray => NbtValue::IntArray(Vec::new()),
            TagType::LongArray => NbtValue::LongArray(Vec::new()),
        })
    }

    /// Member lookup for compounds; returns the first member with `name`.
    pub fn get(&self, name: impl AsRef<str>) -> Option<&NbtTag> {
        match self {
            NbtValue::Compound(members) => {
                let key = name.as_ref();
                members.iter().find(|tag| tag.name() == Some(key))
            }
            _ => None,
        }
    }
}
