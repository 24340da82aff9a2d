//! Checked sequential access to the byte source.

use std::borrow::Cow;

use bytes::Buf;

use crate::NbtFormatError;

/// A forward-only view over the document bytes.
///
/// Every accessor verifies the remaining length before consuming, so a
/// truncated or lying stream surfaces as [`NbtFormatError::UnexpectedEof`]
/// instead of a panic. Multi-byte reads are big-endian throughout.
pub struct ByteSource<'a> {
    source: &'a [u8],
    full_len: usize,
}

macro_rules! checked_get {
    ($name:ident, $ty:ty, $width:expr, $get:ident) => {
        #[inline]
        pub fn $name(&mut self) -> Result<$ty, NbtFormatError> {
            self.ensure($width)?;
            Ok(self.source.$get())
        }
    };
}

impl<'a> ByteSource<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            full_len: source.len(),
        }
    }

    /// Bytes consumed so far.
    #[inline]
    pub fn pos(&self) -> usize {
        self.full_len - self.source.remaining()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.source.remaining()
    }

    #[inline]
    pub fn has_remaining(&self) -> bool {
        self.source.has_remaining()
    }

    /// Verifies that `needed` bytes remain without consuming anything.
    #[inline]
    pub fn ensure(&self, needed: usize) -> Result<(), NbtFormatError> {
        if self.source.remaining() < needed {
            Err(NbtFormatError::UnexpectedEof {
                needed,
                remaining: self.source.remaining(),
                pos: self.pos(),
            })
        } else {
            Ok(())
        }
    }

    checked_get!(get_u8, u8, 1, get_u8);
    checked_get!(get_i8, i8, 1, get_i8);
    checked_get!(get_u16, u16, 2, get_u16);
    checked_get!(get_i16, i16, 2, get_i16);
    checked_get!(get_i32, i32, 4, get_i32);
    checked_get!(get_i64, i64, 8, get_i64);
    checked_get!(get_f32, f32, 4, get_f32);
    checked_get!(get_f64, f64, 8, get_f64);

    /// Consumes `len` bytes and returns them as a slice of the source.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], NbtFormatError> {
        self.ensure(len)?;
        let (taken, rest) = self.source.split_at(len);
        self.source = rest;
        Ok(taken)
    }

    /// Consumes and discards `len` bytes.
    pub fn skip(&mut self, len: usize) -> Result<(), NbtFormatError> {
        self.ensure(len)?;
        self.source.advance(len);
        Ok(())
    }

    /// Reads a length-prefixed CESU-8 string (tag names and String payloads
    /// share this encoding).
    pub fn get_string(&mut self) -> Result<Cow<'a, str>, NbtFormatError> {
        let len = self.get_u16()? as usize;
        let bytes = self.take(len)?;
        Ok(simd_cesu8::mutf8::decode(bytes)?)
    }

    /// Discards a length-prefixed string without decoding it.
    pub fn skip_string(&mut self) -> Result<(), NbtFormatError> {
        let len = self.get_u16()? as usize;
        self.skip(len)
    }
}
