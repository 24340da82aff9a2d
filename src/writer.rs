//! The push-model writer engine.
//!
//! Callers drive the writer call by call: leaves through
//! [`NbtWriter::write_tag`], containers through the begin/end pairs. Every
//! byte goes straight to the sink, so the container contracts (declared
//! list length and element type) are enforced before emission; a header
//! already committed to the forward-only sink cannot be retracted.

use bytes::BufMut;

use crate::grammar::{self, NameContext};
use crate::tag::TagType;
use crate::value::{NbtTag, NbtValue};
use crate::{NbtError, NbtFormatError, NbtStateError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    Ready,
    Errored,
}

/// One open container on the write side.
#[derive(Debug, Clone, PartialEq)]
pub struct WriterFrame {
    /// [`TagType::Compound`] or [`TagType::List`].
    pub parent_type: TagType,
    /// Declared element type; [`TagType::End`] for compound frames.
    pub list_element_type: TagType,
    /// Length committed to the stream header, for list frames.
    pub declared_length: i32,
    /// Elements written so far in this frame.
    pub current_index: i32,
}

/// Streaming NBT emitter over any [`BufMut`] sink.
pub struct NbtWriter<B: BufMut> {
    sink: B,
    frames: Vec<WriterFrame>,
    state: WriterState,
    written: usize,
}

impl<B: BufMut> NbtWriter<B> {
    pub fn new(sink: B) -> Self {
        Self {
            sink,
            frames: Vec::new(),
            state: WriterState::Ready,
            written: 0,
        }
    }

    pub fn state(&self) -> WriterState {
        self.state
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn current_frame(&self) -> Option<&WriterFrame> {
        self.frames.last()
    }

    /// Bytes emitted so far.
    pub fn bytes_written(&self) -> usize {
        self.written
    }

    /// Writes one tag, containers included: container payloads are walked
    /// with an explicit work stack, so tree depth never grows the native
    /// call stack.
    pub fn write_tag(&mut self, tag: &NbtTag) -> Result<(), NbtError> {
        self.run(|w| w.write_tag_inner(tag))
    }

    /// Opens a compound. Compounds declare no length up front; they
    /// self-terminate with the End byte that [`Self::end_compound`] emits.
    pub fn begin_compound(&mut self, name: Option<&str>) -> Result<(), NbtError> {
        self.run(|w| {
            w.begin_element(TagType::Compound, name)?;
            w.frames.push(WriterFrame {
                parent_type: TagType::Compound,
                list_element_type: TagType::End,
                declared_length: 0,
                current_index: 0,
            });
            Ok(())
        })
    }

    pub fn end_compound(&mut self) -> Result<(), NbtError> {
        self.run(|w| {
            match w.frames.last() {
                Some(frame) if frame.parent_type == TagType::Compound => {}
                _ => return Err(NbtStateError::NotInCompound.into()),
            }
            w.emit_u8(TagType::End.to_u8());
            w.frames.pop();
            Ok(())
        })
    }

    /// Opens a list, immediately committing `element_type` and
    /// `declared_length` to the sink. Exactly `declared_length` elements of
    /// `element_type` must follow before [`Self::end_list`].
    pub fn begin_list(
        &mut self,
        name: Option<&str>,
        element_type: TagType,
        declared_length: i32,
    ) -> Result<(), NbtError> {
        self.run(|w| {
            w.begin_element(TagType::List, name)?;
            w.open_list_frame(element_type, declared_length)?;
            Ok(())
        })
    }

    /// Closes the current list. Fails if the declared length was not met
    /// exactly: the header is already on the wire, so the writer can
    /// neither pad nor truncate.
    pub fn end_list(&mut self) -> Result<(), NbtError> {
        self.run(|w| {
            match w.frames.last() {
                Some(frame) if frame.parent_type == TagType::List => {
                    if frame.current_index != frame.declared_length {
                        return Err(NbtStateError::ListLengthMismatch {
                            declared: frame.declared_length,
                            written: frame.current_index,
                        }
                        .into());
                    }
                }
                _ => return Err(NbtStateError::NotInList.into()),
            }
            w.frames.pop();
            Ok(())
        })
    }

    /// Consumes the writer and returns the sink; fails if any container is
    /// still open or the writer has errored.
    pub fn finish(self) -> Result<B, NbtError> {
        if self.state == WriterState::Errored {
            return Err(NbtStateError::WriterPoisoned.into());
        }
        if !self.frames.is_empty() {
            return Err(NbtStateError::UnclosedContainers {
                depth: self.frames.len(),
            }
            .into());
        }
        Ok(self.sink)
    }

    /// Every public operation flows through here: a poisoned writer rejects
    /// the call outright, and any failure poisons it.
    fn run<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T, NbtError>) -> Result<T, NbtError> {
        if self.state == WriterState::Errored {
            return Err(NbtStateError::WriterPoisoned.into());
        }
        let result = op(self);
        if result.is_err() {
            self.state = WriterState::Errored;
        }
        result
    }

    fn write_tag_inner(&mut self, tag: &NbtTag) -> Result<(), NbtError> {
        enum Step<'t> {
            Tag(Option<&'t str>, &'t NbtValue),
            CloseCompound,
            CloseList,
        }

        let mut work = vec![Step::Tag(tag.name(), tag.value())];
        while let Some(step) = work.pop() {
            match step {
                Step::Tag(name, value) => match value {
                    NbtValue::Compound(members) => {
                        self.begin_element(TagType::Compound, name)?;
                        self.frames.push(WriterFrame {
                            parent_type: TagType::Compound,
                            list_element_type: TagType::End,
                            declared_length: 0,
                            current_index: 0,
                        });
                        work.push(Step::CloseCompound);
                        for member in members.iter().rev() {
                            work.push(Step::Tag(member.name(), member.value()));
                        }
                    }
                    NbtValue::List {
                        element_type,
                        elements,
                    } => {
                        self.begin_element(TagType::List, name)?;
                        let declared = i32::try_from(elements.len()).map_err(|_| {
                            NbtFormatError::LengthTooLong {
                                length: elements.len(),
                            }
                        })?;
                        self.open_list_frame(*element_type, declared)?;
                        work.push(Step::CloseList);
                        for element in elements.iter().rev() {
                            work.push(Step::Tag(None, element));
                        }
                    }
                    leaf => {
                        self.begin_element(leaf.tag_type(), name)?;
                        self.put_leaf(leaf)?;
                    }
                },
                Step::CloseCompound => {
                    self.emit_u8(TagType::End.to_u8());
                    self.frames.pop();
                }
                Step::CloseList => {
                    // Declared length equals the element count by construction.
                    self.frames.pop();
                }
            }
        }
        Ok(())
    }

    /// Validates the element contract for the current frame and emits the
    /// tag's header (type byte and name) where the context calls for one.
    fn begin_element(
        &mut self,
        tag_type: TagType,
        name: Option<&str>,
    ) -> Result<(), NbtFormatError> {
        match self.frames.last() {
            Some(frame) if frame.parent_type == TagType::List => {
                grammar::validate_name_presence(NameContext::ListElement, tag_type, name)?;
                grammar::validate_list_element_type(frame.list_element_type, tag_type)?;
                if frame.current_index >= frame.declared_length {
                    return Err(NbtFormatError::ListOverrun {
                        declared: frame.declared_length,
                    });
                }
                // List elements carry neither type byte nor name.
            }
            other => {
                let context = if other.is_none() {
                    NameContext::Root
                } else {
                    NameContext::CompoundMember
                };
                grammar::validate_name_presence(context, tag_type, name)?;
                self.emit_u8(tag_type.to_u8());
                if let Some(name) = name {
                    self.emit_string(name)?;
                }
            }
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.current_index += 1;
        }
        Ok(())
    }

    fn open_list_frame(
        &mut self,
        element_type: TagType,
        declared_length: i32,
    ) -> Result<(), NbtFormatError> {
        grammar::validate_list_header(element_type, declared_length, self.written)?;
        self.emit_u8(element_type.to_u8());
        self.emit_i32(declared_length);
        self.frames.push(WriterFrame {
            parent_type: TagType::List,
            list_element_type: element_type,
            declared_length,
            current_index: 0,
        });
        Ok(())
    }

    fn put_leaf(&mut self, value: &NbtValue) -> Result<(), NbtFormatError> {
        match value {
            NbtValue::Bool(v) => self.emit_u8(*v as u8),
            NbtValue::Byte(v) => self.emit_i8(*v),
            NbtValue::Short(v) => self.emit_i16(*v),
            NbtValue::Int(v) => self.emit_i32(*v),
            NbtValue::Long(v) => self.emit_i64(*v),
            NbtValue::Float(v) => self.emit_f32(*v),
            NbtValue::Double(v) => self.emit_f64(*v),
            NbtValue::String(v) => self.emit_string(v)?,
            NbtValue::ByteArray(v) => {
                self.emit_len(v.len())?;
                self.emit_slice(bytemuck::cast_slice(v));
            }
            NbtValue::IntArray(v) => {
                self.emit_len(v.len())?;
                for element in v {
                    self.emit_i32(*element);
                }
            }
            NbtValue::LongArray(v) => {
                self.emit_len(v.len())?;
                for element in v {
                    self.emit_i64(*element);
                }
            }
            NbtValue::List { .. } | NbtValue::Compound(_) => {
                unreachable!("containers are framed, not emitted as leaves")
            }
        }
        Ok(())
    }

    fn emit_len(&mut self, length: usize) -> Result<(), NbtFormatError> {
        let declared =
            i32::try_from(length).map_err(|_| NbtFormatError::LengthTooLong { length })?;
        self.emit_i32(declared);
        Ok(())
    }

    fn emit_string(&mut self, value: &str) -> Result<(), NbtFormatError> {
        let encoded = simd_cesu8::mutf8::encode(value);
        let length = encoded.len();
        let prefix =
            u16::try_from(length).map_err(|_| NbtFormatError::StringTooLong { length })?;
        self.emit_u16(prefix);
        self.emit_slice(&encoded);
        Ok(())
    }

    fn emit_u8(&mut self, value: u8) {
        self.sink.put_u8(value);
        self.written += 1;
    }

    fn emit_i8(&mut self, value: i8) {
        self.sink.put_i8(value);
        self.written += 1;
    }

    fn emit_u16(&mut self, value: u16) {
        self.sink.put_u16(value);
        self.written += 2;
    }

    fn emit_i16(&mut self, value: i16) {
        self.sink.put_i16(value);
        self.written += 2;
    }

    fn emit_i32(&mut self, value: i32) {
        self.sink.put_i32(value);
        self.written += 4;
    }

    fn emit_i64(&mut self, value: i64) {
        self.sink.put_i64(value);
        self.written += 8;
    }

    fn emit_f32(&mut self, value: f32) {
        self.sink.put_f32(value);
        self.written += 4;
    }

    fn emit_f64(&mut self, value: f64) {
        self.sink.put_f64(value);
        self.written += 8;
    }

    fn emit_slice(&mut self, bytes: &[u8]) {
        self.sink.put_slice(bytes);
        self.written += bytes.len();
    }
}
