//! The pull-model reader engine.
//!
//! One call to [`NbtReader::read_next_tag`] consumes exactly one top-level
//! tag together with its whole subtree. Nesting is tracked on an explicit
//! frame stack owned by the engine, so document depth is bounded by memory
//! rather than by the native call stack.

use crate::grammar;
use crate::stream::ByteSource;
use crate::tag::TagType;
use crate::value::{NbtTag, NbtValue};
use crate::{NbtError, NbtFormatError, NbtStateError};

/// Where the engine rests between calls, or `Errored` forever after a
/// format violation. The two body states are live while a call is walking
/// an open container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    AtStreamStart,
    AtCompoundBody,
    AtListBody,
    AtStreamEnd,
    Errored,
}

/// One open ancestor container during a parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderFrame {
    /// Name of the container being filled, if it has one.
    pub parent_name: Option<String>,
    /// [`TagType::Compound`] or [`TagType::List`].
    pub parent_type: TagType,
    /// Declared element type; [`TagType::End`] for compound frames.
    pub list_element_type: TagType,
    /// Declared element count for list frames.
    pub declared_length: i32,
    /// Elements consumed so far in this frame.
    pub current_index: i32,
}

/// Accumulator for the container a frame is building. A `Skip` frame walks
/// its children without materializing anything.
enum FrameBuilder {
    Compound(Vec<NbtTag>),
    List(Vec<NbtValue>),
    Skip,
}

/// What a selector sees before a tag's payload is touched.
pub struct TagCandidate<'a> {
    pub tag_type: TagType,
    /// `None` for list elements.
    pub name: Option<&'a str>,
    /// The open-ancestor stack, outermost first.
    pub frames: &'a [ReaderFrame],
}

/// Result of advancing the reader by one top-level tag.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    /// The tag was materialized in full.
    Tag(NbtTag),
    /// The tag's header was consumed and its payload discarded.
    Skipped { tag_type: TagType, name: String },
    /// The source is exhausted.
    StreamEnd,
}

type Selector<'s> = dyn FnMut(&TagCandidate<'_>) -> bool + 's;

enum Entered {
    /// A frame was pushed; the walk continues inside it.
    Framed,
    /// The whole payload was discarded arithmetically; the name is handed
    /// back for reporting.
    Consumed(Option<String>),
}

/// Single-pass streaming NBT parser over a byte slice.
pub struct NbtReader<'a> {
    source: ByteSource<'a>,
    frames: Vec<ReaderFrame>,
    builders: Vec<FrameBuilder>,
    state: ReaderState,
}

impl<'a> NbtReader<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source: ByteSource::new(source),
            frames: Vec::new(),
            builders: Vec::new(),
            state: ReaderState::AtStreamStart,
        }
    }

    /// Materializes the next top-level tag unconditionally.
    pub fn read_next_tag(&mut self) -> Result<ReadOutcome, NbtError> {
        self.read_one(&mut None, false)
    }

    /// Materializes the next top-level tag, consulting `selector` for it
    /// and for every compound member encountered along the way. A rejected
    /// tag's payload is discarded through the cheapest available path.
    ///
    /// List elements are not offered to the selector: dropping one would
    /// falsify the length already read from the list header.
    pub fn read_next_tag_with<F>(&mut self, mut selector: F) -> Result<ReadOutcome, NbtError>
    where
        F: FnMut(&TagCandidate<'_>) -> bool,
    {
        let mut selector: Option<&mut Selector<'_>> = Some(&mut selector);
        self.read_one(&mut selector, false)
    }

    /// Discards the next top-level tag and its whole subtree.
    pub fn skip_tag(&mut self) -> Result<ReadOutcome, NbtError> {
        self.read_one(&mut None, true)
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Open-ancestor count; nonzero only while a call is in progress
    /// (selectors observe it through [`TagCandidate::frames`]).
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn current_frame(&self) -> Option<&ReaderFrame> {
        self.frames.last()
    }

    pub fn frames(&self) -> &[ReaderFrame] {
        &self.frames
    }

    /// Bytes consumed so far.
    pub fn pos(&self) -> usize {
        self.source.pos()
    }

    fn read_one(
        &mut self,
        selector: &mut Option<&mut Selector<'_>>,
        force_skip: bool,
    ) -> Result<ReadOutcome, NbtError> {
        match self.state {
            ReaderState::Errored => return Err(NbtStateError::ReaderPoisoned.into()),
            ReaderState::AtStreamEnd => return Ok(ReadOutcome::StreamEnd),
            _ => {}
        }
        if !self.source.has_remaining() {
            self.state = ReaderState::AtStreamEnd;
            return Ok(ReadOutcome::StreamEnd);
        }

        let result = self.walk(selector, force_skip);
        if result.is_err() {
            // Alignment is lost; no resynchronization is attempted.
            self.state = ReaderState::Errored;
            self.frames.clear();
            self.builders.clear();
        }
        result
    }

    fn walk(
        &mut self,
        selector: &mut Option<&mut Selector<'_>>,
        force_skip: bool,
    ) -> Result<ReadOutcome, NbtError> {
        debug_assert!(self.frames.is_empty());

        let header_pos = self.source.pos();
        let tag_type = self.read_tag_type()?;
        if tag_type == TagType::End {
            return Err(NbtFormatError::UnexpectedEnd { pos: header_pos }.into());
        }
        let name = self.source.get_string()?.into_owned();
        let accepted = !force_skip && self.select(selector, tag_type, Some(&name));

        if !tag_type.is_container() {
            let outcome = if accepted {
                let value = self.read_leaf_payload(tag_type)?;
                ReadOutcome::Tag(NbtTag::named(name, value))
            } else {
                self.skip_leaf_payload(tag_type)?;
                ReadOutcome::Skipped { tag_type, name }
            };
            self.settle();
            return Ok(outcome);
        }

        if let Entered::Consumed(name) = self.enter_container(tag_type, Some(name), accepted)? {
            self.settle();
            return Ok(ReadOutcome::Skipped {
                tag_type,
                name: name.unwrap_or_default(),
            });
        }

        loop {
            let (parent_is_list, element_type) = match self.frames.last() {
                Some(frame) => (
                    frame.parent_type == TagType::List,
                    frame.list_element_type,
                ),
                None => unreachable!("walk loop runs with an open frame"),
            };

            if parent_is_list {
                let done = matches!(
                    self.frames.last(),
                    Some(frame) if frame.current_index >= frame.declared_length
                );
                if done {
                    if let Some(outcome) = self.finish_top_frame() {
                        self.settle();
                        return Ok(outcome);
                    }
                    continue;
                }
            }

            let parent_skipping = matches!(self.builders.last(), Some(FrameBuilder::Skip));

            let (child_type, child_name) = if parent_is_list {
                (element_type, None)
            } else {
                let child_type = self.read_tag_type()?;
                if child_type == TagType::End {
                    if let Some(outcome) = self.finish_top_frame() {
                        self.settle();
                        return Ok(outcome);
                    }
                    continue;
                }
                if parent_skipping {
                    // The name is dead weight inside a skipped subtree.
                    self.source.skip_string()?;
                    (child_type, None)
                } else {
                    (child_type, Some(self.source.get_string()?.into_owned()))
                }
            };

            if let Some(frame) = self.frames.last_mut() {
                frame.current_index += 1;
            }

            let accepted = if parent_skipping {
                false
            } else if parent_is_list {
                true
            } else {
                self.select(selector, child_type, child_name.as_deref())
            };

            if child_type.is_container() {
                self.enter_container(child_type, child_name, accepted)?;
                continue;
            }

            if accepted {
                let value = self.read_leaf_payload(child_type)?;
                self.attach(child_name, value);
            } else {
                self.skip_leaf_payload(child_type)?;
            }
        }
    }

    fn select(
        &self,
        selector: &mut Option<&mut Selector<'_>>,
        tag_type: TagType,
        name: Option<&str>,
    ) -> bool {
        match selector {
            Some(selector) => selector(&TagCandidate {
                tag_type,
                name,
                frames: &self.frames,
            }),
            None => true,
        }
    }

    /// Opens a compound or list frame. A rejected list of fixed-width
    /// elements is discarded with a single arithmetic skip instead.
    fn enter_container(
        &mut self,
        tag_type: TagType,
        name: Option<String>,
        accepted: bool,
    ) -> Result<Entered, NbtError> {
        match tag_type {
            TagType::Compound => {
                self.frames.push(ReaderFrame {
                    parent_name: name,
                    parent_type: TagType::Compound,
                    list_element_type: TagType::End,
                    declared_length: 0,
                    current_index: 0,
                });
                self.builders.push(if accepted {
                    FrameBuilder::Compound(Vec::new())
                } else {
                    FrameBuilder::Skip
                });
                self.state = ReaderState::AtCompoundBody;
                Ok(Entered::Framed)
            }
            TagType::List => {
                let header_pos = self.source.pos();
                let element_type = self.read_tag_type()?;
                let declared = self.source.get_i32()?;
                let len = grammar::validate_list_header(element_type, declared, header_pos)?;

                if !accepted {
                    if let Some(width) = grammar::fixed_payload_width(element_type) {
                        self.source.skip(len * width)?;
                        return Ok(Entered::Consumed(name));
                    }
                }

                self.frames.push(ReaderFrame {
                    parent_name: name,
                    parent_type: TagType::List,
                    list_element_type: element_type,
                    declared_length: declared,
                    current_index: 0,
                });
                self.builders.push(if accepted {
                    // Each element needs at least one byte, which bounds a
                    // lying header's allocation.
                    FrameBuilder::List(Vec::with_capacity(len.min(self.source.remaining())))
                } else {
                    FrameBuilder::Skip
                });
                self.state = ReaderState::AtListBody;
                Ok(Entered::Framed)
            }
            _ => unreachable!("enter_container on non-container type"),
        }
    }

    /// Pops the top frame and hands its finished container to the parent
    /// builder, or returns the top-level outcome once the stack is empty.
    fn finish_top_frame(&mut self) -> Option<ReadOutcome> {
        let frame = self.frames.pop()?;
        let builder = self.builders.pop()?;

        let value = match builder {
            FrameBuilder::Compound(members) => Some(NbtValue::Compound(members)),
            FrameBuilder::List(elements) => Some(NbtValue::List {
                element_type: frame.list_element_type,
                elements,
            }),
            FrameBuilder::Skip => None,
        };

        if self.frames.is_empty() {
            return Some(match value {
                Some(value) => ReadOutcome::Tag(NbtTag::from_parts(frame.parent_name, value)),
                None => ReadOutcome::Skipped {
                    tag_type: frame.parent_type,
                    name: frame.parent_name.unwrap_or_default(),
                },
            });
        }

        if let Some(value) = value {
            self.attach(frame.parent_name, value);
        }
        self.state = match self.frames.last() {
            Some(frame) if frame.parent_type == TagType::List => ReaderState::AtListBody,
            _ => ReaderState::AtCompoundBody,
        };
        None
    }

    fn attach(&mut self, name: Option<String>, value: NbtValue) {
        match self.builders.last_mut() {
            Some(FrameBuilder::Compound(members)) => {
                members.push(NbtTag::from_parts(name, value));
            }
            Some(FrameBuilder::List(elements)) => {
                elements.push(value);
            }
            _ => {}
        }
    }

    fn settle(&mut self) {
        self.state = if self.source.has_remaining() {
            ReaderState::AtStreamStart
        } else {
            ReaderState::AtStreamEnd
        };
    }

    fn read_tag_type(&mut self) -> Result<TagType, NbtFormatError> {
        let pos = self.source.pos();
        let value = self.source.get_u8()?;
        TagType::try_from(value).map_err(|value| NbtFormatError::InvalidTagByte { value, pos })
    }

    /// Reads and validates an array length, making sure the payload fits in
    /// the remaining stream before anything is allocated.
    fn read_array_len(&mut self, element_width: usize) -> Result<usize, NbtFormatError> {
        let pos = self.source.pos();
        let declared = self.source.get_i32()?;
        let len = grammar::validate_declared_length(declared, pos)?;
        self.source.ensure(len * element_width)?;
        Ok(len)
    }

    fn read_leaf_payload(&mut self, tag_type: TagType) -> Result<NbtValue, NbtError> {
        Ok(match tag_type {
            TagType::Bool => NbtValue::Bool(self.source.get_u8()? == 1),
            TagType::Byte => NbtValue::Byte(self.source.get_i8()?),
            TagType::Short => NbtValue::Short(self.source.get_i16()?),
            TagType::Int => NbtValue::Int(self.source.get_i32()?),
            TagType::Long => NbtValue::Long(self.source.get_i64()?),
            TagType::Float => NbtValue::Float(self.source.get_f32()?),
            TagType::Double => NbtValue::Double(self.source.get_f64()?),
            TagType::String => NbtValue::String(self.source.get_string()?.into_owned()),
            TagType::ByteArray => {
                let len = self.read_array_len(1)?;
                let bytes = self.source.take(len)?;
                NbtValue::ByteArray(bytemuck::cast_slice(bytes).to_vec())
            }
            TagType::IntArray => {
                let len = self.read_array_len(4)?;
                let mut elements = Vec::with_capacity(len);
                for _ in 0..len {
                    elements.push(self.source.get_i32()?);
                }
                NbtValue::IntArray(elements)
            }
            TagType::LongArray => {
                let len = self.read_array_len(8)?;
                let mut elements = Vec::with_capacity(len);
                for _ in 0..len {
                    elements.push(self.source.get_i64()?);
                }
                NbtValue::LongArray(elements)
            }
            TagType::End | TagType::List | TagType::Compound => {
                unreachable!("not a leaf type")
            }
        })
    }

    fn skip_leaf_payload(&mut self, tag_type: TagType) -> Result<(), NbtError> {
        if let Some(width) = grammar::fixed_payload_width(tag_type) {
            return Ok(self.source.skip(width)?);
        }
        match tag_type {
            TagType::String => self.source.skip_string()?,
            TagType::ByteArray => {
                let len = self.read_array_len(1)?;
                self.source.skip(len)?;
            }
            TagType::IntArray => {
                let len = self.read_array_len(4)?;
                self.source.skip(len * 4)?;
            }
            TagType::LongArray => {
                let len = self.read_array_len(8)?;
                self.source.skip(len * 8)?;
            }
            _ => unreachable!("not a leaf type"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // [Compound "root"][Bool "flag" = true][Int "n" = 7][End]
    fn sample() -> Vec<u8> {
        vec![
            10, 0, 4, b'r', b'o', b'o', b't', //
            13, 0, 4, b'f', b'l', b'a', b'g', 1, //
            3, 0, 1, b'n', 0, 0, 0, 7, //
            0,
        ]
    }

    fn read_tag(bytes: &[u8]) -> NbtTag {
        let mut reader = NbtReader::new(bytes);
        match reader.read_next_tag().unwrap() {
            ReadOutcome::Tag(tag) => tag,
            other => panic!("expected a tag, got {:?}", other),
        }
    }

    #[test]
    fn reads_example_document() {
        let tag = read_tag(&sample());
        assert_eq!(tag.name(), Some("root"));
        assert_eq!(
            tag.value(),
            &NbtValue::Compound(vec![
                NbtTag::named("flag", NbtValue::Bool(true)),
                NbtTag::named("n", NbtValue::Int(7)),
            ])
        );
    }

    #[test]
    fn stream_end_after_last_tag() {
        let bytes = sample();
        let mut reader = NbtReader::new(&bytes);
        assert!(matches!(reader.read_next_tag(), Ok(ReadOutcome::Tag(_))));
        assert_eq!(reader.state(), ReaderState::AtStreamEnd);
        assert_eq!(reader.read_next_tag().unwrap(), ReadOutcome::StreamEnd);
    }

    #[test]
    fn reads_multiple_top_level_tags() {
        let mut bytes = vec![13, 0, 1, b'a', 1];
        bytes.extend_from_slice(&[3, 0, 1, b'b', 0, 0, 0, 2]);
        let mut reader = NbtReader::new(&bytes);
        let first = reader.read_next_tag().unwrap();
        assert_eq!(
            first,
            ReadOutcome::Tag(NbtTag::named("a", NbtValue::Bool(true)))
        );
        let second = reader.read_next_tag().unwrap();
        assert_eq!(
            second,
            ReadOutcome::Tag(NbtTag::named("b", NbtValue::Int(2)))
        );
        assert_eq!(reader.read_next_tag().unwrap(), ReadOutcome::StreamEnd);
    }

    #[test]
    fn skip_consumes_the_same_bytes() {
        let bytes = sample();
        let mut full = NbtReader::new(&bytes);
        full.read_next_tag().unwrap();

        let mut skipping = NbtReader::new(&bytes);
        let outcome = skipping.skip_tag().unwrap();
        assert_eq!(
            outcome,
            ReadOutcome::Skipped {
                tag_type: TagType::Compound,
                name: "root".to_owned(),
            }
        );
        assert_eq!(full.pos(), skipping.pos());
    }

    #[test]
    fn selector_skips_compound_members() {
        let bytes = sample();
        let mut reader = NbtReader::new(&bytes);
        let outcome = reader
            .read_next_tag_with(|candidate| candidate.name != Some("flag"))
            .unwrap();
        match outcome {
            ReadOutcome::Tag(tag) => {
                assert_eq!(
                    tag.value(),
                    &NbtValue::Compound(vec![NbtTag::named("n", NbtValue::Int(7))])
                );
            }
            other => panic!("expected a tag, got {:?}", other),
        }
    }

    #[test]
    fn selector_sees_frame_context() {
        let bytes = sample();
        let mut reader = NbtReader::new(&bytes);
        let mut seen = Vec::new();
        reader
            .read_next_tag_with(|candidate| {
                seen.push((
                    candidate.tag_type,
                    candidate.name.map(str::to_owned),
                    candidate.frames.len(),
                ));
                true
            })
            .unwrap();
        assert_eq!(
            seen,
            vec![
                (TagType::Compound, Some("root".to_owned()), 0),
                (TagType::Bool, Some("flag".to_owned()), 1),
                (TagType::Int, Some("n".to_owned()), 1),
            ]
        );
    }

    #[test]
    fn rejected_fixed_width_list_is_skipped_arithmetically() {
        // [Compound "r"][List "xs" of Int, 3 elements][Int "keep" = 1][End]
        let mut bytes = vec![10, 0, 1, b'r'];
        bytes.extend_from_slice(&[9, 0, 2, b'x', b's', 3, 0, 0, 0, 3]);
        bytes.extend_from_slice(&[0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3]);
        bytes.extend_from_slice(&[3, 0, 4, b'k', b'e', b'e', b'p', 0, 0, 0, 1]);
        bytes.push(0);

        let mut reader = NbtReader::new(&bytes);
        let outcome = reader
            .read_next_tag_with(|candidate| candidate.tag_type != TagType::List)
            .unwrap();
        match outcome {
            ReadOutcome::Tag(tag) => {
                assert_eq!(
                    tag.value(),
                    &NbtValue::Compound(vec![NbtTag::named("keep", NbtValue::Int(1))])
                );
            }
            other => panic!("expected a tag, got {:?}", other),
        }
        assert_eq!(reader.pos(), bytes.len());
    }

    #[test]
    fn list_elements_bypass_the_selector() {
        // [List "xs" of Int, 2 elements]
        let bytes = [9, 0, 2, b'x', b's', 3, 0, 0, 0, 2, 0, 0, 0, 5, 0, 0, 0, 6];
        let mut reader = NbtReader::new(&bytes);
        let outcome = reader
            .read_next_tag_with(|candidate| candidate.tag_type != TagType::Int)
            .unwrap();
        assert_eq!(
            outcome,
            ReadOutcome::Tag(NbtTag::named(
                "xs",
                NbtValue::List {
                    element_type: TagType::Int,
                    elements: vec![NbtValue::Int(5), NbtValue::Int(6)],
                }
            ))
        );
    }

    #[test]
    fn empty_list_keeps_declared_type() {
        let bytes = [9, 0, 1, b'e', 3, 0, 0, 0, 0];
        let tag = read_tag(&bytes);
        assert_eq!(
            tag.value(),
            &NbtValue::List {
                element_type: TagType::Int,
                elements: vec![],
            }
        );
    }

    #[test]
    fn empty_list_of_end_type_is_valid() {
        let bytes = [9, 0, 1, b'e', 0, 0, 0, 0, 0];
        let tag = read_tag(&bytes);
        assert_eq!(
            tag.value(),
            &NbtValue::List {
                element_type: TagType::End,
                elements: vec![],
            }
        );
    }

    #[test]
    fn nonempty_list_of_end_type_is_rejected() {
        let bytes = [9, 0, 1, b'e', 0, 0, 0, 0, 1];
        let mut reader = NbtReader::new(&bytes);
        assert!(matches!(
            reader.read_next_tag(),
            Err(NbtError::Format(NbtFormatError::InvalidListElementType { .. }))
        ));
    }

    #[test]
    fn unknown_type_byte_reports_position() {
        let bytes = [10, 0, 1, b'r', 77, 0, 1, b'x'];
        let mut reader = NbtReader::new(&bytes);
        assert!(matches!(
            reader.read_next_tag(),
            Err(NbtError::Format(NbtFormatError::InvalidTagByte {
                value: 77,
                pos: 4,
            }))
        ));
    }

    #[test]
    fn end_at_top_level_is_rejected() {
        let bytes = [0];
        let mut reader = NbtReader::new(&bytes);
        assert!(matches!(
            reader.read_next_tag(),
            Err(NbtError::Format(NbtFormatError::UnexpectedEnd { pos: 0 }))
        ));
    }

    #[test]
    fn negative_array_length_is_rejected() {
        let bytes = [7, 0, 1, b'a', 0xFF, 0xFF, 0xFF, 0xFF];
        let mut reader = NbtReader::new(&bytes);
        assert!(matches!(
            reader.read_next_tag(),
            Err(NbtError::Format(NbtFormatError::NegativeLength {
                length: -1,
                ..
            }))
        ));
    }

    #[test]
    fn truncated_payload_is_rejected() {
        // Int "n" with only two payload bytes.
        let bytes = [3, 0, 1, b'n', 0, 0];
        let mut reader = NbtReader::new(&bytes);
        assert!(matches!(
            reader.read_next_tag(),
            Err(NbtError::Format(NbtFormatError::UnexpectedEof { .. }))
        ));
    }

    #[test]
    fn missing_compound_terminator_is_rejected() {
        let bytes = [10, 0, 1, b'r', 13, 0, 1, b'f', 1];
        let mut reader = NbtReader::new(&bytes);
        assert!(matches!(
            reader.read_next_tag(),
            Err(NbtError::Format(NbtFormatError::UnexpectedEof { .. }))
        ));
    }

    #[test]
    fn format_error_poisons_the_reader() {
        let bytes = [10, 0, 1, b'r', 77];
        let mut reader = NbtReader::new(&bytes);
        assert!(matches!(reader.read_next_tag(), Err(NbtError::Format(_))));
        assert_eq!(reader.state(), ReaderState::Errored);
        assert!(matches!(
            reader.read_next_tag(),
            Err(NbtError::State(NbtStateError::ReaderPoisoned))
        ));
        assert!(matches!(
            reader.skip_tag(),
            Err(NbtError::State(NbtStateError::ReaderPoisoned))
        ));
    }

    #[test]
    fn skip_propagates_format_errors() {
        let bytes = [10, 0, 1, b'r', 77];
        let mut reader = NbtReader::new(&bytes);
        assert!(matches!(reader.skip_tag(), Err(NbtError::Format(_))));
        assert_eq!(reader.state(), ReaderState::Errored);
    }

    #[test]
    fn deeply_nested_compounds_parse_and_skip() {
        const DEPTH: usize = 10_000;
        let mut bytes = Vec::with_capacity(DEPTH * 5);
        for _ in 0..DEPTH {
            bytes.extend_from_slice(&[10, 0, 1, b'c']);
        }
        bytes.extend_from_slice(&vec![0; DEPTH]);

        let mut skipping = NbtReader::new(&bytes);
        let outcome = skipping.skip_tag().unwrap();
        assert!(matches!(outcome, ReadOutcome::Skipped { .. }));
        assert_eq!(skipping.pos(), bytes.len());

        let mut reader = NbtReader::new(&bytes);
        let mut tag = match reader.read_next_tag().unwrap() {
            ReadOutcome::Tag(tag) => tag,
            other => panic!("expected a tag, got {:?}", other),
        };
        let mut depth = 1;
        // Unwind iteratively so the test itself stays off the call stack.
        loop {
            let members = match tag.into_value() {
                NbtValue::Compound(members) => members,
                other => panic!("expected a compound, got {:?}", other),
            };
            match members.into_iter().next() {
                Some(inner) => {
                    depth += 1;
                    tag = inner;
                }
                None => break,
            }
        }
        assert_eq!(depth, DEPTH);
    }

    #[test]
    fn deeply_nested_lists_skip_without_materializing() {
        const DEPTH: usize = 10_000;
        let mut bytes = vec![9, 0, 1, b'l'];
        for _ in 0..DEPTH - 1 {
            // Each level: a list of one list.
            bytes.extend_from_slice(&[9, 0, 0, 0, 1]);
        }
        bytes.extend_from_slice(&[3, 0, 0, 0, 0]);

        let mut reader = NbtReader::new(&bytes);
        let outcome = reader.skip_tag().unwrap();
        assert!(matches!(outcome, ReadOutcome::Skipped { .. }));
        assert_eq!(reader.pos(), bytes.len());
    }
}
