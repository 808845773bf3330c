//! Low-level wire codec: varint sizing, tag-framed writers, cursor readers.
//!
//! The encoding is the standard tagged wire format: every field is preceded
//! by a varint tag of `field_number << 3 | wire_type`, scalars are base-128
//! varints or 8-byte little-endian doubles, and strings, byte blobs, nested
//! messages, and packed arrays are length-delimited. Signed integers are
//! written as their unsigned 32-bit bit pattern, without zigzag.

use thiserror::Error;

/// Decoded values larger than this are rejected before any allocation.
///
/// Matches the largest payload a host will accept in a single command.
pub const MAX_FIELD_LEN: usize = 16 * 1024 * 1024;

/// Alias for `Result<T, DecodeError>`.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Errors returned while decoding a wire buffer.
///
/// Any error aborts the decode of the whole buffer; a partially populated
/// message is never returned.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The buffer ended inside a value that declared more bytes.
    #[error("input truncated at byte {offset}")]
    Truncated {
        /// Byte offset where the unfinished value started.
        offset: usize,
    },

    /// A varint ran past the 10-byte maximum without terminating.
    #[error("unterminated varint at byte {offset}")]
    VarintOverflow {
        /// Byte offset where the varint started.
        offset: usize,
    },

    /// A tag carried a wire-type code the format does not define.
    #[error("invalid wire type {code} at byte {offset}")]
    InvalidWireType {
        /// The 3-bit code found in the tag.
        code: u32,
        /// Byte offset of the tag.
        offset: usize,
    },

    /// A length-delimited value declared a length above [`MAX_FIELD_LEN`].
    #[error("field length {len} exceeds limit at byte {offset}")]
    OversizedField {
        /// The declared length.
        len: u64,
        /// Byte offset of the length prefix.
        offset: usize,
    },

    /// A known field arrived with the wrong wire type.
    #[error("field {field}: expected wire type {expected:?}, found {found:?}")]
    TypeMismatch {
        /// Field number of the mismatched field.
        field: u32,
        /// Wire type the schema defines for this field.
        expected: WireType,
        /// Wire type found in the buffer.
        found: WireType,
    },

    /// An enum field carried a value outside its defined enumerants.
    #[error("field {field}: unknown enum value {value}")]
    InvalidEnum {
        /// Field number of the enum field.
        field: u32,
        /// The out-of-range value.
        value: u32,
    },

    /// A string field held bytes that are not valid UTF-8.
    #[error("invalid UTF-8 in string at byte {offset}")]
    InvalidUtf8 {
        /// Byte offset where the string content started.
        offset: usize,
    },
}

/// Physical encoding of a field's value, carried in the low 3 bits of a tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireType {
    /// Base-128 varint.
    Varint = 0,
    /// 8 bytes, little-endian.
    Fixed64 = 1,
    /// Varint byte count followed by that many raw bytes.
    LengthDelimited = 2,
    /// 4 bytes, little-endian. Defined by the format, unused by this schema.
    Fixed32 = 5,
}

impl WireType {
    /// Maps a 3-bit tag code to a wire type.
    fn from_code(code: u32, offset: usize) -> Result<Self> {
        match code {
            0 => Ok(Self::Varint),
            1 => Ok(Self::Fixed64),
            2 => Ok(Self::LengthDelimited),
            5 => Ok(Self::Fixed32),
            _ => Err(DecodeError::InvalidWireType { code, offset }),
        }
    }

    /// Fails with [`DecodeError::TypeMismatch`] unless `self` is `expected`.
    pub fn expect(self, expected: WireType, field: u32) -> Result<()> {
        if self == expected {
            Ok(())
        } else {
            Err(DecodeError::TypeMismatch {
                field,
                expected,
                found: self,
            })
        }
    }
}

/// Byte-length computation for wire values, without writing them.
///
/// Length-delimited fields must know their exact payload length before the
/// first byte is emitted, so every sizing rule lives here, including the
/// packed-sequence rules, and [`Encoder`] stays a dumb writer.
#[derive(Clone, Copy, Debug)]
pub struct Sizer;

impl Sizer {
    /// Bytes occupied by `value` as a varint.
    pub fn varint(value: u64) -> usize {
        // Each 7-bit group past the first costs one more byte.
        (63 - (value | 1).leading_zeros() as usize) / 7 + 1
    }

    /// Bytes occupied by a `uint32` value.
    pub fn uint32(value: u32) -> usize {
        Self::varint(u64::from(value))
    }

    /// Bytes occupied by an `int32` value, written as its unsigned bit pattern.
    pub fn int32(value: i32) -> usize {
        Self::uint32(value as u32)
    }

    /// Bytes occupied by the tag of `field`, for any wire type.
    pub fn tag(field: u32) -> usize {
        Self::uint32(field << 3)
    }

    /// Tag plus value length of a `uint32` field.
    pub fn uint32_field(field: u32, value: u32) -> usize {
        Self::tag(field) + Self::uint32(value)
    }

    /// Tag plus value length of an `int32` field.
    pub fn int32_field(field: u32, value: i32) -> usize {
        Self::tag(field) + Self::int32(value)
    }

    /// Tag plus value length of a `bool` field.
    pub fn bool_field(field: u32) -> usize {
        Self::tag(field) + 1
    }

    /// Tag plus value length of a `double` field.
    pub fn double_field(field: u32) -> usize {
        Self::tag(field) + 8
    }

    /// Tag, length prefix, and content length of a `string` field.
    pub fn string_field(field: u32, value: &str) -> usize {
        Self::tag(field) + Self::varint(value.len() as u64) + value.len()
    }

    /// Tag, length prefix, and content length of a `bytes` field.
    pub fn bytes_field(field: u32, value: &[u8]) -> usize {
        Self::tag(field) + Self::varint(value.len() as u64) + value.len()
    }

    /// Tag, length prefix, and payload length of a singular nested message.
    ///
    /// An entirely-default nested message (`len == 0`) contributes nothing.
    pub fn message_field(field: u32, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            Self::tag(field) + Self::varint(len as u64) + len
        }
    }

    /// Tag, length prefix, and payload length of one repeated-message element.
    ///
    /// Unlike [`Sizer::message_field`], an empty element still costs its tag
    /// and zero length, so the element count survives the round trip.
    pub fn message_elem(field: u32, len: usize) -> usize {
        Self::tag(field) + Self::varint(len as u64) + len
    }

    /// One packed length-delimited block holding every value, no per-element
    /// tags. An empty sequence contributes nothing.
    pub fn packed_uint32_field<I>(field: u32, values: I) -> usize
    where
        I: IntoIterator<Item = u32>,
    {
        let len: usize = values.into_iter().map(Self::uint32).sum();
        if len == 0 {
            0
        } else {
            Self::tag(field) + Self::varint(len as u64) + len
        }
    }
}

/// Append-only byte sink with typed writers.
///
/// The encoder never decides whether a field should be written; presence
/// rules (default omission, oneof selection) belong to each message's
/// `encode`. Callers pre-size the output via `Message::encoded_len` so the
/// buffer is allocated once.
#[derive(Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    /// Creates an empty encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an encoder with `capacity` bytes preallocated.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the encoder, returning the output buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Writes a varint, least-significant group first.
    pub fn varint(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.buf.push(value as u8 | 0x80);
            value >>= 7;
        }
        self.buf.push(value as u8);
    }

    /// Writes a `uint32` value as a varint.
    pub fn uint32(&mut self, value: u32) {
        self.varint(u64::from(value));
    }

    /// Writes an `int32` value as its unsigned 32-bit bit pattern.
    pub fn int32(&mut self, value: i32) {
        self.uint32(value as u32);
    }

    /// Writes a `bool` as a single byte.
    pub fn bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    /// Writes a `double` as 8 little-endian bytes.
    pub fn double(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes raw UTF-8 content. The caller writes the tag and length first.
    pub fn string(&mut self, value: &str) {
        self.buf.extend_from_slice(value.as_bytes());
    }

    /// Writes raw binary content. The caller writes the tag and length first.
    pub fn bytes(&mut self, value: &[u8]) {
        self.buf.extend_from_slice(value);
    }

    /// Writes the tag for `field` with the given wire type.
    pub fn tag(&mut self, field: u32, wire: WireType) {
        self.uint32(field << 3 | wire as u32);
    }

    /// Writes a complete `uint32` field: tag and value.
    pub fn uint32_field(&mut self, field: u32, value: u32) {
        self.tag(field, WireType::Varint);
        self.uint32(value);
    }

    /// Writes a complete `int32` field: tag and value.
    pub fn int32_field(&mut self, field: u32, value: i32) {
        self.tag(field, WireType::Varint);
        self.int32(value);
    }

    /// Writes a complete `bool` field: tag and value.
    pub fn bool_field(&mut self, field: u32, value: bool) {
        self.tag(field, WireType::Varint);
        self.bool(value);
    }

    /// Writes a complete `double` field: tag and value.
    pub fn double_field(&mut self, field: u32, value: f64) {
        self.tag(field, WireType::Fixed64);
        self.double(value);
    }

    /// Writes a complete `string` field: tag, length, content.
    pub fn string_field(&mut self, field: u32, value: &str) {
        self.tag(field, WireType::LengthDelimited);
        self.varint(value.len() as u64);
        self.string(value);
    }

    /// Writes a complete `bytes` field: tag, length, content.
    pub fn bytes_field(&mut self, field: u32, value: &[u8]) {
        self.tag(field, WireType::LengthDelimited);
        self.varint(value.len() as u64);
        self.bytes(value);
    }

    /// Writes a singular nested message: tag, payload length, payload.
    ///
    /// An entirely-default message (`encoded_len() == 0`) writes nothing,
    /// not an empty block.
    pub fn message_field(&mut self, field: u32, msg: &impl Message) {
        let len = msg.encoded_len();
        if len == 0 {
            return;
        }
        self.tag(field, WireType::LengthDelimited);
        self.varint(len as u64);
        msg.encode(self);
    }

    /// Writes one repeated-message element, keeping empty elements.
    pub fn message_elem(&mut self, field: u32, msg: &impl Message) {
        let len = msg.encoded_len();
        self.tag(field, WireType::LengthDelimited);
        self.varint(len as u64);
        msg.encode(self);
    }

    /// Writes a packed `uint32` sequence as one length-delimited block.
    ///
    /// An empty sequence writes nothing.
    pub fn packed_uint32_field<I>(&mut self, field: u32, values: I)
    where
        I: IntoIterator<Item = u32>,
        I::IntoIter: Clone,
    {
        let iter = values.into_iter();
        let len: usize = iter.clone().map(Sizer::uint32).sum();
        if len == 0 {
            return;
        }
        self.tag(field, WireType::LengthDelimited);
        self.varint(len as u64);
        for value in iter {
            self.uint32(value);
        }
    }
}

/// Read cursor over an immutable byte view.
///
/// Every reader advances the cursor by exactly the bytes the value occupies
/// and fails rather than read past the end of the view. The decoder never
/// mutates the underlying buffer, so independent decoders may scan the same
/// bytes concurrently.
#[derive(Debug)]
pub struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    /// Wraps a byte view, cursor at the start.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// True once the cursor has consumed the whole view.
    pub fn eof(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Consumes `count` bytes, returning them as a sub-view.
    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(count)
            .filter(|&end| end <= self.buf.len())
            .ok_or(DecodeError::Truncated { offset: self.pos })?;
        let view = &self.buf[self.pos..end];
        self.pos = end;
        Ok(view)
    }

    /// Reads one varint.
    pub fn varint(&mut self) -> Result<u64> {
        let start = self.pos;
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let Some(&byte) = self.buf.get(self.pos) else {
                return Err(DecodeError::Truncated { offset: start });
            };
            self.pos += 1;
            value |= u64::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
            if shift >= 64 {
                return Err(DecodeError::VarintOverflow { offset: start });
            }
        }
    }

    /// Reads one tag, returning the field number and wire type.
    pub fn tag(&mut self) -> Result<(u32, WireType)> {
        let offset = self.pos;
        let raw = self.varint()? as u32;
        let wire = WireType::from_code(raw & 7, offset)?;
        Ok((raw >> 3, wire))
    }

    /// Reads a `uint32` value. Varints wider than 32 bits are truncated.
    pub fn uint32(&mut self) -> Result<u32> {
        Ok(self.varint()? as u32)
    }

    /// Reads an `int32` value from its unsigned bit pattern.
    ///
    /// Also accepts the 10-byte sign-extended form canonical encoders emit
    /// for negative values; both truncate to the same 32-bit pattern.
    pub fn int32(&mut self) -> Result<i32> {
        Ok(self.varint()? as i32)
    }

    /// Reads a `bool`: any non-zero varint is true.
    pub fn bool(&mut self) -> Result<bool> {
        Ok(self.varint()? != 0)
    }

    /// Reads a `double` from 8 little-endian bytes.
    pub fn double(&mut self) -> Result<f64> {
        let view = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(view);
        Ok(f64::from_le_bytes(raw))
    }

    /// Reads a length prefix, bounded by [`MAX_FIELD_LEN`].
    fn len_prefix(&mut self) -> Result<usize> {
        let offset = self.pos;
        let len = self.varint()?;
        if len > MAX_FIELD_LEN as u64 {
            return Err(DecodeError::OversizedField { len, offset });
        }
        Ok(len as usize)
    }

    /// Reads a length-delimited `bytes` value.
    pub fn bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.len_prefix()?;
        Ok(self.take(len)?.to_vec())
    }

    /// Reads a length-delimited `string` value, validating UTF-8.
    pub fn string(&mut self) -> Result<String> {
        let len = self.len_prefix()?;
        let offset = self.pos;
        let view = self.take(len)?;
        String::from_utf8(view.to_vec()).map_err(|_| DecodeError::InvalidUtf8 { offset })
    }

    /// Reads a length-delimited nested message.
    pub fn message<M: Message>(&mut self) -> Result<M> {
        let len = self.len_prefix()?;
        let view = self.take(len)?;
        M::decode(view)
    }

    /// Reads one packed block of `uint32` values.
    pub fn packed_uint32(&mut self) -> Result<Vec<u32>> {
        let len = self.len_prefix()?;
        let mut inner = Decoder::new(self.take(len)?);
        let mut values = Vec::new();
        while !inner.eof() {
            values.push(inner.uint32()?);
        }
        Ok(values)
    }

    /// Skips one value of the given wire type without interpreting it.
    ///
    /// This is the forward-compatibility path: fields from a newer schema
    /// are passed over using only the wire type carried in their tag.
    pub fn skip(&mut self, wire: WireType) -> Result<()> {
        match wire {
            WireType::Varint => {
                self.varint()?;
            }
            WireType::Fixed64 => {
                self.take(8)?;
            }
            WireType::LengthDelimited => {
                let len = self.len_prefix()?;
                self.take(len)?;
            }
            WireType::Fixed32 => {
                self.take(4)?;
            }
        }
        Ok(())
    }
}

/// A schema message: sizing, field-ordered encoding, and tag-dispatch decode.
pub trait Message: Default {
    /// Serialized byte length of this value, excluding any enclosing tag.
    ///
    /// Counts exactly the fields `encode` writes: default-valued scalars and
    /// entirely-default nested messages count zero.
    fn encoded_len(&self) -> usize;

    /// Writes the present fields in ascending field-number order.
    fn encode(&self, enc: &mut Encoder);

    /// Merges one decoded field into `self`.
    ///
    /// Implementations dispatch on `field`, verify `wire` against the
    /// schema, and skip unknown field numbers via [`Decoder::skip`].
    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()>;

    /// Serializes this value into a fresh, exactly-sized buffer.
    fn encode_to_vec(&self) -> Vec<u8> {
        let mut enc = Encoder::with_capacity(self.encoded_len());
        self.encode(&mut enc);
        enc.into_bytes()
    }

    /// Decodes one value from `buf`, consuming it entirely.
    fn decode(buf: &[u8]) -> Result<Self> {
        let mut dec = Decoder::new(buf);
        let mut msg = Self::default();
        while !dec.eof() {
            let (field, wire) = dec.tag()?;
            msg.merge_field(field, wire, &mut dec)?;
        }
        Ok(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varint_len_boundaries() {
        assert_eq!(Sizer::varint(0), 1);
        assert_eq!(Sizer::varint(0x7F), 1);
        assert_eq!(Sizer::varint(0x80), 2);
        assert_eq!(Sizer::varint(0x3FFF), 2);
        assert_eq!(Sizer::varint(0x4000), 3);
        assert_eq!(Sizer::uint32(u32::MAX), 5);
        assert_eq!(Sizer::varint(u64::MAX), 10);
    }

    #[test]
    fn int32_sized_as_unsigned_pattern() {
        assert_eq!(Sizer::int32(-1), 5);
        assert_eq!(Sizer::int32(0), 1);
        assert_eq!(Sizer::int32(i32::MIN), 5);
    }

    #[test]
    fn varint_roundtrip() {
        for value in [0u64, 1, 0x7F, 0x80, 300, 0x3FFF, 0x4000, u32::MAX as u64, u64::MAX] {
            let mut enc = Encoder::new();
            enc.varint(value);
            assert_eq!(enc.as_bytes().len(), Sizer::varint(value));
            let mut dec = Decoder::new(enc.as_bytes());
            assert_eq!(dec.varint().unwrap(), value);
            assert!(dec.eof());
        }
    }

    #[test]
    fn varint_wire_layout() {
        // 300 = 0b10_0101100: low group first, continuation bit on the first byte.
        let mut enc = Encoder::new();
        enc.uint32(300);
        assert_eq!(enc.as_bytes(), [0xAC, 0x02]);
    }

    #[test]
    fn int32_negative_roundtrip() {
        let mut enc = Encoder::new();
        enc.int32(-42);
        assert_eq!(enc.as_bytes().len(), 5);
        let mut dec = Decoder::new(enc.as_bytes());
        assert_eq!(dec.int32().unwrap(), -42);
    }

    #[test]
    fn int32_accepts_sign_extended_form() {
        // -1 as a canonical 10-byte sign-extended varint.
        let buf = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01];
        let mut dec = Decoder::new(&buf);
        assert_eq!(dec.int32().unwrap(), -1);
    }

    #[test]
    fn truncated_varint_fails() {
        let mut dec = Decoder::new(&[0x80, 0x80]);
        assert_eq!(dec.varint(), Err(DecodeError::Truncated { offset: 0 }));
    }

    #[test]
    fn unterminated_varint_fails() {
        let buf = [0x80u8; 11];
        let mut dec = Decoder::new(&buf);
        assert_eq!(dec.varint(), Err(DecodeError::VarintOverflow { offset: 0 }));
    }

    #[test]
    fn double_roundtrip() {
        let mut enc = Encoder::new();
        enc.double(6.25);
        assert_eq!(enc.as_bytes().len(), 8);
        let mut dec = Decoder::new(enc.as_bytes());
        assert_eq!(dec.double().unwrap(), 6.25);
    }

    #[test]
    fn tag_splits_field_and_wire() {
        let mut enc = Encoder::new();
        enc.tag(24, WireType::LengthDelimited);
        let mut dec = Decoder::new(enc.as_bytes());
        assert_eq!(dec.tag().unwrap(), (24, WireType::LengthDelimited));
    }

    #[test]
    fn tag_rejects_undefined_wire_type() {
        // Field 1 with wire code 3 (deprecated group start).
        let buf = [1 << 3 | 3];
        let mut dec = Decoder::new(&buf);
        assert_eq!(
            dec.tag(),
            Err(DecodeError::InvalidWireType { code: 3, offset: 0 })
        );
    }

    #[test]
    fn string_field_layout() {
        let mut enc = Encoder::new();
        enc.string_field(24, "hello");
        // tag 24<<3|2 = 0xC2 0x01, length 5, then the content.
        assert_eq!(enc.as_bytes(), [0xC2, 0x01, 5, b'h', b'e', b'l', b'l', b'o']);
    }

    #[test]
    fn string_rejects_invalid_utf8() {
        let mut enc = Encoder::new();
        enc.varint(2);
        enc.bytes(&[0xFF, 0xFE]);
        let mut dec = Decoder::new(enc.as_bytes());
        assert_eq!(dec.string(), Err(DecodeError::InvalidUtf8 { offset: 1 }));
    }

    #[test]
    fn length_prefix_beyond_buffer_fails() {
        // Claims 5 bytes, provides 2.
        let buf = [5, 0xAA, 0xBB];
        let mut dec = Decoder::new(&buf);
        assert_eq!(dec.bytes(), Err(DecodeError::Truncated { offset: 1 }));
    }

    #[test]
    fn oversized_length_prefix_fails() {
        let mut enc = Encoder::new();
        enc.varint(MAX_FIELD_LEN as u64 + 1);
        let mut dec = Decoder::new(enc.as_bytes());
        assert!(matches!(
            dec.bytes(),
            Err(DecodeError::OversizedField { .. })
        ));
    }

    #[test]
    fn skip_advances_past_each_wire_type() {
        let mut enc = Encoder::new();
        enc.varint(300);
        enc.double(1.5);
        enc.varint(3);
        enc.bytes(&[1, 2, 3]);
        enc.bytes(&[9, 9, 9, 9]); // fixed32 raw bytes
        let mut dec = Decoder::new(enc.as_bytes());
        dec.skip(WireType::Varint).unwrap();
        dec.skip(WireType::Fixed64).unwrap();
        dec.skip(WireType::LengthDelimited).unwrap();
        dec.skip(WireType::Fixed32).unwrap();
        assert!(dec.eof());
    }

    #[test]
    fn packed_uint32_roundtrip_preserves_order() {
        let values = [3u32, 4, 130];
        let mut enc = Encoder::new();
        enc.packed_uint32_field(1, values.iter().copied());
        assert_eq!(
            enc.as_bytes().len(),
            Sizer::packed_uint32_field(1, values.iter().copied())
        );
        let mut dec = Decoder::new(enc.as_bytes());
        let (field, wire) = dec.tag().unwrap();
        assert_eq!(field, 1);
        assert_eq!(wire, WireType::LengthDelimited);
        assert_eq!(dec.packed_uint32().unwrap(), vec![3, 4, 130]);
        assert!(dec.eof());
    }

    #[test]
    fn packed_empty_writes_nothing() {
        let mut enc = Encoder::new();
        enc.packed_uint32_field(1, std::iter::empty());
        assert!(enc.as_bytes().is_empty());
        assert_eq!(Sizer::packed_uint32_field(1, std::iter::empty()), 0);
    }

    #[test]
    fn wire_type_expect_mismatch() {
        let err = WireType::Varint
            .expect(WireType::LengthDelimited, 7)
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::TypeMismatch {
                field: 7,
                expected: WireType::LengthDelimited,
                found: WireType::Varint,
            }
        );
    }
}
