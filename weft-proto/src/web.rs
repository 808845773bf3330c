//! Outbound web request payloads.

use crate::codec::{DecodeError, Decoder, Encoder, Message, Result, Sizer, WireType};
use crate::run::ContextItem;

/// HTTP method of an outbound request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HttpVerb {
    /// GET.
    #[default]
    Get = 0,
    /// POST.
    Post = 1,
    /// PUT.
    Put = 2,
    /// DELETE.
    Delete = 3,
}

impl HttpVerb {
    /// Maps a wire enumerant to an `HttpVerb`.
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Get),
            1 => Some(Self::Post),
            2 => Some(Self::Put),
            3 => Some(Self::Delete),
            _ => None,
        }
    }
}

/// One HTTP header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    /// Header name.
    pub name: String,
    /// Header value.
    pub value: String,
}

impl Message for Header {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.name.is_empty() {
            len += Sizer::string_field(1, &self.name);
        }
        if !self.value.is_empty() {
            len += Sizer::string_field(2, &self.value);
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        if !self.name.is_empty() {
            enc.string_field(1, &self.name);
        }
        if !self.value.is_empty() {
            enc.string_field(2, &self.value);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.name = dec.string()?;
            }
            2 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.value = dec.string()?;
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// An outbound web request issued on the plugin's behalf.
///
/// The result arrives later as a web-request-result event carrying the same
/// `context` items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WebRequestPayload {
    /// Request URL.
    pub url: String,
    /// HTTP method.
    pub verb: HttpVerb,
    /// Request headers.
    pub headers: Vec<Header>,
    /// Request body.
    pub body: Vec<u8>,
    /// Correlation context returned with the result event.
    pub context: Vec<ContextItem>,
}

impl Message for WebRequestPayload {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.url.is_empty() {
            len += Sizer::string_field(1, &self.url);
        }
        if self.verb as u32 != 0 {
            len += Sizer::uint32_field(2, self.verb as u32);
        }
        for header in &self.headers {
            len += Sizer::message_elem(3, header.encoded_len());
        }
        if !self.body.is_empty() {
            len += Sizer::bytes_field(4, &self.body);
        }
        for item in &self.context {
            len += Sizer::message_elem(5, item.encoded_len());
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        if !self.url.is_empty() {
            enc.string_field(1, &self.url);
        }
        if self.verb as u32 != 0 {
            enc.uint32_field(2, self.verb as u32);
        }
        for header in &self.headers {
            enc.message_elem(3, header);
        }
        if !self.body.is_empty() {
            enc.bytes_field(4, &self.body);
        }
        for item in &self.context {
            enc.message_elem(5, item);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.url = dec.string()?;
            }
            2 => {
                wire.expect(WireType::Varint, field)?;
                let raw = dec.uint32()?;
                self.verb = HttpVerb::from_u32(raw)
                    .ok_or(DecodeError::InvalidEnum { field, value: raw })?;
            }
            3 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.headers.push(dec.message()?);
            }
            4 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.body = dec.bytes()?;
            }
            5 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.context.push(dec.message()?);
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}
