//! Pane and tab geometry: directions, resizing, focus, and placement.

use crate::codec::{DecodeError, Decoder, Encoder, Message, Result, Sizer, WireType};

/// Edge of a pane or screen an operation acts toward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Toward the left edge.
    #[default]
    Left = 0,
    /// Toward the right edge.
    Right = 1,
    /// Toward the top edge.
    Up = 2,
    /// Toward the bottom edge.
    Down = 3,
}

impl Direction {
    /// Maps a wire enumerant to a `Direction`.
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Left),
            1 => Some(Self::Right),
            2 => Some(Self::Up),
            3 => Some(Self::Down),
            _ => None,
        }
    }
}

/// Whether a resize grows or shrinks the pane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResizeAction {
    /// Grow the pane.
    #[default]
    Increase = 0,
    /// Shrink the pane.
    Decrease = 1,
}

impl ResizeAction {
    /// Maps a wire enumerant to a `ResizeAction`.
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Increase),
            1 => Some(Self::Decrease),
            _ => None,
        }
    }
}

/// Kind of pane an id refers to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaneType {
    /// A terminal pane.
    #[default]
    Terminal = 0,
    /// A plugin pane.
    Plugin = 1,
}

impl PaneType {
    /// Maps a wire enumerant to a `PaneType`.
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Terminal),
            1 => Some(Self::Plugin),
            _ => None,
        }
    }
}

/// A resize operation: grow or shrink, optionally toward one edge.
///
/// Both fields default to meaningful enumerants (`Increase`, `Left`), so an
/// all-defaults value encodes to zero bytes and is indistinguishable on the
/// wire from a value that was never set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Resize {
    /// Grow or shrink.
    pub resize_action: ResizeAction,
    /// Edge the resize acts toward.
    pub direction: Direction,
}

impl Message for Resize {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if self.resize_action as u32 != 0 {
            len += Sizer::uint32_field(1, self.resize_action as u32);
        }
        if self.direction as u32 != 0 {
            len += Sizer::uint32_field(2, self.direction as u32);
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        if self.resize_action as u32 != 0 {
            enc.uint32_field(1, self.resize_action as u32);
        }
        if self.direction as u32 != 0 {
            enc.uint32_field(2, self.direction as u32);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::Varint, field)?;
                let raw = dec.uint32()?;
                self.resize_action = ResizeAction::from_u32(raw)
                    .ok_or(DecodeError::InvalidEnum { field, value: raw })?;
            }
            2 => {
                wire.expect(WireType::Varint, field)?;
                let raw = dec.uint32()?;
                self.direction = Direction::from_u32(raw)
                    .ok_or(DecodeError::InvalidEnum { field, value: raw })?;
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// Resize to apply to the focused pane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResizePayload {
    /// The resize operation.
    pub resize: Option<Resize>,
}

impl Message for ResizePayload {
    fn encoded_len(&self) -> usize {
        self.resize
            .as_ref()
            .map_or(0, |resize| Sizer::message_field(1, resize.encoded_len()))
    }

    fn encode(&self, enc: &mut Encoder) {
        if let Some(resize) = &self.resize {
            enc.message_field(1, resize);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.resize = Some(dec.message()?);
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// Direction argument shared by focus- and pane-movement commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovePayload {
    /// Where to move.
    pub direction: Direction,
}

impl Message for MovePayload {
    fn encoded_len(&self) -> usize {
        if self.direction as u32 == 0 {
            0
        } else {
            Sizer::uint32_field(1, self.direction as u32)
        }
    }

    fn encode(&self, enc: &mut Encoder) {
        if self.direction as u32 != 0 {
            enc.uint32_field(1, self.direction as u32);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::Varint, field)?;
                let raw = dec.uint32()?;
                self.direction = Direction::from_u32(raw)
                    .ok_or(DecodeError::InvalidEnum { field, value: raw })?;
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// Fully qualified pane id: the kind of pane plus its numeric id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaneId {
    /// Terminal or plugin.
    pub pane_type: PaneType,
    /// Id within that kind.
    pub id: u32,
}

impl Message for PaneId {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if self.pane_type as u32 != 0 {
            len += Sizer::uint32_field(1, self.pane_type as u32);
        }
        if self.id != 0 {
            len += Sizer::uint32_field(2, self.id);
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        if self.pane_type as u32 != 0 {
            enc.uint32_field(1, self.pane_type as u32);
        }
        if self.id != 0 {
            enc.uint32_field(2, self.id);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::Varint, field)?;
                let raw = dec.uint32()?;
                self.pane_type = PaneType::from_u32(raw)
                    .ok_or(DecodeError::InvalidEnum { field, value: raw })?;
            }
            2 => {
                wire.expect(WireType::Varint, field)?;
                self.id = dec.uint32()?;
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// Pane to focus, with a flag to float it at the same time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaneIdAndShouldFloat {
    /// Id of the pane to focus.
    pub pane_id: u32,
    /// Whether the pane should also be floated.
    pub should_float: bool,
}

impl Message for PaneIdAndShouldFloat {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if self.pane_id != 0 {
            len += Sizer::uint32_field(1, self.pane_id);
        }
        if self.should_float {
            len += Sizer::bool_field(2);
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        if self.pane_id != 0 {
            enc.uint32_field(1, self.pane_id);
        }
        if self.should_float {
            enc.bool_field(2, self.should_float);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::Varint, field)?;
                self.pane_id = dec.uint32()?;
            }
            2 => {
                wire.expect(WireType::Varint, field)?;
                self.should_float = dec.bool()?;
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// Rename target: a pane or tab id and its new name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdAndNewName {
    /// Id of the pane or tab being renamed.
    pub id: u32,
    /// The name to apply.
    pub new_name: String,
}

impl Message for IdAndNewName {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if self.id != 0 {
            len += Sizer::uint32_field(1, self.id);
        }
        if !self.new_name.is_empty() {
            len += Sizer::string_field(2, &self.new_name);
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        if self.id != 0 {
            enc.uint32_field(1, self.id);
        }
        if !self.new_name.is_empty() {
            enc.string_field(2, &self.new_name);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::Varint, field)?;
                self.id = dec.uint32()?;
            }
            2 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.new_name = dec.string()?;
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// A coordinate or size given either in cells or as a percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixedOrPercent {
    /// Absolute size in cells.
    Fixed(u32),
    /// Percentage of the available space.
    Percent(u32),
}

/// Wrapper carrying one [`FixedOrPercent`] alternative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedOrPercentValue {
    /// The active alternative, if any.
    pub value: Option<FixedOrPercent>,
}

impl Message for FixedOrPercentValue {
    fn encoded_len(&self) -> usize {
        match self.value {
            Some(FixedOrPercent::Fixed(v)) if v != 0 => Sizer::uint32_field(1, v),
            Some(FixedOrPercent::Percent(v)) if v != 0 => Sizer::uint32_field(2, v),
            _ => 0,
        }
    }

    fn encode(&self, enc: &mut Encoder) {
        match self.value {
            Some(FixedOrPercent::Fixed(v)) if v != 0 => enc.uint32_field(1, v),
            Some(FixedOrPercent::Percent(v)) if v != 0 => enc.uint32_field(2, v),
            _ => {}
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::Varint, field)?;
                self.value = Some(FixedOrPercent::Fixed(dec.uint32()?));
            }
            2 => {
                wire.expect(WireType::Varint, field)?;
                self.value = Some(FixedOrPercent::Percent(dec.uint32()?));
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// Placement of a floating pane; unset axes fall back to host defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FloatingPaneCoordinates {
    /// Horizontal position.
    pub x: Option<FixedOrPercentValue>,
    /// Vertical position.
    pub y: Option<FixedOrPercentValue>,
    /// Pane width.
    pub width: Option<FixedOrPercentValue>,
    /// Pane height.
    pub height: Option<FixedOrPercentValue>,
    /// Whether the pane stays on top of tiled panes.
    pub pinned: Option<bool>,
}

impl Message for FloatingPaneCoordinates {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if let Some(x) = &self.x {
            len += Sizer::message_field(1, x.encoded_len());
        }
        if let Some(y) = &self.y {
            len += Sizer::message_field(2, y.encoded_len());
        }
        if let Some(width) = &self.width {
            len += Sizer::message_field(3, width.encoded_len());
        }
        if let Some(height) = &self.height {
            len += Sizer::message_field(4, height.encoded_len());
        }
        if self.pinned.is_some() {
            len += Sizer::bool_field(5);
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        if let Some(x) = &self.x {
            enc.message_field(1, x);
        }
        if let Some(y) = &self.y {
            enc.message_field(2, y);
        }
        if let Some(width) = &self.width {
            enc.message_field(3, width);
        }
        if let Some(height) = &self.height {
            enc.message_field(4, height);
        }
        if let Some(pinned) = self.pinned {
            enc.bool_field(5, pinned);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.x = Some(dec.message()?);
            }
            2 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.y = Some(dec.message()?);
            }
            3 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.width = Some(dec.message()?);
            }
            4 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.height = Some(dec.message()?);
            }
            5 => {
                wire.expect(WireType::Varint, field)?;
                self.pinned = Some(dec.bool()?);
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// Tab to switch to, by position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwitchTabToPayload {
    /// One-based tab position.
    pub tab_index: u32,
}

impl Message for SwitchTabToPayload {
    fn encoded_len(&self) -> usize {
        if self.tab_index == 0 {
            0
        } else {
            Sizer::uint32_field(1, self.tab_index)
        }
    }

    fn encode(&self, enc: &mut Encoder) {
        if self.tab_index != 0 {
            enc.uint32_field(1, self.tab_index);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::Varint, field)?;
                self.tab_index = dec.uint32()?;
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// Tab to focus by name, optionally creating it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GoToTabNamePayload {
    /// Name of the tab.
    pub tab_name: String,
    /// Create the tab when no tab has that name.
    pub create: bool,
}

impl Message for GoToTabNamePayload {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.tab_name.is_empty() {
            len += Sizer::string_field(1, &self.tab_name);
        }
        if self.create {
            len += Sizer::bool_field(2);
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        if !self.tab_name.is_empty() {
            enc.string_field(1, &self.tab_name);
        }
        if self.create {
            enc.bool_field(2, self.create);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.tab_name = dec.string()?;
            }
            2 => {
                wire.expect(WireType::Varint, field)?;
                self.create = dec.bool()?;
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// Arguments for opening a new tab.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewTabPayload {
    /// Name for the new tab.
    pub name: Option<String>,
    /// Working directory for panes opened in the tab.
    pub cwd: Option<String>,
}

impl Message for NewTabPayload {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if let Some(name) = &self.name {
            len += Sizer::string_field(1, name);
        }
        if let Some(cwd) = &self.cwd {
            len += Sizer::string_field(2, cwd);
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        if let Some(name) = &self.name {
            enc.string_field(1, name);
        }
        if let Some(cwd) = &self.cwd {
            enc.string_field(2, cwd);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.name = Some(dec.string()?);
            }
            2 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.cwd = Some(dec.string()?);
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_default_resize_encodes_to_zero_bytes() {
        let resize = Resize {
            resize_action: ResizeAction::Increase,
            direction: Direction::Left,
        };
        assert_eq!(resize.encoded_len(), 0);
        assert!(resize.encode_to_vec().is_empty());
        // Decoding zero bytes yields the same semantically meaningful defaults.
        let decoded = Resize::decode(&[]).unwrap();
        assert_eq!(decoded.resize_action, ResizeAction::Increase);
        assert_eq!(decoded.direction, Direction::Left);
    }

    #[test]
    fn resize_roundtrip() {
        let resize = Resize {
            resize_action: ResizeAction::Decrease,
            direction: Direction::Down,
        };
        let bytes = resize.encode_to_vec();
        assert_eq!(bytes.len(), resize.encoded_len());
        assert_eq!(Resize::decode(&bytes).unwrap(), resize);
    }

    #[test]
    fn resize_payload_wraps_nested_message() {
        let payload = ResizePayload {
            resize: Some(Resize {
                resize_action: ResizeAction::Decrease,
                direction: Direction::Left,
            }),
        };
        let bytes = payload.encode_to_vec();
        assert_eq!(ResizePayload::decode(&bytes).unwrap(), payload);
    }

    #[test]
    fn empty_nested_resize_is_omitted_entirely() {
        // The inner message is all defaults, so the outer field disappears.
        let payload = ResizePayload {
            resize: Some(Resize::default()),
        };
        assert_eq!(payload.encoded_len(), 0);
        assert!(payload.encode_to_vec().is_empty());
        assert_eq!(ResizePayload::decode(&[]).unwrap().resize, None);
    }

    #[test]
    fn fixed_or_percent_last_wins() {
        // Both alternatives in one buffer: the later tag is the one kept.
        let mut enc = Encoder::new();
        enc.uint32_field(1, 12);
        enc.uint32_field(2, 50);
        let decoded = FixedOrPercentValue::decode(enc.as_bytes()).unwrap();
        assert_eq!(decoded.value, Some(FixedOrPercent::Percent(50)));
    }

    #[test]
    fn floating_coordinates_roundtrip() {
        let coords = FloatingPaneCoordinates {
            x: Some(FixedOrPercentValue {
                value: Some(FixedOrPercent::Fixed(10)),
            }),
            y: Some(FixedOrPercentValue {
                value: Some(FixedOrPercent::Percent(25)),
            }),
            width: None,
            height: Some(FixedOrPercentValue {
                value: Some(FixedOrPercent::Fixed(80)),
            }),
            pinned: Some(true),
        };
        let bytes = coords.encode_to_vec();
        assert_eq!(bytes.len(), coords.encoded_len());
        assert_eq!(FloatingPaneCoordinates::decode(&bytes).unwrap(), coords);
    }

    #[test]
    fn pinned_false_keeps_explicit_presence() {
        let coords = FloatingPaneCoordinates {
            pinned: Some(false),
            ..Default::default()
        };
        let bytes = coords.encode_to_vec();
        assert!(!bytes.is_empty());
        assert_eq!(
            FloatingPaneCoordinates::decode(&bytes).unwrap().pinned,
            Some(false)
        );
    }

    #[test]
    fn id_and_new_name_roundtrip() {
        let rename = IdAndNewName {
            id: 7,
            new_name: "logs".into(),
        };
        let bytes = rename.encode_to_vec();
        assert_eq!(IdAndNewName::decode(&bytes).unwrap(), rename);
    }

    #[test]
    fn unknown_field_is_skipped() {
        let mut enc = Encoder::new();
        enc.uint32_field(1, 3);
        // Field 15 does not exist in SwitchTabToPayload.
        enc.string_field(15, "future");
        let decoded = SwitchTabToPayload::decode(enc.as_bytes()).unwrap();
        assert_eq!(decoded.tab_index, 3);
    }

    #[test]
    fn wire_type_mismatch_is_rejected() {
        // tab_index declared as length-delimited instead of varint.
        let mut enc = Encoder::new();
        enc.string_field(1, "oops");
        assert_eq!(
            SwitchTabToPayload::decode(enc.as_bytes()),
            Err(DecodeError::TypeMismatch {
                field: 1,
                expected: WireType::Varint,
                found: WireType::LengthDelimited,
            })
        );
    }
}
