//! Event subscriptions, input modes, and permission requests.

use crate::codec::{DecodeError, Decoder, Encoder, Message, Result, Sizer, WireType};

/// A host event a plugin can subscribe to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventType {
    /// The input mode changed.
    #[default]
    ModeUpdate = 0,
    /// Tabs were added, removed, renamed, or refocused.
    TabUpdate = 1,
    /// Panes were added, removed, resized, or refocused.
    PaneUpdate = 2,
    /// A key press was routed to the plugin.
    Key = 3,
    /// A mouse event was routed to the plugin.
    Mouse = 4,
    /// A timer set via `SetTimeout` fired.
    Timer = 5,
    /// Text was copied to the clipboard.
    CopyToClipboard = 6,
    /// The system clipboard rejected a copy.
    SystemClipboardFailure = 7,
    /// Raw input arrived while the plugin was focused.
    InputReceived = 8,
    /// The plugin pane became visible or hidden.
    Visible = 9,
    /// Another plugin or worker posted a message.
    CustomMessage = 10,
    /// A watched file was created.
    FileSystemCreate = 11,
    /// A watched file was read.
    FileSystemRead = 12,
    /// A watched file was modified.
    FileSystemUpdate = 13,
    /// A watched file was deleted.
    FileSystemDelete = 14,
    /// The host answered a permission request.
    PermissionRequestResult = 15,
    /// Sessions appeared, disappeared, or changed.
    SessionUpdate = 16,
    /// A command started via `RunCommand` finished.
    RunCommandResult = 17,
    /// A web request started via `WebRequest` finished.
    WebRequestResult = 18,
}

impl EventType {
    /// Maps a wire enumerant to an `EventType`.
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::ModeUpdate),
            1 => Some(Self::TabUpdate),
            2 => Some(Self::PaneUpdate),
            3 => Some(Self::Key),
            4 => Some(Self::Mouse),
            5 => Some(Self::Timer),
            6 => Some(Self::CopyToClipboard),
            7 => Some(Self::SystemClipboardFailure),
            8 => Some(Self::InputReceived),
            9 => Some(Self::Visible),
            10 => Some(Self::CustomMessage),
            11 => Some(Self::FileSystemCreate),
            12 => Some(Self::FileSystemRead),
            13 => Some(Self::FileSystemUpdate),
            14 => Some(Self::FileSystemDelete),
            15 => Some(Self::PermissionRequestResult),
            16 => Some(Self::SessionUpdate),
            17 => Some(Self::RunCommandResult),
            18 => Some(Self::WebRequestResult),
            _ => None,
        }
    }
}

/// The host's modal input state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Keys go to the focused pane.
    #[default]
    Normal = 0,
    /// All keybindings are suspended.
    Locked = 1,
    /// Keys resize the focused pane.
    Resize = 2,
    /// Keys manage panes.
    Pane = 3,
    /// Keys manage tabs.
    Tab = 4,
    /// Keys scroll the focused pane.
    Scroll = 5,
    /// A search term is being entered.
    EnterSearch = 6,
    /// Keys navigate search results.
    Search = 7,
    /// A tab is being renamed.
    RenameTab = 8,
    /// A pane is being renamed.
    RenamePane = 9,
    /// Keys manage the session.
    Session = 10,
    /// Keys move panes between slots.
    Move = 11,
    /// A prompt is awaiting confirmation.
    Prompt = 12,
}

impl InputMode {
    /// Maps a wire enumerant to an `InputMode`.
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Normal),
            1 => Some(Self::Locked),
            2 => Some(Self::Resize),
            3 => Some(Self::Pane),
            4 => Some(Self::Tab),
            5 => Some(Self::Scroll),
            6 => Some(Self::EnterSearch),
            7 => Some(Self::Search),
            8 => Some(Self::RenameTab),
            9 => Some(Self::RenamePane),
            10 => Some(Self::Session),
            11 => Some(Self::Move),
            12 => Some(Self::Prompt),
            _ => None,
        }
    }
}

/// A capability a plugin must be granted before the host honors the
/// commands it gates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PermissionType {
    /// Observe pane, tab, and mode state.
    #[default]
    ReadApplicationState = 0,
    /// Change pane, tab, and mode state.
    ChangeApplicationState = 1,
    /// Open files in an editor pane.
    OpenFiles = 2,
    /// Run commands in command panes.
    RunCommands = 3,
    /// Open terminals or other plugins.
    OpenTerminalsOrPlugins = 4,
    /// Write directly to the focused pane's input.
    WriteToStdin = 5,
    /// Issue outbound web requests.
    WebAccess = 6,
    /// Read input piped in from the CLI.
    ReadCliPipes = 7,
    /// Message or launch other plugins.
    MessageAndLaunchOtherPlugins = 8,
}

impl PermissionType {
    /// Maps a wire enumerant to a `PermissionType`.
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::ReadApplicationState),
            1 => Some(Self::ChangeApplicationState),
            2 => Some(Self::OpenFiles),
            3 => Some(Self::RunCommands),
            4 => Some(Self::OpenTerminalsOrPlugins),
            5 => Some(Self::WriteToStdin),
            6 => Some(Self::WebAccess),
            7 => Some(Self::ReadCliPipes),
            8 => Some(Self::MessageAndLaunchOtherPlugins),
            _ => None,
        }
    }
}

/// An ordered set of event types, encoded packed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventNameList {
    /// The events, in subscription order.
    pub event_types: Vec<EventType>,
}

impl Message for EventNameList {
    fn encoded_len(&self) -> usize {
        Sizer::packed_uint32_field(1, self.event_types.iter().map(|event| *event as u32))
    }

    fn encode(&self, enc: &mut Encoder) {
        enc.packed_uint32_field(1, self.event_types.iter().map(|event| *event as u32));
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => match wire {
                WireType::LengthDelimited => {
                    for raw in dec.packed_uint32()? {
                        self.event_types.push(
                            EventType::from_u32(raw)
                                .ok_or(DecodeError::InvalidEnum { field, value: raw })?,
                        );
                    }
                }
                // A lone unpacked element is also accepted.
                WireType::Varint => {
                    let raw = dec.uint32()?;
                    self.event_types.push(
                        EventType::from_u32(raw)
                            .ok_or(DecodeError::InvalidEnum { field, value: raw })?,
                    );
                }
                _ => {
                    return Err(DecodeError::TypeMismatch {
                        field,
                        expected: WireType::LengthDelimited,
                        found: wire,
                    });
                }
            },
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// Events to start receiving.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubscribePayload {
    /// The subscriptions to add.
    pub subscriptions: Option<EventNameList>,
}

impl Message for SubscribePayload {
    fn encoded_len(&self) -> usize {
        self.subscriptions
            .as_ref()
            .map_or(0, |list| Sizer::message_field(1, list.encoded_len()))
    }

    fn encode(&self, enc: &mut Encoder) {
        if let Some(list) = &self.subscriptions {
            enc.message_field(1, list);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.subscriptions = Some(dec.message()?);
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// Events to stop receiving.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnsubscribePayload {
    /// The subscriptions to drop.
    pub subscriptions: Option<EventNameList>,
}

impl Message for UnsubscribePayload {
    fn encoded_len(&self) -> usize {
        self.subscriptions
            .as_ref()
            .map_or(0, |list| Sizer::message_field(1, list.encoded_len()))
    }

    fn encode(&self, enc: &mut Encoder) {
        if let Some(list) = &self.subscriptions {
            enc.message_field(1, list);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.subscriptions = Some(dec.message()?);
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// Mode for the host to switch into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwitchToModePayload {
    /// The target mode.
    pub input_mode: InputMode,
}

impl Message for SwitchToModePayload {
    fn encoded_len(&self) -> usize {
        if self.input_mode as u32 == 0 {
            0
        } else {
            Sizer::uint32_field(1, self.input_mode as u32)
        }
    }

    fn encode(&self, enc: &mut Encoder) {
        if self.input_mode as u32 != 0 {
            enc.uint32_field(1, self.input_mode as u32);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::Varint, field)?;
                let raw = dec.uint32()?;
                self.input_mode = InputMode::from_u32(raw)
                    .ok_or(DecodeError::InvalidEnum { field, value: raw })?;
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// Permissions the plugin asks the host to grant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestPermissionPayload {
    /// The requested permissions, encoded packed.
    pub permissions: Vec<PermissionType>,
}

impl Message for RequestPermissionPayload {
    fn encoded_len(&self) -> usize {
        Sizer::packed_uint32_field(1, self.permissions.iter().map(|perm| *perm as u32))
    }

    fn encode(&self, enc: &mut Encoder) {
        enc.packed_uint32_field(1, self.permissions.iter().map(|perm| *perm as u32));
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => match wire {
                WireType::LengthDelimited => {
                    for raw in dec.packed_uint32()? {
                        self.permissions.push(
                            PermissionType::from_u32(raw)
                                .ok_or(DecodeError::InvalidEnum { field, value: raw })?,
                        );
                    }
                }
                WireType::Varint => {
                    let raw = dec.uint32()?;
                    self.permissions.push(
                        PermissionType::from_u32(raw)
                            .ok_or(DecodeError::InvalidEnum { field, value: raw })?,
                    );
                }
                _ => {
                    return Err(DecodeError::TypeMismatch {
                        field,
                        expected: WireType::LengthDelimited,
                        found: wire,
                    });
                }
            },
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_list_packed_roundtrip() {
        let list = EventNameList {
            event_types: vec![EventType::Key, EventType::Mouse, EventType::SessionUpdate],
        };
        let bytes = list.encode_to_vec();
        assert_eq!(bytes.len(), list.encoded_len());
        assert_eq!(EventNameList::decode(&bytes).unwrap(), list);
    }

    #[test]
    fn event_list_accepts_unpacked_elements() {
        // Two elements written one tag each instead of a packed block.
        let mut enc = Encoder::new();
        enc.uint32_field(1, EventType::Key as u32);
        enc.uint32_field(1, EventType::Mouse as u32);
        let list = EventNameList::decode(enc.as_bytes()).unwrap();
        assert_eq!(list.event_types, vec![EventType::Key, EventType::Mouse]);
    }

    #[test]
    fn event_list_rejects_unknown_enumerant() {
        let mut enc = Encoder::new();
        enc.packed_uint32_field(1, [3u32, 99]);
        assert_eq!(
            EventNameList::decode(enc.as_bytes()),
            Err(DecodeError::InvalidEnum { field: 1, value: 99 })
        );
    }

    #[test]
    fn empty_subscribe_encodes_to_nothing() {
        let payload = SubscribePayload::default();
        assert_eq!(payload.encoded_len(), 0);
        assert!(payload.encode_to_vec().is_empty());
        assert_eq!(SubscribePayload::decode(&[]).unwrap(), payload);
    }

    #[test]
    fn subscribe_roundtrip() {
        let payload = SubscribePayload {
            subscriptions: Some(EventNameList {
                event_types: vec![EventType::TabUpdate, EventType::PaneUpdate],
            }),
        };
        let bytes = payload.encode_to_vec();
        assert_eq!(SubscribePayload::decode(&bytes).unwrap(), payload);
    }

    #[test]
    fn default_mode_omitted() {
        let payload = SwitchToModePayload {
            input_mode: InputMode::Normal,
        };
        assert_eq!(payload.encoded_len(), 0);
        let decoded = SwitchToModePayload::decode(&[]).unwrap();
        assert_eq!(decoded.input_mode, InputMode::Normal);
    }

    #[test]
    fn mode_roundtrip() {
        let payload = SwitchToModePayload {
            input_mode: InputMode::Locked,
        };
        let bytes = payload.encode_to_vec();
        assert_eq!(SwitchToModePayload::decode(&bytes).unwrap(), payload);
    }

    #[test]
    fn permissions_packed_roundtrip() {
        let payload = RequestPermissionPayload {
            permissions: vec![
                PermissionType::ReadApplicationState,
                PermissionType::RunCommands,
                PermissionType::WebAccess,
            ],
        };
        let bytes = payload.encode_to_vec();
        assert_eq!(bytes.len(), payload.encoded_len());
        assert_eq!(RequestPermissionPayload::decode(&bytes).unwrap(), payload);
    }
}
