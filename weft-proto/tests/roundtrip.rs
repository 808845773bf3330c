//! End-to-end envelope scenarios across the full schema.

use weft_proto::{
    CommandLine, CommandName, CommandPayload, ContextItem, DecodeError, Direction, Encoder,
    EventNameList, EventType, FileRef, FixedOrPercent, FixedOrPercentValue,
    FloatingPaneCoordinates, GoToTabNamePayload, Header, HttpVerb, IdAndNewName, Message,
    MovePayload, OpenCommandPanePayload, OpenFilePayload, PaneIdAndShouldFloat, PluginCommand,
    Resize, ResizeAction, ResizePayload, RunCommandPayload, SetTimeoutPayload, SubscribePayload,
    SwitchSessionPayload, WebRequestPayload,
};

/// Builds one envelope per structured payload alternative.
fn structured_commands() -> Vec<PluginCommand> {
    vec![
        PluginCommand::with_payload(
            CommandName::Subscribe,
            CommandPayload::Subscribe(SubscribePayload {
                subscriptions: Some(EventNameList {
                    event_types: vec![EventType::Key, EventType::Mouse],
                }),
            }),
        ),
        PluginCommand::with_payload(
            CommandName::OpenFile,
            CommandPayload::OpenFile(OpenFilePayload {
                file_to_open: Some(FileRef {
                    path: "src/lib.rs".into(),
                    line_number: Some(120),
                    cwd: Some("/project".into()),
                }),
                floating_pane_coordinates: Some(FloatingPaneCoordinates {
                    x: Some(FixedOrPercentValue {
                        value: Some(FixedOrPercent::Percent(10)),
                    }),
                    y: Some(FixedOrPercentValue {
                        value: Some(FixedOrPercent::Fixed(2)),
                    }),
                    width: Some(FixedOrPercentValue {
                        value: Some(FixedOrPercent::Percent(80)),
                    }),
                    height: None,
                    pinned: Some(true),
                }),
            }),
        ),
        PluginCommand::with_payload(
            CommandName::OpenCommandPaneFloating,
            CommandPayload::OpenCommandPaneFloating(OpenCommandPanePayload {
                command: Some(CommandLine {
                    path: "cargo".into(),
                    args: vec!["watch".into(), "-x".into(), "check".into()],
                    cwd: Some("/project".into()),
                }),
                floating_pane_coordinates: None,
            }),
        ),
        PluginCommand::with_payload(
            CommandName::SetTimeout,
            CommandPayload::SetTimeout(SetTimeoutPayload { seconds: 0.5 }),
        ),
        PluginCommand::with_payload(
            CommandName::ResizeWithDirection,
            CommandPayload::ResizeWithDirection(ResizePayload {
                resize: Some(Resize {
                    resize_action: ResizeAction::Decrease,
                    direction: Direction::Up,
                }),
            }),
        ),
        PluginCommand::with_payload(
            CommandName::MoveFocus,
            CommandPayload::MoveFocus(MovePayload {
                direction: Direction::Right,
            }),
        ),
        PluginCommand::with_payload(
            CommandName::GoToTabName,
            CommandPayload::GoToTabName(GoToTabNamePayload {
                tab_name: "editor".into(),
                create: true,
            }),
        ),
        PluginCommand::with_payload(
            CommandName::FocusTerminalPane,
            CommandPayload::FocusTerminalPane(PaneIdAndShouldFloat {
                pane_id: 5,
                should_float: true,
            }),
        ),
        PluginCommand::with_payload(
            CommandName::RenameTab,
            CommandPayload::RenameTab(IdAndNewName {
                id: 1,
                new_name: "scratch".into(),
            }),
        ),
        PluginCommand::with_payload(
            CommandName::SwitchSession,
            CommandPayload::SwitchSession(SwitchSessionPayload {
                name: Some("review".into()),
                tab_position: Some(2),
                pane_id: Some(0),
                pane_id_is_plugin: Some(true),
            }),
        ),
        PluginCommand::with_payload(
            CommandName::RunCommand,
            CommandPayload::RunCommand(RunCommandPayload {
                command_line: vec!["rg".into(), "--json".into(), "todo".into()],
                env_variables: vec![ContextItem {
                    name: "NO_COLOR".into(),
                    value: "1".into(),
                }],
                cwd: "/project".into(),
                context: vec![ContextItem {
                    name: "search_id".into(),
                    value: "17".into(),
                }],
            }),
        ),
        PluginCommand::with_payload(
            CommandName::WebRequest,
            CommandPayload::WebRequest(WebRequestPayload {
                url: "https://api.example.com/v1/items".into(),
                verb: HttpVerb::Put,
                headers: vec![Header {
                    name: "authorization".into(),
                    value: "Bearer token".into(),
                }],
                body: b"{\"done\":true}".to_vec(),
                context: vec![],
            }),
        ),
    ]
}

#[test]
fn structured_envelopes_roundtrip() {
    for command in structured_commands() {
        let bytes = command.encode_to_vec();
        assert_eq!(bytes.len(), command.encoded_len(), "{command:?}");
        assert_eq!(PluginCommand::decode(&bytes).unwrap(), command, "{command:?}");
    }
}

#[test]
fn truncating_any_envelope_by_one_byte_fails() {
    for command in structured_commands() {
        let bytes = command.encode_to_vec();
        let truncated = &bytes[..bytes.len() - 1];
        assert!(
            PluginCommand::decode(truncated).is_err(),
            "truncated decode unexpectedly succeeded: {command:?}"
        );
    }
}

#[test]
fn subscribe_scenario_activates_only_subscribe_alternative() {
    let command = PluginCommand::with_payload(
        CommandName::Subscribe,
        CommandPayload::Subscribe(SubscribePayload {
            subscriptions: Some(EventNameList {
                event_types: vec![EventType::Key, EventType::Mouse],
            }),
        }),
    );
    let decoded = PluginCommand::decode(&command.encode_to_vec()).unwrap();
    assert_eq!(decoded.name, CommandName::Subscribe);
    match decoded.payload {
        Some(CommandPayload::Subscribe(payload)) => {
            let list = payload.subscriptions.unwrap();
            assert_eq!(list.event_types, vec![EventType::Key, EventType::Mouse]);
        }
        other => panic!("wrong payload alternative: {other:?}"),
    }
}

#[test]
fn packed_block_layout_has_no_per_element_tags() {
    let list = EventNameList {
        event_types: vec![EventType::Key, EventType::Mouse],
    };
    // One tag, length 2, then the two enumerants back to back.
    assert_eq!(list.encode_to_vec(), [0x0A, 2, 3, 4]);
}

#[test]
fn recognized_field_unaffected_by_unknown_neighbors() {
    let mut enc = Encoder::new();
    enc.uint32_field(1, CommandName::GoToTab as u32);
    enc.uint32_field(27, 6);
    // Unknown field numbers in every wire shape.
    enc.uint32_field(1000, 5);
    enc.string_field(2000, "ignored");
    enc.double_field(3000, 2.5);
    let decoded = PluginCommand::decode(enc.as_bytes()).unwrap();
    assert_eq!(decoded.name, CommandName::GoToTab);
    assert_eq!(decoded.payload, Some(CommandPayload::GoToTab(6)));
}

#[test]
fn length_prefix_overrunning_buffer_fails() {
    // Field 24 claims 100 bytes but the buffer ends after 3.
    let buf = [0x08, 32, 0xC2, 0x01, 100, b'a', b'b', b'c'];
    assert!(matches!(
        PluginCommand::decode(&buf),
        Err(DecodeError::Truncated { .. })
    ));
}

#[test]
fn empty_buffer_decodes_to_all_defaults() {
    let decoded = PluginCommand::decode(&[]).unwrap();
    assert_eq!(decoded, PluginCommand::default());
}

#[test]
fn decode_error_variants_are_distinct() {
    // Truncated varint.
    assert!(matches!(
        PluginCommand::decode(&[0x08]),
        Err(DecodeError::Truncated { .. })
    ));
    // Wire type 4 is undefined.
    assert!(matches!(
        PluginCommand::decode(&[1 << 3 | 4]),
        Err(DecodeError::InvalidWireType { .. })
    ));
}
