//! The command envelope: one discriminant plus one payload slot.
//!
//! Every request a plugin makes of its host travels as a single
//! [`PluginCommand`]: the command name in field 1 and, for commands that
//! take arguments, exactly one payload alternative in fields 2 through 50.
//! The payload alternatives are mutually exclusive; decoding a second
//! alternative from the same buffer replaces the first.

use crate::codec::{DecodeError, Decoder, Encoder, Message, Result, Sizer, WireType};
use crate::input::{RequestPermissionPayload, SubscribePayload, SwitchToModePayload, UnsubscribePayload};
use crate::pane::{
    GoToTabNamePayload, IdAndNewName, MovePayload, NewTabPayload, PaneIdAndShouldFloat,
    ResizePayload, SwitchTabToPayload,
};
use crate::run::{
    ExecCmdPayload, OpenCommandPanePayload, OpenFilePayload, OpenTerminalPayload,
    RunCommandPayload, SetTimeoutPayload,
};
use crate::session::{
    CliPipeOutputPayload, MessageToPluginPayload, PluginMessagePayload, SwitchSessionPayload,
};
use crate::web::WebRequestPayload;

/// Name of the command a [`PluginCommand`] carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CommandName {
    /// Start receiving the listed events.
    #[default]
    Subscribe = 0,
    /// Stop receiving the listed events.
    Unsubscribe = 1,
    /// Set whether the plugin pane accepts focus.
    SetSelectable = 2,
    /// Ask the host for this plugin's pane, tab, and plugin ids.
    GetPluginIds = 3,
    /// Ask the host for its version string.
    GetHostVersion = 4,
    /// Open a file in an editor pane.
    OpenFile = 5,
    /// Open a file in a floating editor pane.
    OpenFileFloating = 6,
    /// Open a terminal pane.
    OpenTerminal = 7,
    /// Open a floating terminal pane.
    OpenTerminalFloating = 8,
    /// Open a pane running a command.
    OpenCommandPane = 9,
    /// Open a floating pane running a command.
    OpenCommandPaneFloating = 10,
    /// Focus the tab at a position.
    SwitchTabTo = 11,
    /// Fire a timer event after a delay.
    SetTimeout = 12,
    /// Execute a command detached from any pane.
    ExecCmd = 13,
    /// Post a message to this plugin's workers.
    PostMessageTo = 14,
    /// Post a message to this plugin's main thread.
    PostMessageToPlugin = 15,
    /// Hide the plugin pane.
    HideSelf = 16,
    /// Reveal the plugin pane.
    ShowSelf = 17,
    /// Switch the host's input mode.
    SwitchToMode = 18,
    /// Open tabs from a layout description.
    NewTabsWithLayout = 19,
    /// Open a new tab.
    NewTab = 20,
    /// Focus the next tab.
    GoToNextTab = 21,
    /// Focus the previous tab.
    GoToPreviousTab = 22,
    /// Resize the focused pane.
    Resize = 23,
    /// Resize the focused pane toward an edge.
    ResizeWithDirection = 24,
    /// Focus the next pane.
    FocusNextPane = 25,
    /// Focus the previous pane.
    FocusPreviousPane = 26,
    /// Move focus toward an edge.
    MoveFocus = 27,
    /// Move focus toward an edge, crossing to the adjacent tab at the screen edge.
    MoveFocusOrTab = 28,
    /// Detach the client from the session.
    Detach = 29,
    /// Open the focused pane's scrollback in the editor.
    EditScrollback = 30,
    /// Write bytes to the focused pane's input.
    Write = 31,
    /// Write characters to the focused pane's input.
    WriteChars = 32,
    /// Toggle between the two most recent tabs.
    ToggleTab = 33,
    /// Move the focused pane to the next slot.
    MovePane = 34,
    /// Move the focused pane toward an edge.
    MovePaneWithDirection = 35,
    /// Clear the focused pane's scrollback.
    ClearScreen = 36,
    /// Scroll the focused pane up one line.
    ScrollUp = 37,
    /// Scroll the focused pane down one line.
    ScrollDown = 38,
    /// Scroll the focused pane to the top.
    ScrollToTop = 39,
    /// Scroll the focused pane to the bottom.
    ScrollToBottom = 40,
    /// Scroll the focused pane up one page.
    PageScrollUp = 41,
    /// Scroll the focused pane down one page.
    PageScrollDown = 42,
    /// Toggle fullscreen on the focused pane.
    ToggleFocusFullscreen = 43,
    /// Toggle pane frames on or off.
    TogglePaneFrames = 44,
    /// Toggle the focused pane between tiled and floating.
    TogglePaneEmbedOrEject = 45,
    /// Undo the last pane rename.
    UndoRenamePane = 46,
    /// Close the focused pane.
    CloseFocus = 47,
    /// Toggle synchronized input across the active tab.
    ToggleActiveTabSync = 48,
    /// Close the focused tab.
    CloseFocusedTab = 49,
    /// Undo the last tab rename.
    UndoRenameTab = 50,
    /// End the session.
    QuitSession = 51,
    /// Apply the previous swap layout.
    PreviousSwapLayout = 52,
    /// Apply the next swap layout.
    NextSwapLayout = 53,
    /// Focus a tab by name.
    GoToTabName = 54,
    /// Focus a tab by name, creating it if missing.
    FocusOrCreateTab = 55,
    /// Focus a tab by position.
    GoToTab = 56,
    /// Start a plugin, or reload it if already running.
    StartOrReloadPlugin = 57,
    /// Close a terminal pane by id.
    CloseTerminalPane = 58,
    /// Close a plugin pane by id.
    ClosePluginPane = 59,
    /// Focus a terminal pane by id.
    FocusTerminalPane = 60,
    /// Focus a plugin pane by id.
    FocusPluginPane = 61,
    /// Rename a terminal pane.
    RenameTerminalPane = 62,
    /// Rename a plugin pane.
    RenamePluginPane = 63,
    /// Rename a tab.
    RenameTab = 64,
    /// Report a plugin panic to the host.
    ReportPanic = 65,
    /// Ask the host to grant permissions.
    RequestPluginPermissions = 66,
    /// Attach to another session.
    SwitchSession = 67,
    /// Open a terminal pane in place of the plugin pane.
    OpenTerminalInPlace = 68,
    /// Open a command pane in place of the plugin pane.
    OpenCommandPaneInPlace = 69,
    /// Open a file in place of the plugin pane.
    OpenFileInPlace = 70,
    /// Run a command in the background and report its result.
    RunCommand = 71,
    /// Issue an outbound web request.
    WebRequest = 72,
    /// Delete a dead session by name.
    DeleteDeadSession = 73,
    /// Delete every dead session.
    DeleteAllDeadSessions = 74,
    /// Rename the current session.
    RenameSession = 75,
    /// Resume input on a CLI pipe.
    UnblockCliPipeInput = 76,
    /// Pause input on a CLI pipe.
    BlockCliPipeInput = 77,
    /// Write output to a CLI pipe.
    CliPipeOutput = 78,
    /// Send a message to another plugin.
    MessageToPlugin = 79,
}

impl CommandName {
    /// Maps a wire enumerant to a `CommandName`.
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Subscribe),
            1 => Some(Self::Unsubscribe),
            2 => Some(Self::SetSelectable),
            3 => Some(Self::GetPluginIds),
            4 => Some(Self::GetHostVersion),
            5 => Some(Self::OpenFile),
            6 => Some(Self::OpenFileFloating),
            7 => Some(Self::OpenTerminal),
            8 => Some(Self::OpenTerminalFloating),
            9 => Some(Self::OpenCommandPane),
            10 => Some(Self::OpenCommandPaneFloating),
            11 => Some(Self::SwitchTabTo),
            12 => Some(Self::SetTimeout),
            13 => Some(Self::ExecCmd),
            14 => Some(Self::PostMessageTo),
            15 => Some(Self::PostMessageToPlugin),
            16 => Some(Self::HideSelf),
            17 => Some(Self::ShowSelf),
            18 => Some(Self::SwitchToMode),
            19 => Some(Self::NewTabsWithLayout),
            20 => Some(Self::NewTab),
            21 => Some(Self::GoToNextTab),
            22 => Some(Self::GoToPreviousTab),
            23 => Some(Self::Resize),
            24 => Some(Self::ResizeWithDirection),
            25 => Some(Self::FocusNextPane),
            26 => Some(Self::FocusPreviousPane),
            27 => Some(Self::MoveFocus),
            28 => Some(Self::MoveFocusOrTab),
            29 => Some(Self::Detach),
            30 => Some(Self::EditScrollback),
            31 => Some(Self::Write),
            32 => Some(Self::WriteChars),
            33 => Some(Self::ToggleTab),
            34 => Some(Self::MovePane),
            35 => Some(Self::MovePaneWithDirection),
            36 => Some(Self::ClearScreen),
            37 => Some(Self::ScrollUp),
            38 => Some(Self::ScrollDown),
            39 => Some(Self::ScrollToTop),
            40 => Some(Self::ScrollToBottom),
            41 => Some(Self::PageScrollUp),
            42 => Some(Self::PageScrollDown),
            43 => Some(Self::ToggleFocusFullscreen),
            44 => Some(Self::TogglePaneFrames),
            45 => Some(Self::TogglePaneEmbedOrEject),
            46 => Some(Self::UndoRenamePane),
            47 => Some(Self::CloseFocus),
            48 => Some(Self::ToggleActiveTabSync),
            49 => Some(Self::CloseFocusedTab),
            50 => Some(Self::UndoRenameTab),
            51 => Some(Self::QuitSession),
            52 => Some(Self::PreviousSwapLayout),
            53 => Some(Self::NextSwapLayout),
            54 => Some(Self::GoToTabName),
            55 => Some(Self::FocusOrCreateTab),
            56 => Some(Self::GoToTab),
            57 => Some(Self::StartOrReloadPlugin),
            58 => Some(Self::CloseTerminalPane),
            59 => Some(Self::ClosePluginPane),
            60 => Some(Self::FocusTerminalPane),
            61 => Some(Self::FocusPluginPane),
            62 => Some(Self::RenameTerminalPane),
            63 => Some(Self::RenamePluginPane),
            64 => Some(Self::RenameTab),
            65 => Some(Self::ReportPanic),
            66 => Some(Self::RequestPluginPermissions),
            67 => Some(Self::SwitchSession),
            68 => Some(Self::OpenTerminalInPlace),
            69 => Some(Self::OpenCommandPaneInPlace),
            70 => Some(Self::OpenFileInPlace),
            71 => Some(Self::RunCommand),
            72 => Some(Self::WebRequest),
            73 => Some(Self::DeleteDeadSession),
            74 => Some(Self::DeleteAllDeadSessions),
            75 => Some(Self::RenameSession),
            76 => Some(Self::UnblockCliPipeInput),
            77 => Some(Self::BlockCliPipeInput),
            78 => Some(Self::CliPipeOutput),
            79 => Some(Self::MessageToPlugin),
            _ => None,
        }
    }
}

/// The payload slot of a [`PluginCommand`]; at most one alternative is
/// active at a time.
///
/// Scalar alternatives follow the same default-omission rule as plain
/// fields: a `false` bool, empty string, empty byte blob, zero integer, or
/// entirely-default nested message writes nothing, so such a payload is
/// absent after a round trip. The bool-carrying commands only convey
/// information in their `true` case; the command name alone already says
/// the command was issued.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandPayload {
    /// Field 2: events to subscribe to.
    Subscribe(SubscribePayload),
    /// Field 3: events to unsubscribe from.
    Unsubscribe(UnsubscribePayload),
    /// Field 4: whether the plugin pane accepts focus.
    SetSelectable(bool),
    /// Field 5: file to open.
    OpenFile(OpenFilePayload),
    /// Field 6: file to open floating.
    OpenFileFloating(OpenFilePayload),
    /// Field 7: terminal to open.
    OpenTerminal(OpenTerminalPayload),
    /// Field 8: terminal to open floating.
    OpenTerminalFloating(OpenTerminalPayload),
    /// Field 9: command pane to open.
    OpenCommandPane(OpenCommandPanePayload),
    /// Field 10: command pane to open floating.
    OpenCommandPaneFloating(OpenCommandPanePayload),
    /// Field 11: tab position to focus.
    SwitchTabTo(SwitchTabToPayload),
    /// Field 12: timer delay.
    SetTimeout(SetTimeoutPayload),
    /// Field 13: command to execute.
    ExecCmd(ExecCmdPayload),
    /// Field 14: message for this plugin's workers.
    PostMessageTo(PluginMessagePayload),
    /// Field 15: message for this plugin's main thread.
    PostMessageToPlugin(PluginMessagePayload),
    /// Field 16: whether to float the pane when it was hidden.
    ShowSelf(bool),
    /// Field 17: mode to switch into.
    SwitchToMode(SwitchToModePayload),
    /// Field 18: layout description for the new tabs.
    NewTabsWithLayout(String),
    /// Field 19: resize to apply.
    Resize(ResizePayload),
    /// Field 20: directional resize to apply.
    ResizeWithDirection(ResizePayload),
    /// Field 21: direction to move focus.
    MoveFocus(MovePayload),
    /// Field 22: direction to move focus, crossing tabs.
    MoveFocusOrTab(MovePayload),
    /// Field 23: bytes for the focused pane's input.
    Write(Vec<u8>),
    /// Field 24: characters for the focused pane's input.
    WriteChars(String),
    /// Field 25: direction to move the pane.
    MovePaneWithDirection(MovePayload),
    /// Field 26: tab name to focus or create.
    GoToTabName(GoToTabNamePayload),
    /// Field 27: tab position to focus.
    GoToTab(u32),
    /// Field 28: plugin location to start or reload.
    StartOrReloadPlugin(String),
    /// Field 29: terminal pane to close.
    CloseTerminalPane(u32),
    /// Field 30: plugin pane to close.
    ClosePluginPane(u32),
    /// Field 31: terminal pane to focus.
    FocusTerminalPane(PaneIdAndShouldFloat),
    /// Field 32: plugin pane to focus.
    FocusPluginPane(PaneIdAndShouldFloat),
    /// Field 33: terminal pane rename.
    RenameTerminalPane(IdAndNewName),
    /// Field 34: plugin pane rename.
    RenamePluginPane(IdAndNewName),
    /// Field 35: tab rename.
    RenameTab(IdAndNewName),
    /// Field 36: panic report text.
    ReportPanic(String),
    /// Field 37: permissions to request.
    RequestPermissions(RequestPermissionPayload),
    /// Field 38: session switch target.
    SwitchSession(SwitchSessionPayload),
    /// Field 39: file to open in place.
    OpenFileInPlace(OpenFilePayload),
    /// Field 40: terminal to open in place.
    OpenTerminalInPlace(OpenTerminalPayload),
    /// Field 41: command pane to open in place.
    OpenCommandPaneInPlace(OpenCommandPanePayload),
    /// Field 42: background command to run.
    RunCommand(RunCommandPayload),
    /// Field 43: web request to issue.
    WebRequest(WebRequestPayload),
    /// Field 44: dead session to delete.
    DeleteDeadSession(String),
    /// Field 45: new session name.
    RenameSession(String),
    /// Field 46: pipe to unblock.
    UnblockCliPipeInput(String),
    /// Field 47: pipe to block.
    BlockCliPipeInput(String),
    /// Field 48: pipe output to write.
    CliPipeOutput(CliPipeOutputPayload),
    /// Field 49: message for another plugin.
    MessageToPlugin(MessageToPluginPayload),
    /// Field 50: new tab arguments.
    NewTab(NewTabPayload),
}

impl CommandPayload {
    /// Serialized length of this alternative, including its tag.
    fn encoded_len(&self) -> usize {
        match self {
            Self::Subscribe(m) => Sizer::message_field(2, m.encoded_len()),
            Self::Unsubscribe(m) => Sizer::message_field(3, m.encoded_len()),
            Self::SetSelectable(v) => {
                if *v {
                    Sizer::bool_field(4)
                } else {
                    0
                }
            }
            Self::OpenFile(m) => Sizer::message_field(5, m.encoded_len()),
            Self::OpenFileFloating(m) => Sizer::message_field(6, m.encoded_len()),
            Self::OpenTerminal(m) => Sizer::message_field(7, m.encoded_len()),
            Self::OpenTerminalFloating(m) => Sizer::message_field(8, m.encoded_len()),
            Self::OpenCommandPane(m) => Sizer::message_field(9, m.encoded_len()),
            Self::OpenCommandPaneFloating(m) => Sizer::message_field(10, m.encoded_len()),
            Self::SwitchTabTo(m) => Sizer::message_field(11, m.encoded_len()),
            Self::SetTimeout(m) => Sizer::message_field(12, m.encoded_len()),
            Self::ExecCmd(m) => Sizer::message_field(13, m.encoded_len()),
            Self::PostMessageTo(m) => Sizer::message_field(14, m.encoded_len()),
            Self::PostMessageToPlugin(m) => Sizer::message_field(15, m.encoded_len()),
            Self::ShowSelf(v) => {
                if *v {
                    Sizer::bool_field(16)
                } else {
                    0
                }
            }
            Self::SwitchToMode(m) => Sizer::message_field(17, m.encoded_len()),
            Self::NewTabsWithLayout(s) => {
                if s.is_empty() {
                    0
                } else {
                    Sizer::string_field(18, s)
                }
            }
            Self::Resize(m) => Sizer::message_field(19, m.encoded_len()),
            Self::ResizeWithDirection(m) => Sizer::message_field(20, m.encoded_len()),
            Self::MoveFocus(m) => Sizer::message_field(21, m.encoded_len()),
            Self::MoveFocusOrTab(m) => Sizer::message_field(22, m.encoded_len()),
            Self::Write(b) => {
                if b.is_empty() {
                    0
                } else {
                    Sizer::bytes_field(23, b)
                }
            }
            Self::WriteChars(s) => {
                if s.is_empty() {
                    0
                } else {
                    Sizer::string_field(24, s)
                }
            }
            Self::MovePaneWithDirection(m) => Sizer::message_field(25, m.encoded_len()),
            Self::GoToTabName(m) => Sizer::message_field(26, m.encoded_len()),
            Self::GoToTab(v) => {
                if *v == 0 {
                    0
                } else {
                    Sizer::uint32_field(27, *v)
                }
            }
            Self::StartOrReloadPlugin(s) => {
                if s.is_empty() {
                    0
                } else {
                    Sizer::string_field(28, s)
                }
            }
            Self::CloseTerminalPane(v) => {
                if *v == 0 {
                    0
                } else {
                    Sizer::uint32_field(29, *v)
                }
            }
            Self::ClosePluginPane(v) => {
                if *v == 0 {
                    0
                } else {
                    Sizer::uint32_field(30, *v)
                }
            }
            Self::FocusTerminalPane(m) => Sizer::message_field(31, m.encoded_len()),
            Self::FocusPluginPane(m) => Sizer::message_field(32, m.encoded_len()),
            Self::RenameTerminalPane(m) => Sizer::message_field(33, m.encoded_len()),
            Self::RenamePluginPane(m) => Sizer::message_field(34, m.encoded_len()),
            Self::RenameTab(m) => Sizer::message_field(35, m.encoded_len()),
            Self::ReportPanic(s) => {
                if s.is_empty() {
                    0
                } else {
                    Sizer::string_field(36, s)
                }
            }
            Self::RequestPermissions(m) => Sizer::message_field(37, m.encoded_len()),
            Self::SwitchSession(m) => Sizer::message_field(38, m.encoded_len()),
            Self::OpenFileInPlace(m) => Sizer::message_field(39, m.encoded_len()),
            Self::OpenTerminalInPlace(m) => Sizer::message_field(40, m.encoded_len()),
            Self::OpenCommandPaneInPlace(m) => Sizer::message_field(41, m.encoded_len()),
            Self::RunCommand(m) => Sizer::message_field(42, m.encoded_len()),
            Self::WebRequest(m) => Sizer::message_field(43, m.encoded_len()),
            Self::DeleteDeadSession(s) => {
                if s.is_empty() {
                    0
                } else {
                    Sizer::string_field(44, s)
                }
            }
            Self::RenameSession(s) => {
                if s.is_empty() {
                    0
                } else {
                    Sizer::string_field(45, s)
                }
            }
            Self::UnblockCliPipeInput(s) => {
                if s.is_empty() {
                    0
                } else {
                    Sizer::string_field(46, s)
                }
            }
            Self::BlockCliPipeInput(s) => {
                if s.is_empty() {
                    0
                } else {
                    Sizer::string_field(47, s)
                }
            }
            Self::CliPipeOutput(m) => Sizer::message_field(48, m.encoded_len()),
            Self::MessageToPlugin(m) => Sizer::message_field(49, m.encoded_len()),
            Self::NewTab(m) => Sizer::message_field(50, m.encoded_len()),
        }
    }

    /// Writes this alternative, tag included.
    fn encode(&self, enc: &mut Encoder) {
        match self {
            Self::Subscribe(m) => enc.message_field(2, m),
            Self::Unsubscribe(m) => enc.message_field(3, m),
            Self::SetSelectable(v) => {
                if *v {
                    enc.bool_field(4, *v);
                }
            }
            Self::OpenFile(m) => enc.message_field(5, m),
            Self::OpenFileFloating(m) => enc.message_field(6, m),
            Self::OpenTerminal(m) => enc.message_field(7, m),
            Self::OpenTerminalFloating(m) => enc.message_field(8, m),
            Self::OpenCommandPane(m) => enc.message_field(9, m),
            Self::OpenCommandPaneFloating(m) => enc.message_field(10, m),
            Self::SwitchTabTo(m) => enc.message_field(11, m),
            Self::SetTimeout(m) => enc.message_field(12, m),
            Self::ExecCmd(m) => enc.message_field(13, m),
            Self::PostMessageTo(m) => enc.message_field(14, m),
            Self::PostMessageToPlugin(m) => enc.message_field(15, m),
            Self::ShowSelf(v) => {
                if *v {
                    enc.bool_field(16, *v);
                }
            }
            Self::SwitchToMode(m) => enc.message_field(17, m),
            Self::NewTabsWithLayout(s) => {
                if !s.is_empty() {
                    enc.string_field(18, s);
                }
            }
            Self::Resize(m) => enc.message_field(19, m),
            Self::ResizeWithDirection(m) => enc.message_field(20, m),
            Self::MoveFocus(m) => enc.message_field(21, m),
            Self::MoveFocusOrTab(m) => enc.message_field(22, m),
            Self::Write(b) => {
                if !b.is_empty() {
                    enc.bytes_field(23, b);
                }
            }
            Self::WriteChars(s) => {
                if !s.is_empty() {
                    enc.string_field(24, s);
                }
            }
            Self::MovePaneWithDirection(m) => enc.message_field(25, m),
            Self::GoToTabName(m) => enc.message_field(26, m),
            Self::GoToTab(v) => {
                if *v != 0 {
                    enc.uint32_field(27, *v);
                }
            }
            Self::StartOrReloadPlugin(s) => {
                if !s.is_empty() {
                    enc.string_field(28, s);
                }
            }
            Self::CloseTerminalPane(v) => {
                if *v != 0 {
                    enc.uint32_field(29, *v);
                }
            }
            Self::ClosePluginPane(v) => {
                if *v != 0 {
                    enc.uint32_field(30, *v);
                }
            }
            Self::FocusTerminalPane(m) => enc.message_field(31, m),
            Self::FocusPluginPane(m) => enc.message_field(32, m),
            Self::RenameTerminalPane(m) => enc.message_field(33, m),
            Self::RenamePluginPane(m) => enc.message_field(34, m),
            Self::RenameTab(m) => enc.message_field(35, m),
            Self::ReportPanic(s) => {
                if !s.is_empty() {
                    enc.string_field(36, s);
                }
            }
            Self::RequestPermissions(m) => enc.message_field(37, m),
            Self::SwitchSession(m) => enc.message_field(38, m),
            Self::OpenFileInPlace(m) => enc.message_field(39, m),
            Self::OpenTerminalInPlace(m) => enc.message_field(40, m),
            Self::OpenCommandPaneInPlace(m) => enc.message_field(41, m),
            Self::RunCommand(m) => enc.message_field(42, m),
            Self::WebRequest(m) => enc.message_field(43, m),
            Self::DeleteDeadSession(s) => {
                if !s.is_empty() {
                    enc.string_field(44, s);
                }
            }
            Self::RenameSession(s) => {
                if !s.is_empty() {
                    enc.string_field(45, s);
                }
            }
            Self::UnblockCliPipeInput(s) => {
                if !s.is_empty() {
                    enc.string_field(46, s);
                }
            }
            Self::BlockCliPipeInput(s) => {
                if !s.is_empty() {
                    enc.string_field(47, s);
                }
            }
            Self::CliPipeOutput(m) => enc.message_field(48, m),
            Self::MessageToPlugin(m) => enc.message_field(49, m),
            Self::NewTab(m) => enc.message_field(50, m),
        }
    }
}

/// The top-level command envelope a plugin sends to its host.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PluginCommand {
    /// Which command is being issued.
    pub name: CommandName,
    /// Command arguments; `None` for commands that take none.
    pub payload: Option<CommandPayload>,
}

impl PluginCommand {
    /// An envelope with no payload.
    pub fn new(name: CommandName) -> Self {
        Self {
            name,
            payload: None,
        }
    }

    /// An envelope carrying the given payload.
    pub fn with_payload(name: CommandName, payload: CommandPayload) -> Self {
        Self {
            name,
            payload: Some(payload),
        }
    }
}

impl Message for PluginCommand {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if self.name as u32 != 0 {
            len += Sizer::uint32_field(1, self.name as u32);
        }
        if let Some(payload) = &self.payload {
            len += payload.encoded_len();
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        if self.name as u32 != 0 {
            enc.uint32_field(1, self.name as u32);
        }
        if let Some(payload) = &self.payload {
            payload.encode(enc);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        // Fields 2..=50 are the payload alternatives; each assignment
        // replaces whatever alternative an earlier tag selected.
        match field {
            1 => {
                wire.expect(WireType::Varint, field)?;
                let raw = dec.uint32()?;
                self.name = CommandName::from_u32(raw)
                    .ok_or(DecodeError::InvalidEnum { field, value: raw })?;
            }
            2 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::Subscribe(dec.message()?));
            }
            3 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::Unsubscribe(dec.message()?));
            }
            4 => {
                wire.expect(WireType::Varint, field)?;
                self.payload = Some(CommandPayload::SetSelectable(dec.bool()?));
            }
            5 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::OpenFile(dec.message()?));
            }
            6 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::OpenFileFloating(dec.message()?));
            }
            7 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::OpenTerminal(dec.message()?));
            }
            8 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::OpenTerminalFloating(dec.message()?));
            }
            9 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::OpenCommandPane(dec.message()?));
            }
            10 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::OpenCommandPaneFloating(dec.message()?));
            }
            11 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::SwitchTabTo(dec.message()?));
            }
            12 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::SetTimeout(dec.message()?));
            }
            13 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::ExecCmd(dec.message()?));
            }
            14 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::PostMessageTo(dec.message()?));
            }
            15 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::PostMessageToPlugin(dec.message()?));
            }
            16 => {
                wire.expect(WireType::Varint, field)?;
                self.payload = Some(CommandPayload::ShowSelf(dec.bool()?));
            }
            17 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::SwitchToMode(dec.message()?));
            }
            18 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::NewTabsWithLayout(dec.string()?));
            }
            19 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::Resize(dec.message()?));
            }
            20 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::ResizeWithDirection(dec.message()?));
            }
            21 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::MoveFocus(dec.message()?));
            }
            22 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::MoveFocusOrTab(dec.message()?));
            }
            23 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::Write(dec.bytes()?));
            }
            24 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::WriteChars(dec.string()?));
            }
            25 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::MovePaneWithDirection(dec.message()?));
            }
            26 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::GoToTabName(dec.message()?));
            }
            27 => {
                wire.expect(WireType::Varint, field)?;
                self.payload = Some(CommandPayload::GoToTab(dec.uint32()?));
            }
            28 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::StartOrReloadPlugin(dec.string()?));
            }
            29 => {
                wire.expect(WireType::Varint, field)?;
                self.payload = Some(CommandPayload::CloseTerminalPane(dec.uint32()?));
            }
            30 => {
                wire.expect(WireType::Varint, field)?;
                self.payload = Some(CommandPayload::ClosePluginPane(dec.uint32()?));
            }
            31 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::FocusTerminalPane(dec.message()?));
            }
            32 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::FocusPluginPane(dec.message()?));
            }
            33 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::RenameTerminalPane(dec.message()?));
            }
            34 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::RenamePluginPane(dec.message()?));
            }
            35 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::RenameTab(dec.message()?));
            }
            36 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::ReportPanic(dec.string()?));
            }
            37 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::RequestPermissions(dec.message()?));
            }
            38 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::SwitchSession(dec.message()?));
            }
            39 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::OpenFileInPlace(dec.message()?));
            }
            40 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::OpenTerminalInPlace(dec.message()?));
            }
            41 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::OpenCommandPaneInPlace(dec.message()?));
            }
            42 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::RunCommand(dec.message()?));
            }
            43 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::WebRequest(dec.message()?));
            }
            44 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::DeleteDeadSession(dec.string()?));
            }
            45 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::RenameSession(dec.string()?));
            }
            46 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::UnblockCliPipeInput(dec.string()?));
            }
            47 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::BlockCliPipeInput(dec.string()?));
            }
            48 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::CliPipeOutput(dec.message()?));
            }
            49 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::MessageToPlugin(dec.message()?));
            }
            50 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.payload = Some(CommandPayload::NewTab(dec.message()?));
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{EventNameList, EventType};

    #[test]
    fn subscribe_envelope_roundtrip() {
        let command = PluginCommand::with_payload(
            CommandName::Subscribe,
            CommandPayload::Subscribe(SubscribePayload {
                subscriptions: Some(EventNameList {
                    event_types: vec![EventType::Key, EventType::Mouse],
                }),
            }),
        );
        let bytes = command.encode_to_vec();
        assert_eq!(bytes.len(), command.encoded_len());
        let decoded = PluginCommand::decode(&bytes).unwrap();
        assert_eq!(decoded, command);
        assert!(matches!(
            decoded.payload,
            Some(CommandPayload::Subscribe(_))
        ));
    }

    #[test]
    fn write_chars_envelope_byte_layout() {
        let command = PluginCommand::with_payload(
            CommandName::WriteChars,
            CommandPayload::WriteChars("hello".into()),
        );
        let bytes = command.encode_to_vec();
        // name = 32 in field 1, then field 24 length-delimited: tag
        // (24 << 3 | 2 = 0xC2 0x01), length 5, the characters.
        assert_eq!(
            bytes,
            [0x08, 32, 0xC2, 0x01, 5, b'h', b'e', b'l', b'l', b'o']
        );
        assert_eq!(PluginCommand::decode(&bytes).unwrap(), command);
    }

    #[test]
    fn payloadless_command_roundtrip() {
        let command = PluginCommand::new(CommandName::ToggleTab);
        let bytes = command.encode_to_vec();
        let decoded = PluginCommand::decode(&bytes).unwrap();
        assert_eq!(decoded.name, CommandName::ToggleTab);
        assert_eq!(decoded.payload, None);
    }

    #[test]
    fn default_envelope_is_zero_bytes() {
        let command = PluginCommand::default();
        assert_eq!(command.encoded_len(), 0);
        assert!(command.encode_to_vec().is_empty());
        assert_eq!(PluginCommand::decode(&[]).unwrap(), command);
    }

    #[test]
    fn false_bool_payload_vanishes_on_the_wire() {
        // Only the discriminant survives; the false payload writes nothing.
        let command = PluginCommand::with_payload(
            CommandName::SetSelectable,
            CommandPayload::SetSelectable(false),
        );
        let bytes = command.encode_to_vec();
        assert_eq!(bytes, [0x08, 2]);
        let decoded = PluginCommand::decode(&bytes).unwrap();
        assert_eq!(decoded.name, CommandName::SetSelectable);
        assert_eq!(decoded.payload, None);
    }

    #[test]
    fn true_bool_payload_roundtrip() {
        let command = PluginCommand::with_payload(
            CommandName::SetSelectable,
            CommandPayload::SetSelectable(true),
        );
        let decoded = PluginCommand::decode(&command.encode_to_vec()).unwrap();
        assert_eq!(decoded.payload, Some(CommandPayload::SetSelectable(true)));
    }

    #[test]
    fn oneof_last_alternative_wins() {
        // Two alternatives in one buffer: WriteChars then Write.
        let mut enc = Encoder::new();
        enc.uint32_field(1, CommandName::Write as u32);
        enc.string_field(24, "first");
        enc.bytes_field(23, b"second");
        let decoded = PluginCommand::decode(enc.as_bytes()).unwrap();
        assert_eq!(decoded.payload, Some(CommandPayload::Write(b"second".to_vec())));
    }

    #[test]
    fn unknown_payload_field_is_skipped() {
        let mut enc = Encoder::new();
        enc.uint32_field(1, CommandName::WriteChars as u32);
        enc.string_field(24, "kept");
        // Field 77 is not part of the envelope.
        enc.string_field(77, "from a newer schema");
        enc.uint32_field(99, 1234);
        let decoded = PluginCommand::decode(enc.as_bytes()).unwrap();
        assert_eq!(decoded.name, CommandName::WriteChars);
        assert_eq!(decoded.payload, Some(CommandPayload::WriteChars("kept".into())));
    }

    #[test]
    fn unknown_command_name_is_rejected() {
        let mut enc = Encoder::new();
        enc.uint32_field(1, 200);
        assert_eq!(
            PluginCommand::decode(enc.as_bytes()),
            Err(DecodeError::InvalidEnum {
                field: 1,
                value: 200
            })
        );
    }

    #[test]
    fn truncated_envelope_fails() {
        let command = PluginCommand::with_payload(
            CommandName::WriteChars,
            CommandPayload::WriteChars("hello".into()),
        );
        let bytes = command.encode_to_vec();
        let truncated = &bytes[..bytes.len() - 1];
        assert!(matches!(
            PluginCommand::decode(truncated),
            Err(DecodeError::Truncated { .. })
        ));
    }

    #[test]
    fn every_scalar_alternative_roundtrips() {
        let cases = [
            PluginCommand::with_payload(
                CommandName::NewTabsWithLayout,
                CommandPayload::NewTabsWithLayout("layout { pane }".into()),
            ),
            PluginCommand::with_payload(
                CommandName::Write,
                CommandPayload::Write(vec![0x1B, b'[', b'A']),
            ),
            PluginCommand::with_payload(CommandName::GoToTab, CommandPayload::GoToTab(4)),
            PluginCommand::with_payload(
                CommandName::StartOrReloadPlugin,
                CommandPayload::StartOrReloadPlugin("file:/plugins/bar.wasm".into()),
            ),
            PluginCommand::with_payload(
                CommandName::CloseTerminalPane,
                CommandPayload::CloseTerminalPane(9),
            ),
            PluginCommand::with_payload(
                CommandName::ClosePluginPane,
                CommandPayload::ClosePluginPane(2),
            ),
            PluginCommand::with_payload(
                CommandName::ReportPanic,
                CommandPayload::ReportPanic("index out of bounds".into()),
            ),
            PluginCommand::with_payload(
                CommandName::DeleteDeadSession,
                CommandPayload::DeleteDeadSession("stale".into()),
            ),
            PluginCommand::with_payload(
                CommandName::RenameSession,
                CommandPayload::RenameSession("work".into()),
            ),
            PluginCommand::with_payload(
                CommandName::UnblockCliPipeInput,
                CommandPayload::UnblockCliPipeInput("input".into()),
            ),
            PluginCommand::with_payload(
                CommandName::BlockCliPipeInput,
                CommandPayload::BlockCliPipeInput("input".into()),
            ),
            PluginCommand::with_payload(CommandName::ShowSelf, CommandPayload::ShowSelf(true)),
        ];
        for command in cases {
            let bytes = command.encode_to_vec();
            assert_eq!(bytes.len(), command.encoded_len());
            assert_eq!(PluginCommand::decode(&bytes).unwrap(), command, "{command:?}");
        }
    }

    #[test]
    fn command_name_enumerants_map_back() {
        for raw in 0..80 {
            let name = CommandName::from_u32(raw).unwrap();
            assert_eq!(name as u32, raw);
        }
        assert_eq!(CommandName::from_u32(80), None);
    }
}
