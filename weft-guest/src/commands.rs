//! One convenience function per host command.
//!
//! Each function builds a single [`PluginCommand`] and immediately hands it
//! to the host boundary. Nothing here adds semantics; the host interprets
//! the command.

use weft_proto::{
    CliPipeOutputPayload, CommandLine, CommandName, CommandPayload, EventNameList, EventType,
    ExecCmdPayload, FileRef, FloatingPaneCoordinates, GoToTabNamePayload, IdAndNewName, InputMode,
    MessageToPluginPayload, MovePayload, NewTabPayload, OpenCommandPanePayload, OpenFilePayload,
    OpenTerminalPayload, PaneIdAndShouldFloat, PermissionType, PluginCommand,
    PluginMessagePayload, RequestPermissionPayload, Resize, ResizePayload, RunCommandPayload,
    SetTimeoutPayload, SubscribePayload, SwitchSessionPayload, SwitchTabToPayload,
    SwitchToModePayload, UnsubscribePayload, WebRequestPayload,
};

use crate::host;

/// Direction argument reused by the focus and movement commands.
pub use weft_proto::Direction;

fn send(name: CommandName, payload: CommandPayload) {
    host::run_command(&PluginCommand::with_payload(name, payload));
}

fn send_bare(name: CommandName) {
    host::run_command(&PluginCommand::new(name));
}

/// Starts receiving the given events.
pub fn subscribe(event_types: &[EventType]) {
    send(
        CommandName::Subscribe,
        CommandPayload::Subscribe(SubscribePayload {
            subscriptions: Some(EventNameList {
                event_types: event_types.to_vec(),
            }),
        }),
    );
}

/// Stops receiving the given events.
pub fn unsubscribe(event_types: &[EventType]) {
    send(
        CommandName::Unsubscribe,
        CommandPayload::Unsubscribe(UnsubscribePayload {
            subscriptions: Some(EventNameList {
                event_types: event_types.to_vec(),
            }),
        }),
    );
}

/// Sets whether the plugin pane accepts focus.
pub fn set_selectable(selectable: bool) {
    send(
        CommandName::SetSelectable,
        CommandPayload::SetSelectable(selectable),
    );
}

/// Asks the host for this plugin's pane, tab, and plugin ids.
pub fn get_plugin_ids() {
    send_bare(CommandName::GetPluginIds);
}

/// Asks the host for its version string.
pub fn get_host_version() {
    send_bare(CommandName::GetHostVersion);
}

/// Opens `file` in an editor pane.
pub fn open_file(file: FileRef) {
    send(
        CommandName::OpenFile,
        CommandPayload::OpenFile(OpenFilePayload {
            file_to_open: Some(file),
            floating_pane_coordinates: None,
        }),
    );
}

/// Opens `file` in a floating editor pane.
pub fn open_file_floating(file: FileRef, coordinates: Option<FloatingPaneCoordinates>) {
    send(
        CommandName::OpenFileFloating,
        CommandPayload::OpenFileFloating(OpenFilePayload {
            file_to_open: Some(file),
            floating_pane_coordinates: coordinates,
        }),
    );
}

/// Opens `file` in place of the plugin pane.
pub fn open_file_in_place(file: FileRef) {
    send(
        CommandName::OpenFileInPlace,
        CommandPayload::OpenFileInPlace(OpenFilePayload {
            file_to_open: Some(file),
            floating_pane_coordinates: None,
        }),
    );
}

/// Opens a terminal pane in `cwd`.
pub fn open_terminal(cwd: &str) {
    send(
        CommandName::OpenTerminal,
        CommandPayload::OpenTerminal(OpenTerminalPayload {
            cwd: cwd.to_owned(),
            floating_pane_coordinates: None,
        }),
    );
}

/// Opens a floating terminal pane in `cwd`.
pub fn open_terminal_floating(cwd: &str, coordinates: Option<FloatingPaneCoordinates>) {
    send(
        CommandName::OpenTerminalFloating,
        CommandPayload::OpenTerminalFloating(OpenTerminalPayload {
            cwd: cwd.to_owned(),
            floating_pane_coordinates: coordinates,
        }),
    );
}

/// Opens a terminal pane in place of the plugin pane.
pub fn open_terminal_in_place(cwd: &str) {
    send(
        CommandName::OpenTerminalInPlace,
        CommandPayload::OpenTerminalInPlace(OpenTerminalPayload {
            cwd: cwd.to_owned(),
            floating_pane_coordinates: None,
        }),
    );
}

/// Opens a pane running `command`.
pub fn open_command_pane(command: CommandLine) {
    send(
        CommandName::OpenCommandPane,
        CommandPayload::OpenCommandPane(OpenCommandPanePayload {
            command: Some(command),
            floating_pane_coordinates: None,
        }),
    );
}

/// Opens a floating pane running `command`.
pub fn open_command_pane_floating(
    command: CommandLine,
    coordinates: Option<FloatingPaneCoordinates>,
) {
    send(
        CommandName::OpenCommandPaneFloating,
        CommandPayload::OpenCommandPaneFloating(OpenCommandPanePayload {
            command: Some(command),
            floating_pane_coordinates: coordinates,
        }),
    );
}

/// Opens a pane running `command` in place of the plugin pane.
pub fn open_command_pane_in_place(command: CommandLine) {
    send(
        CommandName::OpenCommandPaneInPlace,
        CommandPayload::OpenCommandPaneInPlace(OpenCommandPanePayload {
            command: Some(command),
            floating_pane_coordinates: None,
        }),
    );
}

/// Focuses the tab at `tab_index`.
pub fn switch_tab_to(tab_index: u32) {
    send(
        CommandName::SwitchTabTo,
        CommandPayload::SwitchTabTo(SwitchTabToPayload { tab_index }),
    );
}

/// Fires a timer event after `seconds`.
pub fn set_timeout(seconds: f64) {
    send(
        CommandName::SetTimeout,
        CommandPayload::SetTimeout(SetTimeoutPayload { seconds }),
    );
}

/// Executes a command detached from any pane.
pub fn exec_cmd(command_line: &[&str]) {
    send(
        CommandName::ExecCmd,
        CommandPayload::ExecCmd(ExecCmdPayload {
            command_line: command_line.iter().map(|part| (*part).to_owned()).collect(),
        }),
    );
}

/// Posts a message to one of this plugin's workers.
pub fn post_message_to(worker_name: &str, message_name: &str, payload: &str) {
    send(
        CommandName::PostMessageTo,
        CommandPayload::PostMessageTo(PluginMessagePayload {
            message_name: message_name.to_owned(),
            message_payload: Some(payload.to_owned()),
            worker_name: Some(worker_name.to_owned()),
        }),
    );
}

/// Posts a message to this plugin's main thread.
pub fn post_message_to_plugin(message_name: &str, payload: &str) {
    send(
        CommandName::PostMessageToPlugin,
        CommandPayload::PostMessageToPlugin(PluginMessagePayload {
            message_name: message_name.to_owned(),
            message_payload: Some(payload.to_owned()),
            worker_name: None,
        }),
    );
}

/// Hides the plugin pane.
pub fn hide_self() {
    send_bare(CommandName::HideSelf);
}

/// Reveals the plugin pane, optionally floating it if it was hidden.
pub fn show_self(should_float_if_hidden: bool) {
    send(
        CommandName::ShowSelf,
        CommandPayload::ShowSelf(should_float_if_hidden),
    );
}

/// Switches the host's input mode.
pub fn switch_to_mode(mode: InputMode) {
    send(
        CommandName::SwitchToMode,
        CommandPayload::SwitchToMode(SwitchToModePayload { input_mode: mode }),
    );
}

/// Opens tabs described by `layout`.
pub fn new_tabs_with_layout(layout: &str) {
    send(
        CommandName::NewTabsWithLayout,
        CommandPayload::NewTabsWithLayout(layout.to_owned()),
    );
}

/// Opens a new tab.
pub fn new_tab(name: Option<&str>, cwd: Option<&str>) {
    send(
        CommandName::NewTab,
        CommandPayload::NewTab(NewTabPayload {
            name: name.map(str::to_owned),
            cwd: cwd.map(str::to_owned),
        }),
    );
}

/// Focuses the next tab.
pub fn go_to_next_tab() {
    send_bare(CommandName::GoToNextTab);
}

/// Focuses the previous tab.
pub fn go_to_previous_tab() {
    send_bare(CommandName::GoToPreviousTab);
}

/// Resizes the focused pane.
pub fn resize(resize: Resize) {
    send(
        CommandName::Resize,
        CommandPayload::Resize(ResizePayload {
            resize: Some(resize),
        }),
    );
}

/// Resizes the focused pane toward an edge.
pub fn resize_with_direction(resize: Resize) {
    send(
        CommandName::ResizeWithDirection,
        CommandPayload::ResizeWithDirection(ResizePayload {
            resize: Some(resize),
        }),
    );
}

/// Focuses the next pane.
pub fn focus_next_pane() {
    send_bare(CommandName::FocusNextPane);
}

/// Focuses the previous pane.
pub fn focus_previous_pane() {
    send_bare(CommandName::FocusPreviousPane);
}

/// Moves focus toward `direction`.
pub fn move_focus(direction: Direction) {
    send(
        CommandName::MoveFocus,
        CommandPayload::MoveFocus(MovePayload { direction }),
    );
}

/// Moves focus toward `direction`, crossing tabs at the screen edge.
pub fn move_focus_or_tab(direction: Direction) {
    send(
        CommandName::MoveFocusOrTab,
        CommandPayload::MoveFocusOrTab(MovePayload { direction }),
    );
}

/// Detaches the client from the session.
pub fn detach() {
    send_bare(CommandName::Detach);
}

/// Opens the focused pane's scrollback in the editor.
pub fn edit_scrollback() {
    send_bare(CommandName::EditScrollback);
}

/// Writes bytes to the focused pane's input.
pub fn write(bytes: Vec<u8>) {
    send(CommandName::Write, CommandPayload::Write(bytes));
}

/// Writes characters to the focused pane's input.
pub fn write_chars(chars: &str) {
    send(
        CommandName::WriteChars,
        CommandPayload::WriteChars(chars.to_owned()),
    );
}

/// Toggles between the two most recent tabs.
pub fn toggle_tab() {
    send_bare(CommandName::ToggleTab);
}

/// Moves the focused pane to the next slot.
pub fn move_pane() {
    send_bare(CommandName::MovePane);
}

/// Moves the focused pane toward `direction`.
pub fn move_pane_with_direction(direction: Direction) {
    send(
        CommandName::MovePaneWithDirection,
        CommandPayload::MovePaneWithDirection(MovePayload { direction }),
    );
}

/// Clears the focused pane's scrollback.
pub fn clear_screen() {
    send_bare(CommandName::ClearScreen);
}

/// Scrolls the focused pane up one line.
pub fn scroll_up() {
    send_bare(CommandName::ScrollUp);
}

/// Scrolls the focused pane down one line.
pub fn scroll_down() {
    send_bare(CommandName::ScrollDown);
}

/// Scrolls the focused pane to the top.
pub fn scroll_to_top() {
    send_bare(CommandName::ScrollToTop);
}

/// Scrolls the focused pane to the bottom.
pub fn scroll_to_bottom() {
    send_bare(CommandName::ScrollToBottom);
}

/// Scrolls the focused pane up one page.
pub fn page_scroll_up() {
    send_bare(CommandName::PageScrollUp);
}

/// Scrolls the focused pane down one page.
pub fn page_scroll_down() {
    send_bare(CommandName::PageScrollDown);
}

/// Toggles fullscreen on the focused pane.
pub fn toggle_focus_fullscreen() {
    send_bare(CommandName::ToggleFocusFullscreen);
}

/// Toggles pane frames on or off.
pub fn toggle_pane_frames() {
    send_bare(CommandName::TogglePaneFrames);
}

/// Toggles the focused pane between tiled and floating.
pub fn toggle_pane_embed_or_eject() {
    send_bare(CommandName::TogglePaneEmbedOrEject);
}

/// Undoes the last pane rename.
pub fn undo_rename_pane() {
    send_bare(CommandName::UndoRenamePane);
}

/// Closes the focused pane.
pub fn close_focus() {
    send_bare(CommandName::CloseFocus);
}

/// Toggles synchronized input across the active tab.
pub fn toggle_active_tab_sync() {
    send_bare(CommandName::ToggleActiveTabSync);
}

/// Closes the focused tab.
pub fn close_focused_tab() {
    send_bare(CommandName::CloseFocusedTab);
}

/// Undoes the last tab rename.
pub fn undo_rename_tab() {
    send_bare(CommandName::UndoRenameTab);
}

/// Ends the session.
pub fn quit_session() {
    send_bare(CommandName::QuitSession);
}

/// Applies the previous swap layout.
pub fn previous_swap_layout() {
    send_bare(CommandName::PreviousSwapLayout);
}

/// Applies the next swap layout.
pub fn next_swap_layout() {
    send_bare(CommandName::NextSwapLayout);
}

/// Focuses the tab named `name`.
pub fn go_to_tab_name(name: &str) {
    send(
        CommandName::GoToTabName,
        CommandPayload::GoToTabName(GoToTabNamePayload {
            tab_name: name.to_owned(),
            create: false,
        }),
    );
}

/// Focuses the tab named `name`, creating it if missing.
pub fn focus_or_create_tab(name: &str) {
    send(
        CommandName::FocusOrCreateTab,
        CommandPayload::GoToTabName(GoToTabNamePayload {
            tab_name: name.to_owned(),
            create: true,
        }),
    );
}

/// Focuses the tab at `index`.
pub fn go_to_tab(index: u32) {
    send(CommandName::GoToTab, CommandPayload::GoToTab(index));
}

/// Starts the plugin at `url`, or reloads it if already running.
pub fn start_or_reload_plugin(url: &str) {
    send(
        CommandName::StartOrReloadPlugin,
        CommandPayload::StartOrReloadPlugin(url.to_owned()),
    );
}

/// Closes the terminal pane with the given id.
pub fn close_terminal_pane(id: u32) {
    send(
        CommandName::CloseTerminalPane,
        CommandPayload::CloseTerminalPane(id),
    );
}

/// Closes the plugin pane with the given id.
pub fn close_plugin_pane(id: u32) {
    send(
        CommandName::ClosePluginPane,
        CommandPayload::ClosePluginPane(id),
    );
}

/// Focuses the terminal pane with the given id.
pub fn focus_terminal_pane(id: u32, should_float: bool) {
    send(
        CommandName::FocusTerminalPane,
        CommandPayload::FocusTerminalPane(PaneIdAndShouldFloat {
            pane_id: id,
            should_float,
        }),
    );
}

/// Focuses the plugin pane with the given id.
pub fn focus_plugin_pane(id: u32, should_float: bool) {
    send(
        CommandName::FocusPluginPane,
        CommandPayload::FocusPluginPane(PaneIdAndShouldFloat {
            pane_id: id,
            should_float,
        }),
    );
}

/// Renames the terminal pane with the given id.
pub fn rename_terminal_pane(id: u32, new_name: &str) {
    send(
        CommandName::RenameTerminalPane,
        CommandPayload::RenameTerminalPane(IdAndNewName {
            id,
            new_name: new_name.to_owned(),
        }),
    );
}

/// Renames the plugin pane with the given id.
pub fn rename_plugin_pane(id: u32, new_name: &str) {
    send(
        CommandName::RenamePluginPane,
        CommandPayload::RenamePluginPane(IdAndNewName {
            id,
            new_name: new_name.to_owned(),
        }),
    );
}

/// Renames the tab with the given id.
pub fn rename_tab(id: u32, new_name: &str) {
    send(
        CommandName::RenameTab,
        CommandPayload::RenameTab(IdAndNewName {
            id,
            new_name: new_name.to_owned(),
        }),
    );
}

/// Reports a plugin panic to the host.
pub fn report_panic(message: &str) {
    send(
        CommandName::ReportPanic,
        CommandPayload::ReportPanic(message.to_owned()),
    );
}

/// Asks the host to grant the given permissions.
pub fn request_permissions(permissions: &[PermissionType]) {
    send(
        CommandName::RequestPluginPermissions,
        CommandPayload::RequestPermissions(RequestPermissionPayload {
            permissions: permissions.to_vec(),
        }),
    );
}

/// Attaches to another session.
pub fn switch_session(payload: SwitchSessionPayload) {
    send(
        CommandName::SwitchSession,
        CommandPayload::SwitchSession(payload),
    );
}

/// Runs a command in the background; its result arrives as an event.
pub fn run_command(payload: RunCommandPayload) {
    send(CommandName::RunCommand, CommandPayload::RunCommand(payload));
}

/// Issues an outbound web request; its result arrives as an event.
pub fn web_request(payload: WebRequestPayload) {
    send(CommandName::WebRequest, CommandPayload::WebRequest(payload));
}

/// Deletes the dead session named `name`.
pub fn delete_dead_session(name: &str) {
    send(
        CommandName::DeleteDeadSession,
        CommandPayload::DeleteDeadSession(name.to_owned()),
    );
}

/// Deletes every dead session.
pub fn delete_all_dead_sessions() {
    send_bare(CommandName::DeleteAllDeadSessions);
}

/// Renames the current session.
pub fn rename_session(name: &str) {
    send(
        CommandName::RenameSession,
        CommandPayload::RenameSession(name.to_owned()),
    );
}

/// Resumes input on the CLI pipe named `pipe_name`.
pub fn unblock_cli_pipe_input(pipe_name: &str) {
    send(
        CommandName::UnblockCliPipeInput,
        CommandPayload::UnblockCliPipeInput(pipe_name.to_owned()),
    );
}

/// Pauses input on the CLI pipe named `pipe_name`.
pub fn block_cli_pipe_input(pipe_name: &str) {
    send(
        CommandName::BlockCliPipeInput,
        CommandPayload::BlockCliPipeInput(pipe_name.to_owned()),
    );
}

/// Writes output to the CLI pipe named `pipe_name`.
pub fn cli_pipe_output(pipe_name: &str, output: &str) {
    send(
        CommandName::CliPipeOutput,
        CommandPayload::CliPipeOutput(CliPipeOutputPayload {
            pipe_name: pipe_name.to_owned(),
            output: output.to_owned(),
        }),
    );
}

/// Sends a message to another plugin, launching it if necessary.
pub fn message_to_plugin(payload: MessageToPluginPayload) {
    send(
        CommandName::MessageToPlugin,
        CommandPayload::MessageToPlugin(payload),
    );
}
