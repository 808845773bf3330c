//! Wire protocol for weft host↔plugin communication.
//!
//! Commands travel as a single [`PluginCommand`] envelope serialized in a
//! tagged, length-prefixed binary format. Fields are framed as
//! `varint(field_number << 3 | wire_type)` followed by the value; scalar
//! defaults are omitted, unknown field numbers are skipped, and nested
//! messages are length-delimited blocks of their own encoding.
//!
//! # Quick start
//!
//! ```
//! use weft_proto::{CommandName, CommandPayload, Message, PluginCommand};
//!
//! let command = PluginCommand::with_payload(
//!     CommandName::WriteChars,
//!     CommandPayload::WriteChars("ls -l\n".into()),
//! );
//! let bytes = command.encode_to_vec();
//! let decoded = PluginCommand::decode(&bytes).expect("well-formed buffer");
//! assert_eq!(decoded, command);
//! ```

mod codec;
mod command;
mod input;
mod pane;
mod run;
mod session;
mod web;

pub use codec::{DecodeError, Decoder, Encoder, Message, Result, Sizer, WireType, MAX_FIELD_LEN};
pub use command::{CommandName, CommandPayload, PluginCommand};
pub use input::{
    EventNameList, EventType, InputMode, PermissionType, RequestPermissionPayload,
    SubscribePayload, SwitchToModePayload, UnsubscribePayload,
};
pub use pane::{
    Direction, FixedOrPercent, FixedOrPercentValue, FloatingPaneCoordinates, GoToTabNamePayload,
    IdAndNewName, MovePayload, NewTabPayload, PaneId, PaneIdAndShouldFloat, PaneType, Resize,
    ResizeAction, ResizePayload, SwitchTabToPayload,
};
pub use run::{
    CommandLine, ContextItem, ExecCmdPayload, FileRef, OpenCommandPanePayload, OpenFilePayload,
    OpenTerminalPayload, RunCommandPayload, SetTimeoutPayload,
};
pub use session::{
    CliPipeOutputPayload, MessageToPluginPayload, NewPluginArgs, PluginMessagePayload,
    SwitchSessionPayload,
};
pub use web::{Header, HttpVerb, WebRequestPayload};
