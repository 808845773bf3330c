//! File, terminal, and command-execution payloads.

use crate::codec::{Decoder, Encoder, Message, Result, Sizer, WireType};
use crate::pane::FloatingPaneCoordinates;

/// A named string pair attached to a command for correlation.
///
/// Context items ride along with a command and come back verbatim with its
/// result event, letting a plugin match results to the request that caused
/// them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContextItem {
    /// Key.
    pub name: String,
    /// Value.
    pub value: String,
}

impl Message for ContextItem {
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

/// A file to open, with optional cursor line and working directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileRef {
    /// Path to the file, resolved against `cwd` when one is given.
    pub path: String,
    /// Line to place the cursor on.
    pub line_number: Option<u32>,
    /// Directory the path is resolved against.
    pub cwd: Option<String>,
}

impl Message for FileRef {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.path.is_empty() {
            len += Sizer::string_field(1, &self.path);
        }
        if let Some(line) = self.line_number {
            len += Sizer::uint32_field(2, line);
        }
        if let Some(cwd) = &self.cwd {
            len += Sizer::string_field(3, cwd);
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        if !self.path.is_empty() {
            enc.string_field(1, &self.path);
        }
        if let Some(line) = self.line_number {
            enc.uint32_field(2, line);
        }
        if let Some(cwd) = &self.cwd {
            enc.string_field(3, cwd);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.path = dec.string()?;
            }
            2 => {
                wire.expect(WireType::Varint, field)?;
                self.line_number = Some(dec.uint32()?);
            }
            3 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.cwd = Some(dec.string()?);
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// An executable with its arguments and optional working directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandLine {
    /// Executable path or name.
    pub path: String,
    /// Arguments, excluding the executable itself.
    pub args: Vec<String>,
    /// Directory the command runs in.
    pub cwd: Option<String>,
}

impl Message for CommandLine {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.path.is_empty() {
            len += Sizer::string_field(1, &self.path);
        }
        for arg in &self.args {
            len += Sizer::string_field(2, arg);
        }
        if let Some(cwd) = &self.cwd {
            len += Sizer::string_field(3, cwd);
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        if !self.path.is_empty() {
            enc.string_field(1, &self.path);
        }
        for arg in &self.args {
            enc.string_field(2, arg);
        }
        if let Some(cwd) = &self.cwd {
            enc.string_field(3, cwd);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.path = dec.string()?;
            }
            2 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.args.push(dec.string()?);
            }
            3 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.cwd = Some(dec.string()?);
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// A file to open in an editor pane.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpenFilePayload {
    /// The file.
    pub file_to_open: Option<FileRef>,
    /// Placement when the pane floats.
    pub floating_pane_coordinates: Option<FloatingPaneCoordinates>,
}

impl Message for OpenFilePayload {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if let Some(file) = &self.file_to_open {
            len += Sizer::message_field(1, file.encoded_len());
        }
        if let Some(coords) = &self.floating_pane_coordinates {
            len += Sizer::message_field(2, coords.encoded_len());
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        if let Some(file) = &self.file_to_open {
            enc.message_field(1, file);
        }
        if let Some(coords) = &self.floating_pane_coordinates {
            enc.message_field(2, coords);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.file_to_open = Some(dec.message()?);
            }
            2 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.floating_pane_coordinates = Some(dec.message()?);
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// A terminal pane to open.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpenTerminalPayload {
    /// Directory the shell starts in.
    pub cwd: String,
    /// Placement when the pane floats.
    pub floating_pane_coordinates: Option<FloatingPaneCoordinates>,
}

impl Message for OpenTerminalPayload {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.cwd.is_empty() {
            len += Sizer::string_field(1, &self.cwd);
        }
        if let Some(coords) = &self.floating_pane_coordinates {
            len += Sizer::message_field(2, coords.encoded_len());
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        if !self.cwd.is_empty() {
            enc.string_field(1, &self.cwd);
        }
        if let Some(coords) = &self.floating_pane_coordinates {
            enc.message_field(2, coords);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.cwd = dec.string()?;
            }
            2 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.floating_pane_coordinates = Some(dec.message()?);
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// A command pane to open.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpenCommandPanePayload {
    /// The command to run in the pane.
    pub command: Option<CommandLine>,
    /// Placement when the pane floats.
    pub floating_pane_coordinates: Option<FloatingPaneCoordinates>,
}

impl Message for OpenCommandPanePayload {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if let Some(command) = &self.command {
            len += Sizer::message_field(1, command.encoded_len());
        }
        if let Some(coords) = &self.floating_pane_coordinates {
            len += Sizer::message_field(2, coords.encoded_len());
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        if let Some(command) = &self.command {
            enc.message_field(1, command);
        }
        if let Some(coords) = &self.floating_pane_coordinates {
            enc.message_field(2, coords);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.command = Some(dec.message()?);
            }
            2 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.floating_pane_coordinates = Some(dec.message()?);
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// A command to execute detached from any pane.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecCmdPayload {
    /// Executable and arguments, first element is the executable.
    pub command_line: Vec<String>,
}

impl Message for ExecCmdPayload {
    fn encoded_len(&self) -> usize {
        self.command_line
            .iter()
            .map(|part| Sizer::string_field(1, part))
            .sum()
    }

    fn encode(&self, enc: &mut Encoder) {
        for part in &self.command_line {
            enc.string_field(1, part);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.command_line.push(dec.string()?);
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// A command to run in the background, reporting its result as an event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunCommandPayload {
    /// Executable and arguments, first element is the executable.
    pub command_line: Vec<String>,
    /// Environment entries added to the command's environment.
    pub env_variables: Vec<ContextItem>,
    /// Directory the command runs in.
    pub cwd: String,
    /// Correlation context returned with the result event.
    pub context: Vec<ContextItem>,
}

impl Message for RunCommandPayload {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        for part in &self.command_line {
            len += Sizer::string_field(1, part);
        }
        for env in &self.env_variables {
            len += Sizer::message_elem(2, env.encoded_len());
        }
        if !self.cwd.is_empty() {
            len += Sizer::string_field(3, &self.cwd);
        }
        for item in &self.context {
            len += Sizer::message_elem(4, item.encoded_len());
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        for part in &self.command_line {
            enc.string_field(1, part);
        }
        for env in &self.env_variables {
            enc.message_elem(2, env);
        }
        if !self.cwd.is_empty() {
            enc.string_field(3, &self.cwd);
        }
        for item in &self.context {
            enc.message_elem(4, item);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.command_line.push(dec.string()?);
            }
            2 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.env_variables.push(dec.message()?);
            }
            3 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.cwd = dec.string()?;
            }
            4 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.context.push(dec.message()?);
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// Delay after which the host fires a timer event back at the plugin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SetTimeoutPayload {
    /// Delay in seconds.
    pub seconds: f64,
}

impl Message for SetTimeoutPayload {
    fn encoded_len(&self) -> usize {
        if self.seconds == 0.0 {
            0
        } else {
            Sizer::double_field(1)
        }
    }

    fn encode(&self, enc: &mut Encoder) {
        if self.seconds != 0.0 {
            enc.double_field(1, self.seconds);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::Fixed64, field)?;
                self.seconds = dec.double()?;
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
    fn file_ref_roundtrip_with_explicit_presence() {
        let file = FileRef {
            path: "src/main.rs".into(),
            line_number: Some(0),
            cwd: None,
        };
        let bytes = file.encode_to_vec();
        let decoded = FileRef::decode(&bytes).unwrap();
        // Explicitly-present zero survives, unset stays unset.
        assert_eq!(decoded.line_number, Some(0));
        assert_eq!(decoded.cwd, None);
        assert_eq!(decoded, file);
    }

    #[test]
    fn command_line_preserves_argument_order() {
        let cmd = CommandLine {
            path: "cargo".into(),
            args: vec!["build".into(), "--release".into()],
            cwd: Some("/work".into()),
        };
        let bytes = cmd.encode_to_vec();
        assert_eq!(bytes.len(), cmd.encoded_len());
        assert_eq!(CommandLine::decode(&bytes).unwrap(), cmd);
    }

    #[test]
    fn empty_repeated_string_element_survives() {
        let cmd = ExecCmdPayload {
            command_line: vec!["sh".into(), String::new(), "-c".into()],
        };
        let bytes = cmd.encode_to_vec();
        assert_eq!(ExecCmdPayload::decode(&bytes).unwrap(), cmd);
    }

    #[test]
    fn run_command_roundtrip() {
        let payload = RunCommandPayload {
            command_line: vec!["git".into(), "status".into()],
            env_variables: vec![ContextItem {
                name: "GIT_PAGER".into(),
                value: "cat".into(),
            }],
            cwd: "/repo".into(),
            context: vec![ContextItem {
                name: "request_id".into(),
                value: "42".into(),
            }],
        };
        let bytes = payload.encode_to_vec();
        assert_eq!(bytes.len(), payload.encoded_len());
        assert_eq!(RunCommandPayload::decode(&bytes).unwrap(), payload);
    }

    #[test]
    fn empty_repeated_message_element_survives() {
        // A default ContextItem element still costs a tag and zero length.
        let payload = RunCommandPayload {
            context: vec![ContextItem::default()],
            ..Default::default()
        };
        let bytes = payload.encode_to_vec();
        assert_eq!(bytes.len(), payload.encoded_len());
        let decoded = RunCommandPayload::decode(&bytes).unwrap();
        assert_eq!(decoded.context.len(), 1);
    }

    #[test]
    fn timeout_double_roundtrip() {
        let payload = SetTimeoutPayload { seconds: 1.5 };
        let bytes = payload.encode_to_vec();
        assert_eq!(bytes.len(), Sizer::double_field(1));
        assert_eq!(SetTimeoutPayload::decode(&bytes).unwrap(), payload);
    }

    #[test]
    fn open_file_nested_roundtrip() {
        let payload = OpenFilePayload {
            file_to_open: Some(FileRef {
                path: "README.md".into(),
                line_number: Some(12),
                cwd: Some("/docs".into()),
            }),
            floating_pane_coordinates: None,
        };
        let bytes = payload.encode_to_vec();
        assert_eq!(bytes.len(), payload.encoded_len());
        assert_eq!(OpenFilePayload::decode(&bytes).unwrap(), payload);
    }
}
