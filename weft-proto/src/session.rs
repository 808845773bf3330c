//! Session switching, plugin-to-plugin messaging, and CLI pipe payloads.

use crate::codec::{Decoder, Encoder, Message, Result, Sizer, WireType};
use crate::pane::PaneId;
use crate::run::ContextItem;

/// Target of a session switch; unset fields keep their current value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SwitchSessionPayload {
    /// Session to attach to; unset means the current session.
    pub name: Option<String>,
    /// Tab to focus after the switch.
    pub tab_position: Option<u32>,
    /// Pane to focus after the switch.
    pub pane_id: Option<u32>,
    /// Whether `pane_id` names a plugin pane rather than a terminal pane.
    pub pane_id_is_plugin: Option<bool>,
}

impl Message for SwitchSessionPayload {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if let Some(name) = &self.name {
            len += Sizer::string_field(1, name);
        }
        if let Some(position) = self.tab_position {
            len += Sizer::uint32_field(2, position);
        }
        if let Some(pane_id) = self.pane_id {
            len += Sizer::uint32_field(3, pane_id);
        }
        if self.pane_id_is_plugin.is_some() {
            len += Sizer::bool_field(4);
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        if let Some(name) = &self.name {
            enc.string_field(1, name);
        }
        if let Some(position) = self.tab_position {
            enc.uint32_field(2, position);
        }
        if let Some(pane_id) = self.pane_id {
            enc.uint32_field(3, pane_id);
        }
        if let Some(is_plugin) = self.pane_id_is_plugin {
            enc.bool_field(4, is_plugin);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.name = Some(dec.string()?);
            }
            2 => {
                wire.expect(WireType::Varint, field)?;
                self.tab_position = Some(dec.uint32()?);
            }
            3 => {
                wire.expect(WireType::Varint, field)?;
                self.pane_id = Some(dec.uint32()?);
            }
            4 => {
                wire.expect(WireType::Varint, field)?;
                self.pane_id_is_plugin = Some(dec.bool()?);
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// A message posted to the plugin's own workers or to another plugin.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PluginMessagePayload {
    /// Name the receiver dispatches on.
    pub message_name: String,
    /// Free-form message body.
    pub message_payload: Option<String>,
    /// Worker to deliver to, for worker-directed messages.
    pub worker_name: Option<String>,
}

impl Message for PluginMessagePayload {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.message_name.is_empty() {
            len += Sizer::string_field(1, &self.message_name);
        }
        if let Some(payload) = &self.message_payload {
            len += Sizer::string_field(2, payload);
        }
        if let Some(worker) = &self.worker_name {
            len += Sizer::string_field(3, worker);
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        if !self.message_name.is_empty() {
            enc.string_field(1, &self.message_name);
        }
        if let Some(payload) = &self.message_payload {
            enc.string_field(2, payload);
        }
        if let Some(worker) = &self.worker_name {
            enc.string_field(3, worker);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.message_name = dec.string()?;
            }
            2 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.message_payload = Some(dec.string()?);
            }
            3 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.worker_name = Some(dec.string()?);
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// Launch parameters for a plugin started by a message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewPluginArgs {
    /// Open the new plugin floating.
    pub should_float: Option<bool>,
    /// Pane the new plugin replaces.
    pub pane_id_to_replace: Option<PaneId>,
    /// Title of the new plugin pane.
    pub pane_title: Option<String>,
    /// Working directory of the new plugin.
    pub cwd: Option<String>,
    /// Bypass the plugin cache when loading.
    pub skip_cache: bool,
}

impl Message for NewPluginArgs {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if self.should_float.is_some() {
            len += Sizer::bool_field(1);
        }
        if let Some(pane_id) = &self.pane_id_to_replace {
            len += Sizer::message_field(2, pane_id.encoded_len());
        }
        if let Some(title) = &self.pane_title {
            len += Sizer::string_field(3, title);
        }
        if let Some(cwd) = &self.cwd {
            len += Sizer::string_field(4, cwd);
        }
        if self.skip_cache {
            len += Sizer::bool_field(5);
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        if let Some(should_float) = self.should_float {
            enc.bool_field(1, should_float);
        }
        if let Some(pane_id) = &self.pane_id_to_replace {
            enc.message_field(2, pane_id);
        }
        if let Some(title) = &self.pane_title {
            enc.string_field(3, title);
        }
        if let Some(cwd) = &self.cwd {
            enc.string_field(4, cwd);
        }
        if self.skip_cache {
            enc.bool_field(5, self.skip_cache);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::Varint, field)?;
                self.should_float = Some(dec.bool()?);
            }
            2 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.pane_id_to_replace = Some(dec.message()?);
            }
            3 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.pane_title = Some(dec.string()?);
            }
            4 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.cwd = Some(dec.string()?);
            }
            5 => {
                wire.expect(WireType::Varint, field)?;
                self.skip_cache = dec.bool()?;
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// A message addressed to another plugin, launching it if necessary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageToPluginPayload {
    /// Location of the receiving plugin; unset broadcasts to listeners.
    pub plugin_url: Option<String>,
    /// Configuration of the receiving plugin.
    pub plugin_config: Vec<ContextItem>,
    /// Name the receiver dispatches on.
    pub message_name: String,
    /// Free-form message body.
    pub message_payload: Option<String>,
    /// Additional message arguments.
    pub message_args: Vec<ContextItem>,
    /// Launch parameters when the receiver is not yet running.
    pub new_plugin_args: Option<NewPluginArgs>,
}

impl Message for MessageToPluginPayload {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if let Some(url) = &self.plugin_url {
            len += Sizer::string_field(1, url);
        }
        for item in &self.plugin_config {
            len += Sizer::message_elem(2, item.encoded_len());
        }
        if !self.message_name.is_empty() {
            len += Sizer::string_field(3, &self.message_name);
        }
        if let Some(payload) = &self.message_payload {
            len += Sizer::string_field(4, payload);
        }
        for item in &self.message_args {
            len += Sizer::message_elem(5, item.encoded_len());
        }
        if let Some(args) = &self.new_plugin_args {
            len += Sizer::message_field(6, args.encoded_len());
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        if let Some(url) = &self.plugin_url {
            enc.string_field(1, url);
        }
        for item in &self.plugin_config {
            enc.message_elem(2, item);
        }
        if !self.message_name.is_empty() {
            enc.string_field(3, &self.message_name);
        }
        if let Some(payload) = &self.message_payload {
            enc.string_field(4, payload);
        }
        for item in &self.message_args {
            enc.message_elem(5, item);
        }
        if let Some(args) = &self.new_plugin_args {
            enc.message_field(6, args);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.plugin_url = Some(dec.string()?);
            }
            2 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.plugin_config.push(dec.message()?);
            }
            3 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.message_name = dec.string()?;
            }
            4 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.message_payload = Some(dec.string()?);
            }
            5 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.message_args.push(dec.message()?);
            }
            6 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.new_plugin_args = Some(dec.message()?);
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}

/// Output the plugin writes to one of its named CLI pipes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliPipeOutputPayload {
    /// Name of the pipe.
    pub pipe_name: String,
    /// Output to append to the pipe.
    pub output: String,
}

impl Message for CliPipeOutputPayload {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.pipe_name.is_empty() {
            len += Sizer::string_field(1, &self.pipe_name);
        }
        if !self.output.is_empty() {
            len += Sizer::string_field(2, &self.output);
        }
        len
    }

    fn encode(&self, enc: &mut Encoder) {
        if !self.pipe_name.is_empty() {
            enc.string_field(1, &self.pipe_name);
        }
        if !self.output.is_empty() {
            enc.string_field(2, &self.output);
        }
    }

    fn merge_field(&mut self, field: u32, wire: WireType, dec: &mut Decoder<'_>) -> Result<()> {
        match field {
            1 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.pipe_name = dec.string()?;
            }
            2 => {
                wire.expect(WireType::LengthDelimited, field)?;
                self.output = dec.string()?;
            }
            _ => dec.skip(wire)?,
        }
        Ok(())
    }
}
