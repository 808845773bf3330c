//! Plugin-side shim for the weft host boundary.
//!
//! A weft plugin runs sandboxed and talks to its host exclusively through
//! encoded [`PluginCommand`] envelopes. This crate carries a command across
//! that boundary and nothing more: [`host`] holds the two boundary
//! operations (serialize-and-send, decode), [`console`] routes logging and
//! panics into the host's log, and [`commands`] offers one convenience
//! function per command.
//!
//! # Quick start
//!
//! ```
//! use weft_guest::commands;
//! use weft_guest::console;
//! use weft_proto::EventType;
//!
//! console::install_panic_hook();
//! commands::subscribe(&[EventType::Key]);
//! commands::write_chars("hello\n");
//! ```

pub mod commands;
pub mod console;
pub mod host;

pub use weft_proto::{
    CommandName, CommandPayload, DecodeError, Message, PluginCommand,
};
