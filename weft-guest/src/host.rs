//! The host-call boundary.
//!
//! The core surface is two operations: serialize a [`PluginCommand`] and
//! hand the bytes to the host, and decode received bytes back into an
//! envelope. On wasm targets the hand-off is a host import; everywhere else
//! a thread-local capture stub stands in so the boundary can be exercised
//! in tests.

use weft_proto::{DecodeError, Message, PluginCommand};

#[cfg(target_family = "wasm")]
mod imports {
    #[link(wasm_import_module = "weft")]
    unsafe extern "C" {
        /// Dispatches `len` bytes of encoded command starting at `ptr`.
        pub(super) fn host_run_plugin_command(ptr: *const u8, len: usize);
    }
}

#[cfg(not(target_family = "wasm"))]
mod capture {
    use std::cell::RefCell;

    thread_local! {
        static SENT: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
    }

    pub(super) fn push(bytes: Vec<u8>) {
        SENT.with(|sent| sent.borrow_mut().push(bytes));
    }

    pub(super) fn drain() -> Vec<Vec<u8>> {
        SENT.with(|sent| sent.borrow_mut().drain(..).collect())
    }
}

/// Serializes `command` and hands the bytes to the host for dispatch.
///
/// Encoding cannot fail; the buffer is sized up front and written once.
pub fn run_command(command: &PluginCommand) {
    let bytes = command.encode_to_vec();
    send(&bytes);
}

#[cfg(target_family = "wasm")]
fn send(bytes: &[u8]) {
    // SAFETY: ptr/len describe a live buffer for the duration of the call;
    // the host copies the bytes before returning.
    unsafe { imports::host_run_plugin_command(bytes.as_ptr(), bytes.len()) };
}

#[cfg(not(target_family = "wasm"))]
fn send(bytes: &[u8]) {
    capture::push(bytes.to_vec());
}

/// Decodes bytes received from the host into a command envelope.
pub fn decode_command(bytes: &[u8]) -> Result<PluginCommand, DecodeError> {
    PluginCommand::decode(bytes)
}

/// Drains the byte buffers captured by the non-wasm stub, oldest first.
#[cfg(not(target_family = "wasm"))]
pub fn drain_captured() -> Vec<Vec<u8>> {
    capture::drain()
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_proto::{CommandName, CommandPayload};

    #[test]
    fn run_command_hands_exact_encoding_to_host() {
        let command = PluginCommand::with_payload(
            CommandName::WriteChars,
            CommandPayload::WriteChars("hi".into()),
        );
        run_command(&command);
        let sent = drain_captured();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], command.encode_to_vec());
        assert_eq!(decode_command(&sent[0]).unwrap(), command);
    }

    #[test]
    fn captured_buffers_drain_in_order() {
        run_command(&PluginCommand::new(CommandName::ScrollUp));
        run_command(&PluginCommand::new(CommandName::ScrollDown));
        let sent = drain_captured();
        assert_eq!(sent.len(), 2);
        assert_eq!(
            decode_command(&sent[0]).unwrap().name,
            CommandName::ScrollUp
        );
        assert_eq!(
            decode_command(&sent[1]).unwrap().name,
            CommandName::ScrollDown
        );
        assert!(drain_captured().is_empty());
    }
}
