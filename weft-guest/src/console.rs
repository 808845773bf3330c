//! Plugin-side logging and panic reporting.
//!
//! A sandboxed plugin has no terminal of its own; its stderr is captured
//! into the host's log, and panics are additionally reported as a command
//! so a crashed plugin shows up in the host UI rather than dying silently.

use crate::commands;

/// Writes a prefixed line to stderr, which the host captures into its log.
pub fn log(message: &str) {
    eprintln!("[weft-guest] {message}");
}

/// Installs a panic hook that logs the panic and reports it to the host.
///
/// Call once during plugin startup, before any host command is issued.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let message = info.to_string();
        eprintln!("[weft-guest] panic: {message}");
        commands::report_panic(&message);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host;
    use weft_proto::{CommandName, CommandPayload};

    #[test]
    fn panic_hook_reports_to_host() {
        install_panic_hook();
        let result = std::panic::catch_unwind(|| panic!("boom"));
        assert!(result.is_err());
        let _ = std::panic::take_hook();

        let sent = host::drain_captured();
        assert_eq!(sent.len(), 1);
        let command = host::decode_command(&sent[0]).unwrap();
        assert_eq!(command.name, CommandName::ReportPanic);
        match command.payload {
            Some(CommandPayload::ReportPanic(text)) => assert!(text.contains("boom")),
            other => panic!("wrong payload alternative: {other:?}"),
        }
    }
}
