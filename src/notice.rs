//! Modal notices shown when a command fails or finishes.

use rfd::{MessageButtons, MessageDialog, MessageLevel};

use crate::error::{Error, Severity};

fn level(severity: Severity) -> MessageLevel {
    match severity {
        Severity::Info => MessageLevel::Info,
        Severity::Warning => MessageLevel::Warning,
        Severity::Error => MessageLevel::Error,
    }
}

/// Logs `err` and blocks on a message box describing it.
pub fn report(err: &Error) {
    match err.severity() {
        Severity::Info => log::info!("{err}"),
        Severity::Warning => log::warn!("{err}"),
        Severity::Error => log::error!("{err}"),
    }
    show(err.severity(), err.title(), &err.to_string());
}

pub fn info(title: &str, message: &str) {
    log::info!("{message}");
    show(Severity::Info, title, message);
}

fn show(severity: Severity, title: &str, message: &str) {
    MessageDialog::new()
        .set_level(level(severity))
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
