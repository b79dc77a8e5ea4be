//! Centralized warning and error messages for CLI output.
//!
//! Everything here goes to stderr so stdout carries nothing but passwords.

use crossterm::style::Stylize;
use crossterm::tty::IsTty;

use super::quiet;

fn colored() -> bool {
    std::io::stderr().is_tty()
}

/// Print a warning message to stderr (yellow) - suppressed in quiet mode
pub fn warn(msg: &str) {
    if quiet::enabled() {
        return;
    }
    if colored() {
        eprintln!("{}", msg.yellow());
    } else {
        eprintln!("{msg}");
    }
}

/// Print an error message to stderr (red) - NOT suppressed (errors are always shown)
pub fn error(msg: &str) {
    if colored() {
        eprintln!("{}", msg.red());
    } else {
        eprintln!("{msg}");
    }
}

pub fn settings_load_failed(err: &str) {
    warn(&format!("Warning: failed to load settings, using defaults: {err}"));
}

pub fn settings_saved() {
    if !quiet::enabled() {
        eprintln!("Settings saved.");
    }
}

pub fn settings_save_failed(err: &str) {
    warn(&format!("Warning: failed to save settings: {err}"));
}

pub fn mlock_failed() {
    warn("Warning: mlock failed - urandom pool may be swapped to disk.");
    warn("Fix: ulimit -l unlimited, or setcap cap_ipc_lock=ep on the binary");
}

pub fn settings_path_missing() {
    warn("Warning: HOME is not set, settings not saved");
}

pub fn urandom_unavailable() {
    warn("Warning: /dev/urandom not available, using getrandom");
}

/// Print clipboard copied confirmation - suppressed in quiet mode
pub fn clipboard_copied(tool: &str) {
    if !quiet::enabled() {
        eprintln!("*** -COPIED TO CLIPBOARD ({tool})- ***");
    }
}

/// Print clipboard failure - NOT suppressed, but never fatal
pub fn clipboard_error(err: &str) {
    let msg = format!("Warning: could not copy to clipboard: {err}");
    if colored() {
        eprintln!("{}", msg.yellow());
    } else {
        eprintln!("{msg}");
    }
}
