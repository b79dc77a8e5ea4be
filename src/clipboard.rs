//! Clipboard export through external OS utilities.

use std::env;
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

pub struct Tool {
    pub name: &'static str,
    pub args: &'static [&'static str],
}

/// Tried in order; the first one found on `PATH` wins.
pub const TOOLS: &[Tool] = &[
    Tool {
        name: "termux-clipboard-set",
        args: &[],
    },
    Tool {
        name: "wl-copy",
        args: &[],
    },
    Tool {
        name: "xclip",
        args: &["-selection", "clipboard"],
    },
    Tool {
        name: "xsel",
        args: &["--clipboard", "--input"],
    },
    Tool {
        name: "pbcopy",
        args: &[],
    },
];

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard tool found (termux-clipboard-set/wl-copy/xclip/xsel/pbcopy)")]
    NoTool,

    #[error("failed to start {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("failed to send text to {tool}: {source}")]
    Write {
        tool: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{tool} exited with {status}")]
    Failed {
        tool: &'static str,
        status: ExitStatus,
    },
}

/// Copy `text` verbatim through the first tool found in the `PATH`-style
/// `search` list. Returns the name of the tool that took it.
pub fn copy_using(text: &str, path: &OsStr) -> Result<&'static str, ClipboardError> {
    let (tool, exe) = find_tool(path).ok_or(ClipboardError::NoTool)?;
    tracing::debug!(tool = tool.name, "copying to clipboard");

    let mut child = Command::new(exe)
        .args(tool.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| ClipboardError::Spawn {
            tool: tool.name,
            source,
        })?;

    // Dropping stdin closes the pipe so the tool sees EOF.
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };

    let status = child.wait().map_err(|source| ClipboardError::Spawn {
        tool: tool.name,
        source,
    })?;

    written.map_err(|source| ClipboardError::Write {
        tool: tool.name,
        source,
    })?;

    if !status.success() {
        return Err(ClipboardError::Failed {
            tool: tool.name,
            status,
        });
    }
    Ok(tool.name)
}

fn find_tool(path: &OsStr) -> Option<(&'static Tool, PathBuf)> {
    TOOLS.iter().find_map(|tool| {
        env::split_paths(path)
            .map(|dir| dir.join(tool.name))
            .find(|candidate| is_executable(candidate))
            .map(|exe| (tool, exe))
    })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
