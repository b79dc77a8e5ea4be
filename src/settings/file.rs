//! Settings file persistence.
//!
//! One comma-separated line; `|` escapes the next character so the exclusion
//! list may contain commas and pipes.

use std::env;
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use super::Settings;

const FIELDS: usize = 9;

/// Written to a sibling temp file and renamed over `path`, so a crash leaves
/// either the old line or the new one.
pub fn save(settings: &Settings, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let data = format!(
        "{},{},{},{},{},{},{},{},{}\n",
        settings.pass_length,
        settings.lowercase,
        settings.uppercase,
        settings.digits,
        settings.symbols,
        settings.number_of_passwords,
        escape(&settings.exclude),
        settings.no_ambiguous,
        settings.to_clipboard,
    );

    let temp = temp_path(path);
    let written = write_synced(&temp, data.as_bytes()).and_then(|()| fs::rename(&temp, path));
    if written.is_err() {
        let _ = fs::remove_file(&temp);
    }
    written?;

    tracing::debug!(path = %path.display(), "settings saved");
    Ok(())
}

fn write_synced(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(data)?;
    file.sync_all()
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Overlay the file's values onto `settings`. A missing file is not an error.
pub fn load(settings: &mut Settings, path: &Path) -> io::Result<()> {
    let file = match OpenOptions::new().read(true).open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    let mut reader = BufReader::new(file);
    let mut line = String::new();
    reader.read_line(&mut line)?;

    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return Ok(());
    }

    let parts = split_escaped(line, ',');
    if parts.len() != FIELDS {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "{}: expected {FIELDS} fields, found {}",
                path.display(),
                parts.len()
            ),
        ));
    }

    settings.pass_length = parts[0].parse().unwrap_or(settings.pass_length);
    settings.lowercase = parts[1].parse().unwrap_or(settings.lowercase);
    settings.uppercase = parts[2].parse().unwrap_or(settings.uppercase);
    settings.digits = parts[3].parse().unwrap_or(settings.digits);
    settings.symbols = parts[4].parse().unwrap_or(settings.symbols);
    settings.number_of_passwords = parts[5].parse().unwrap_or(settings.number_of_passwords);
    settings.exclude = parts[6].clone();
    settings.no_ambiguous = parts[7].parse().unwrap_or(settings.no_ambiguous);
    settings.to_clipboard = parts[8].parse().unwrap_or(settings.to_clipboard);

    tracing::debug!(path = %path.display(), "settings loaded");
    Ok(())
}

#[inline]
pub fn path() -> Option<PathBuf> {
    let home = env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".config/passgen/settings"))
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == ',' || c == '|' {
            out.push('|');
        }
        out.push(c);
    }
    out
}

fn split_escaped(s: &str, delimiter: char) -> Vec<String> {
    let mut parts = vec![];
    let mut current = String::new();
    let mut escape_next = false;

    for c in s.chars() {
        if escape_next {
            current.push(c);
            escape_next = false;
        } else if c == '|' {
            escape_next = true;
        } else if c == delimiter {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);

    parts
}
