//! Password generation settings.

mod file;

use std::io;
use std::path::Path;

pub use file::path as file_path;

pub const MIN_LENGTH: usize = 4;
pub const MIN_COUNT: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub pass_length: usize,
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
    pub number_of_passwords: usize,
    pub exclude: String,
    pub no_ambiguous: bool,
    pub to_clipboard: bool,
}

impl Settings {
    /// Defaults overlaid with the file at `path`, if there is one.
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let mut settings = Settings::default();
        file::load(&mut settings, path)?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        file::save(self, path)
    }

    /// Raise length and count to their floors.
    pub fn clamp(&mut self) {
        self.pass_length = self.pass_length.max(MIN_LENGTH);
        self.number_of_passwords = self.number_of_passwords.max(MIN_COUNT);
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pass_length: 16,
            lowercase: true,
            uppercase: true,
            digits: true,
            symbols: false,
            number_of_passwords: 1,
            exclude: String::new(),
            no_ambiguous: true,
            to_clipboard: false,
        }
    }
}
