//! CLI context - bundles settings and flags.

use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use super::{CliFlags, prompts, quiet};
use crate::clipboard;
use crate::error::Result;
use crate::pass::{self, Password};
use crate::rand::{self, Sampler, UrandomStatus};
use crate::settings::{self, Settings};

/// Filesystem locations a run touches.
pub struct Paths {
    /// Settings file; `None` when `HOME` is unset.
    pub settings: Option<PathBuf>,
    pub urandom: PathBuf,
    /// `PATH`-style list searched for a clipboard tool.
    pub search: OsString,
}

impl Paths {
    pub fn from_env() -> Self {
        Self {
            settings: settings::file_path(),
            urandom: PathBuf::from(rand::urand::DEVICE),
            search: env::var_os("PATH").unwrap_or_default(),
        }
    }
}

/// Application context for CLI mode.
pub struct Context {
    pub settings: Settings,
    pub flags: CliFlags,
    paths: Paths,
}

impl Context {
    pub fn new(flags: CliFlags) -> Self {
        Self::with_paths(flags, Paths::from_env())
    }

    /// Start from the saved settings (or the defaults with `--default`) and
    /// overlay the command line.
    pub fn with_paths(flags: CliFlags, paths: Paths) -> Self {
        quiet::set(flags.quiet);

        let base = match (&paths.settings, flags.default) {
            (Some(path), false) => Settings::load_from(path).unwrap_or_else(|e| {
                prompts::settings_load_failed(&e.to_string());
                Settings::default()
            }),
            _ => Settings::default(),
        };

        let mut ctx = Self {
            settings: base,
            flags,
            paths,
        };
        ctx.apply_flags();
        ctx
    }

    /// Generate and print passwords to stdout.
    pub fn run(&self) -> Result<()> {
        let stdout = io::stdout();
        self.run_to(stdout.lock())
    }

    /// Generate into `out`, then save and copy. Settings and clipboard
    /// problems only warn.
    pub fn run_to<W: Write>(&self, out: W) -> Result<()> {
        let device = self.flags.urandom.then_some(self.paths.urandom.as_path());
        let (source, status) = rand::select_source(device);
        match status {
            UrandomStatus::Unavailable => prompts::urandom_unavailable(),
            UrandomStatus::Unlocked => prompts::mlock_failed(),
            UrandomStatus::NotRequested | UrandomStatus::Locked => {}
        }
        let mut sampler = Sampler::new(source);

        let last = pass::generate_batch(&self.settings, &mut sampler, out)?;

        // Saved only once these settings have produced passwords.
        self.handle_save();

        if let Some(password) = last {
            self.copy_to_clipboard(&password);
        }
        Ok(())
    }

    /// Apply CLI flags to settings, then clamp.
    fn apply_flags(&mut self) {
        let s = &mut self.settings;
        let f = &self.flags;

        if let Some(len) = f.length {
            s.pass_length = usize::try_from(len).unwrap_or(0);
        }
        if let Some(count) = f.count {
            s.number_of_passwords = usize::try_from(count).unwrap_or(0);
        }
        if let Some(v) = f.lower {
            s.lowercase = v;
        }
        if let Some(v) = f.upper {
            s.uppercase = v;
        }
        if let Some(v) = f.digits {
            s.digits = v;
        }
        if let Some(v) = f.symbols {
            s.symbols = v;
        }
        if let Some(ref chars) = f.exclude {
            s.exclude = chars.clone();
        }
        if let Some(v) = f.no_ambiguous {
            s.no_ambiguous = v;
        }
        if let Some(v) = f.copy {
            s.to_clipboard = v;
        }

        s.clamp();
    }

    fn handle_save(&self) {
        if !self.flags.save {
            return;
        }
        let Some(path) = &self.paths.settings else {
            prompts::settings_path_missing();
            return;
        };
        match self.settings.save_to(path) {
            Ok(()) => prompts::settings_saved(),
            Err(e) => prompts::settings_save_failed(&e.to_string()),
        }
    }

    fn copy_to_clipboard(&self, password: &Password) {
        match clipboard::copy_using(password.as_str(), &self.paths.search) {
            Ok(tool) => prompts::clipboard_copied(tool),
            Err(e) => {
                tracing::debug!(error = %e, "clipboard copy failed");
                prompts::clipboard_error(&e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::error::Error;
    use crate::settings::{MIN_COUNT, MIN_LENGTH};

    fn context(flags: CliFlags) -> Context {
        Context::new(CliFlags {
            default: true,
            ..flags
        })
    }

    #[test]
    fn defaults_match_the_documented_table() {
        let ctx = context(CliFlags::default());
        let s = &ctx.settings;
        assert_eq!(s.pass_length, 16);
        assert!(s.lowercase && s.uppercase && s.digits);
        assert!(!s.symbols);
        assert_eq!(s.number_of_passwords, 1);
        assert!(s.exclude.is_empty());
        assert!(s.no_ambiguous);
        assert!(!s.to_clipboard);
    }

    #[test]
    fn flags_override_settings() {
        let ctx = context(CliFlags {
            length: Some(30),
            count: Some(4),
            upper: Some(false),
            symbols: Some(true),
            exclude: Some("xyz".into()),
            no_ambiguous: Some(false),
            copy: Some(true),
            ..Default::default()
        });
        let s = &ctx.settings;
        assert_eq!(s.pass_length, 30);
        assert_eq!(s.number_of_passwords, 4);
        assert!(!s.uppercase);
        assert!(s.symbols);
        assert_eq!(s.exclude, "xyz");
        assert!(!s.no_ambiguous);
        assert!(s.to_clipboard);
    }

    #[test]
    fn out_of_range_numbers_are_clamped() {
        let ctx = context(CliFlags {
            length: Some(-3),
            count: Some(0),
            ..Default::default()
        });
        assert_eq!(ctx.settings.pass_length, MIN_LENGTH);
        assert_eq!(ctx.settings.number_of_passwords, MIN_COUNT);

        let ctx = context(CliFlags {
            length: Some(2),
            ..Default::default()
        });
        assert_eq!(ctx.settings.pass_length, MIN_LENGTH);
    }

    /// Settings file, urandom device and clipboard search all inside `dir`,
    /// none of them present yet.
    fn sandbox(dir: &Path) -> Paths {
        Paths {
            settings: Some(dir.join("settings")),
            urandom: dir.join("urandom"),
            search: dir.as_os_str().to_owned(),
        }
    }

    fn lines(out: &[u8]) -> Vec<String> {
        String::from_utf8(out.to_vec())
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn clipboard_failure_leaves_output_and_result_alone() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::with_paths(
            CliFlags {
                default: true,
                count: Some(3),
                copy: Some(true),
                ..Default::default()
            },
            sandbox(dir.path()),
        );

        let mut out = Vec::new();
        ctx.run_to(&mut out).unwrap();

        let printed = lines(&out);
        assert_eq!(printed.len(), 3);
        assert!(printed.iter().all(|l| l.chars().count() == 16));
    }

    #[test]
    fn save_persists_settings_for_the_next_run() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::with_paths(
            CliFlags {
                default: true,
                save: true,
                length: Some(24),
                symbols: Some(true),
                ..Default::default()
            },
            sandbox(dir.path()),
        );
        let mut out = Vec::new();
        ctx.run_to(&mut out).unwrap();
        assert_eq!(lines(&out).len(), 1);

        let next = Context::with_paths(CliFlags::default(), sandbox(dir.path()));
        assert_eq!(next.settings.pass_length, 24);
        assert!(next.settings.symbols);
    }

    #[test]
    fn unusable_settings_are_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("settings");
        fs::write(&file, "20,true,true,true,false,1,,true,false\n").unwrap();

        let ctx = Context::with_paths(
            CliFlags {
                save: true,
                lower: Some(false),
                upper: Some(false),
                digits: Some(false),
                ..Default::default()
            },
            sandbox(dir.path()),
        );
        let mut out = Vec::new();
        let r = ctx.run_to(&mut out);

        assert!(matches!(r, Err(Error::EmptyAlphabet)));
        assert!(out.is_empty());
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "20,true,true,true,false,1,,true,false\n"
        );
    }

    #[test]
    fn missing_urandom_device_falls_back_and_still_generates() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::with_paths(
            CliFlags {
                default: true,
                urandom: true,
                length: Some(20),
                ..Default::default()
            },
            sandbox(dir.path()),
        );
        let mut out = Vec::new();
        ctx.run_to(&mut out).unwrap();

        let printed = lines(&out);
        assert_eq!(printed.len(), 1);
        assert_eq!(printed[0].chars().count(), 20);
    }

    #[test]
    fn oversized_length_is_reported_not_panicked() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::with_paths(
            CliFlags {
                default: true,
                length: Some(i64::MAX),
                ..Default::default()
            },
            sandbox(dir.path()),
        );
        let mut out = Vec::new();
        assert!(matches!(ctx.run_to(&mut out), Err(Error::TooLong(_))));
        assert!(out.is_empty());
    }
}
