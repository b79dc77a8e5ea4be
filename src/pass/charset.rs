//! Character classes and charset building for password generation.

use std::collections::HashSet;

use crate::settings::Settings;

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.?/|~<>";

/// Characters easily misread for one another: 0/O/o, 1/l/I/|, quotes,
/// small punctuation and space.
pub const AMBIGUOUS: &str = "O0oIl1|`'\";:,. ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Lower,
    Upper,
    Digit,
    Symbol,
}

impl CharClass {
    /// Canonical order; the alphabet is assembled in this order.
    pub const ALL: [CharClass; 4] = [
        CharClass::Lower,
        CharClass::Upper,
        CharClass::Digit,
        CharClass::Symbol,
    ];

    pub fn chars(self) -> &'static str {
        match self {
            CharClass::Lower => LOWERCASE,
            CharClass::Upper => UPPERCASE,
            CharClass::Digit => DIGITS,
            CharClass::Symbol => SYMBOLS,
        }
    }

    pub fn enabled(self, settings: &Settings) -> bool {
        match self {
            CharClass::Lower => settings.lowercase,
            CharClass::Upper => settings.uppercase,
            CharClass::Digit => settings.digits,
            CharClass::Symbol => settings.symbols,
        }
    }
}

/// Working alphabet plus one subset per class that must appear in the output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Charset {
    pub alphabet: Vec<char>,
    pub mandatory: Vec<Vec<char>>,
}

/// Build the charset from the enabled classes in `settings`.
pub fn build(settings: &Settings) -> Charset {
    let classes: Vec<&str> = CharClass::ALL
        .into_iter()
        .filter(|class| class.enabled(settings))
        .map(CharClass::chars)
        .collect();

    let charset = build_from(&classes, &settings.exclude, settings.no_ambiguous);
    tracing::debug!(
        classes = classes.len(),
        alphabet = charset.alphabet.len(),
        mandatory = charset.mandatory.len(),
        "charset built"
    );
    charset
}

/// Build from explicit class strings.
///
/// The alphabet is deduplicated across all classes; each mandatory subset is
/// deduplicated on its own, so a character shared by two classes still counts
/// once for each. A class left empty by filtering imposes no requirement.
pub fn build_from(classes: &[&str], exclude: &str, no_ambiguous: bool) -> Charset {
    let keep = |c: &char| !(no_ambiguous && AMBIGUOUS.contains(*c)) && !exclude.contains(*c);

    let alphabet = unique(classes.iter().flat_map(|class| class.chars()))
        .into_iter()
        .filter(keep)
        .collect();

    let mandatory = classes
        .iter()
        .map(|class| unique(class.chars().filter(keep)))
        .filter(|subset| !subset.is_empty())
        .collect();

    Charset {
        alphabet,
        mandatory,
    }
}

fn unique(chars: impl Iterator<Item = char>) -> Vec<char> {
    let mut seen = HashSet::new();
    chars.filter(|c| seen.insert(*c)).collect()
}
