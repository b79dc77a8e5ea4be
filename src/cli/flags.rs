use clap::{ArgAction, Parser};

/// Flags left unset fall through to the saved settings, then to the defaults.
#[derive(Debug, Default, Parser)]
#[command(
    name = "passgen",
    version,
    about = "Generate passwords with at least one character from every selected class",
    after_help = "Boolean class options take an optional value: --symbols, --upper=false."
)]
pub struct CliFlags {
    /// Password length (minimum 4) [default: 16]
    #[arg(short = 'l', long, value_name = "N", allow_negative_numbers = true)]
    pub length: Option<i64>,

    /// Include lowercase letters [default: true]
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true,
          default_missing_value = "true", action = ArgAction::Set)]
    pub lower: Option<bool>,

    /// Include uppercase letters [default: true]
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true,
          default_missing_value = "true", action = ArgAction::Set)]
    pub upper: Option<bool>,

    /// Include digits [default: true]
    #[arg(short = 'n', long, value_name = "BOOL", num_args = 0..=1, require_equals = true,
          default_missing_value = "true", action = ArgAction::Set)]
    pub digits: Option<bool>,

    /// Include symbols [default: false]
    #[arg(short = 's', long, value_name = "BOOL", num_args = 0..=1, require_equals = true,
          default_missing_value = "true", action = ArgAction::Set)]
    pub symbols: Option<bool>,

    /// Number of passwords to generate (minimum 1) [default: 1]
    #[arg(short = 'c', long, value_name = "N", allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Characters to leave out of every class, e.g. "@0OIl| "
    #[arg(short = 'e', long, value_name = "CHARS")]
    pub exclude: Option<String>,

    /// Remove ambiguous characters such as O, 0, l, 1, | [default: true]
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true,
          default_missing_value = "true", action = ArgAction::Set)]
    pub no_ambiguous: Option<bool>,

    /// Copy the last password to the clipboard [default: false]
    #[arg(short = 'b', long, value_name = "BOOL", num_args = 0..=1, require_equals = true,
          default_missing_value = "true", action = ArgAction::Set)]
    pub copy: Option<bool>,

    /// Draw entropy from a locked /dev/urandom pool instead of getrandom
    #[arg(short = 'u', long)]
    pub urandom: bool,

    /// Suppress warnings and confirmations
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Print debug diagnostics to stderr
    #[arg(long)]
    pub verbose: bool,

    /// Ignore the saved settings file
    #[arg(short = 'd', long)]
    pub default: bool,

    /// Save the effective options as the new defaults
    #[arg(long)]
    pub save: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> CliFlags {
        CliFlags::try_parse_from(std::iter::once("passgen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn definition_is_consistent() {
        CliFlags::command().debug_assert();
    }

    #[test]
    fn nothing_given_means_nothing_set() {
        let f = parse(&[]);
        assert_eq!(f.length, None);
        assert_eq!(f.lower, None);
        assert_eq!(f.symbols, None);
        assert_eq!(f.copy, None);
    }

    #[test]
    fn bare_boolean_flag_enables() {
        let f = parse(&["-s", "--upper"]);
        assert_eq!(f.symbols, Some(true));
        assert_eq!(f.upper, Some(true));
    }

    #[test]
    fn boolean_flag_with_value() {
        let f = parse(&["--lower=false", "--digits=false", "--no-ambiguous=false"]);
        assert_eq!(f.lower, Some(false));
        assert_eq!(f.digits, Some(false));
        assert_eq!(f.no_ambiguous, Some(false));
    }

    #[test]
    fn numbers_and_strings() {
        let f = parse(&["-l", "24", "--count", "3", "--exclude", "0Ol1", "-b"]);
        assert_eq!(f.length, Some(24));
        assert_eq!(f.count, Some(3));
        assert_eq!(f.exclude.as_deref(), Some("0Ol1"));
        assert_eq!(f.copy, Some(true));
    }

    #[test]
    fn negative_numbers_parse_for_clamping() {
        let f = parse(&["-l", "-5", "-c", "-1"]);
        assert_eq!(f.length, Some(-5));
        assert_eq!(f.count, Some(-1));
    }

    #[test]
    fn garbage_is_rejected() {
        let r = CliFlags::try_parse_from(["passgen", "--length", "many"]);
        assert!(r.is_err());
        let r = CliFlags::try_parse_from(["passgen", "--bogus"]);
        assert!(r.is_err());
    }
}
