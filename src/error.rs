//! Errors raised while building passwords.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no characters left to build a password from (select a class or relax --exclude)")]
    EmptyAlphabet,

    #[error("cannot pick a character from an empty set")]
    EmptySet,

    #[error("invalid sampling range: {0}")]
    InvalidRange(usize),

    #[error("password length {0} is too large to allocate")]
    TooLong(usize),

    #[error("entropy source failed: {0}")]
    Entropy(String),

    #[error("failed to write passwords: {0}")]
    Output(#[source] std::io::Error),
}

impl From<getrandom::Error> for Error {
    fn from(e: getrandom::Error) -> Self {
        Error::Entropy(e.to_string())
    }
}
