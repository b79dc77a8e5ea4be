//! Password generation and output.

pub mod charset;
mod generate;
mod output;

use std::fmt;

use zeroize::Zeroizing;

pub use generate::generate_batch;
pub use output::SecureBufWriter;

/// A finished password. Zeroized on drop; never printed by `Debug`.
pub struct Password(Zeroizing<String>);

impl Password {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}
