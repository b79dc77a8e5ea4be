//! Operating system CSPRNG.

use super::EntropySource;
use crate::error::Result;

/// `getrandom(2)` on Linux, `BCryptGenRandom` on Windows, and so on.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    #[inline]
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        getrandom::fill(buf)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "getrandom"
    }
}
