//! Secure random sampling.
//!
//! Every draw comes from an [`EntropySource`]: the OS CSPRNG by default, or a
//! locked `/dev/urandom` pool. Indices are reduced with mask-and-reject so no
//! range is skewed by modulo.

mod os;
pub mod urand;

pub use os::OsEntropy;
pub use urand::Urandom;

use std::path::Path;

use zeroize::Zeroize;

use crate::error::{Error, Result};

// =============================================================================
// Entropy
// =============================================================================

/// A cryptographically secure byte source.
pub trait EntropySource {
    /// Fill `buf` completely or fail; partial fills are never reported as success.
    fn fill(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Short human-readable name, used in diagnostics.
    fn name(&self) -> &'static str;
}

impl<S: EntropySource + ?Sized> EntropySource for Box<S> {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).fill(buf)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Outcome of the `--urandom` request, for the caller to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrandomStatus {
    NotRequested,
    Locked,
    /// In use, but `mlock` was refused.
    Unlocked,
    /// Could not be opened; the OS CSPRNG is used instead.
    Unavailable,
}

/// Pick the urandom pool at `device` when given and usable, otherwise the OS
/// CSPRNG.
pub fn select_source(device: Option<&Path>) -> (Box<dyn EntropySource>, UrandomStatus) {
    let Some(device) = device else {
        return (Box::new(OsEntropy), UrandomStatus::NotRequested);
    };
    match Urandom::open(device) {
        Ok(pool) => {
            let status = if pool.is_locked() {
                UrandomStatus::Locked
            } else {
                UrandomStatus::Unlocked
            };
            (Box::new(pool), status)
        }
        Err(e) => {
            tracing::debug!(error = %e, "urandom pool unavailable, falling back to getrandom");
            (Box::new(OsEntropy), UrandomStatus::Unavailable)
        }
    }
}

// =============================================================================
// Sampler
// =============================================================================

pub struct Sampler<S> {
    source: S,
}

impl<S: EntropySource> Sampler<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    fn next_u64(&mut self) -> Result<u64> {
        let mut bytes = [0u8; 8];
        self.source.fill(&mut bytes)?;
        let v = u64::from_le_bytes(bytes);
        bytes.zeroize();
        Ok(v)
    }

    /// Uniform integer in `[0, n)`.
    ///
    /// Draws are masked down to the smallest power of two covering `n` and
    /// rejected when they land outside the range, so every index has exactly
    /// the same probability. Expected draws per call are below two.
    pub fn uniform_index(&mut self, n: usize) -> Result<usize> {
        if n == 0 {
            return Err(Error::InvalidRange(n));
        }

        let bound = n as u64;
        let mask = bound
            .checked_next_power_of_two()
            .map_or(u64::MAX, |p| p - 1);

        loop {
            let v = self.next_u64()? & mask;
            if v < bound {
                return Ok(v as usize);
            }
        }
    }

    /// One element of `set`, chosen uniformly.
    pub fn pick<T: Copy>(&mut self, set: &[T]) -> Result<T> {
        if set.is_empty() {
            return Err(Error::EmptySet);
        }
        Ok(set[self.uniform_index(set.len())?])
    }

    /// Fisher-Yates, last index down to 1.
    pub fn shuffle<T>(&mut self, buf: &mut [T]) -> Result<()> {
        for i in (1..buf.len()).rev() {
            let j = self.uniform_index(i + 1)?;
            buf.swap(i, j);
        }
        Ok(())
    }
}

// =============================================================================
// Test doubles
// =============================================================================
