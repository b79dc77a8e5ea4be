//! Urandom pool - optional /dev/urandom entropy source via a locked buffer.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use zeroize::Zeroize;

use super::EntropySource;
use crate::error::{Error, Result};

pub const DEVICE: &str = "/dev/urandom";
const POOL_SIZE: usize = 64 * 1024; // 64KB

/// Bytes are read from the device in pool-sized chunks and handed out once.
/// Consumed bytes are zeroed immediately; the whole pool is zeroed and
/// unlocked on drop.
pub struct Urandom {
    file: File,
    pool: Box<[u8]>,
    pos: usize,
    locked: bool,
}

impl Urandom {
    pub fn open(device: &Path) -> Result<Self> {
        let file = File::open(device)
            .map_err(|e| Error::Entropy(format!("{}: {e}", device.display())))?;

        let mut pool = vec![0u8; POOL_SIZE].into_boxed_slice();
        let locked = lock(&mut pool);
        if !locked {
            tracing::debug!("mlock failed, urandom pool may be swapped to disk");
        }

        let mut urandom = Self {
            file,
            pool,
            pos: POOL_SIZE,
            locked,
        };
        urandom.refill()?;
        Ok(urandom)
    }

    /// Whether the pool is pinned in RAM.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    fn refill(&mut self) -> Result<()> {
        self.file
            .read_exact(&mut self.pool)
            .map_err(|e| Error::Entropy(format!("urandom refill: {e}")))?;
        self.pos = 0;
        Ok(())
    }
}

impl EntropySource for Urandom {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut written = 0;
        while written < buf.len() {
            if self.pos == POOL_SIZE {
                self.refill()?;
            }
            let n = (buf.len() - written).min(POOL_SIZE - self.pos);
            let chunk = &mut self.pool[self.pos..self.pos + n];
            buf[written..written + n].copy_from_slice(chunk);
            chunk.zeroize();
            self.pos += n;
            written += n;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        DEVICE
    }
}

impl Drop for Urandom {
    fn drop(&mut self) {
        self.pool[..].zeroize();
        if self.locked {
            unlock(&mut self.pool);
        }
    }
}

#[cfg(unix)]
fn lock(pool: &mut [u8]) -> bool {
    unsafe { libc::mlock(pool.as_ptr() as *const libc::c_void, pool.len()) == 0 }
}

#[cfg(unix)]
fn unlock(pool: &mut [u8]) {
    unsafe { libc::munlock(pool.as_ptr() as *const libc::c_void, pool.len()) };
}

#[cfg(not(unix))]
fn lock(_: &mut [u8]) -> bool {
    false
}

#[cfg(not(unix))]
fn unlock(_: &mut [u8]) {}
