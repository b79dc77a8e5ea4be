//! Buffered password output that leaves no copies behind.

use std::io::{self, Write};

use zeroize::Zeroize;

const CAPACITY: usize = 8 * 1024;

/// Like `BufWriter`, but the buffer is zeroed after every flush and on drop.
pub struct SecureBufWriter<W: Write> {
    inner: W,
    buf: Vec<u8>,
}

impl<W: Write> SecureBufWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(CAPACITY),
        }
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        let result = self.inner.write_all(&self.buf);
        // Zeroize the whole allocation, then keep the capacity for reuse.
        self.buf.zeroize();
        self.buf.reserve(CAPACITY);
        result
    }
}

impl<W: Write> Write for SecureBufWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if self.buf.len() + data.len() > CAPACITY {
            self.flush_buf()?;
        }
        if data.len() >= CAPACITY {
            return self.inner.write(data);
        }
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_buf()?;
        self.inner.flush()
    }
}

impl<W: Write> Drop for SecureBufWriter<W> {
    fn drop(&mut self) {
        if !self.buf.is_empty() {
            let _ = self.flush_buf();
        }
        self.buf.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_forwards_everything() {
        let mut sink = Vec::new();
        {
            let mut w = SecureBufWriter::new(&mut sink);
            w.write_all(b"abc\n").unwrap();
            w.write_all(b"def\n").unwrap();
            w.flush().unwrap();
            assert!(w.buf.is_empty());
        }
        assert_eq!(sink, b"abc\ndef\n");
    }

    #[test]
    fn drop_flushes_pending_bytes() {
        let mut sink = Vec::new();
        {
            let mut w = SecureBufWriter::new(&mut sink);
            w.write_all(b"pending").unwrap();
        }
        assert_eq!(sink, b"pending");
    }

    #[test]
    fn large_writes_bypass_the_buffer() {
        let mut sink = Vec::new();
        let big = vec![b'x'; CAPACITY * 2];
        {
            let mut w = SecureBufWriter::new(&mut sink);
            w.write_all(b"head").unwrap();
            w.write_all(&big).unwrap();
            w.flush().unwrap();
        }
        assert_eq!(sink.len(), 4 + CAPACITY * 2);
        assert!(sink.starts_with(b"head"));
    }
}
