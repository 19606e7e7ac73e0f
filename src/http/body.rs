//! Read-once request body.

use std::io::{self, Cursor, Read};

use bytes::Bytes;

/// Memory-resident request body handed to handlers.
///
/// Reads drain it; once exhausted it keeps returning EOF.
#[derive(Debug, Default)]
pub struct Body {
    inner: Cursor<Bytes>,
}

impl Body {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Bytes not yet read.
    pub fn remaining(&self) -> usize {
        let total = self.inner.get_ref().len();
        total.saturating_sub(self.inner.position() as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Drain whatever has not been read yet.
    pub fn to_bytes(&mut self) -> Bytes {
        let start = (self.inner.position() as usize).min(self.inner.get_ref().len());
        let rest = self.inner.get_ref().slice(start..);
        self.inner.set_position(self.inner.get_ref().len() as u64);
        rest
    }

    /// Nothing to release.
    pub fn close(&mut self) {}
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self {
            inner: Cursor::new(bytes),
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Bytes::from(bytes).into()
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Bytes::from(s).into()
    }
}

impl From<&'static str> for Body {
    fn from(s: &'static str) -> Self {
        Bytes::from_static(s.as_bytes()).into()
    }
}
