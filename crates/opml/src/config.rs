//! Parser limits

use crate::error::{Error, ErrorKind, Result};

/// Configuration for the OPML parser
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum element nesting depth (0 means unlimited)
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 256,
            max_size: 16 * 1024 * 1024, // 16 MB default
        }
    }
}

impl Config {
    /// Create a new config with unlimited depth and size
    pub const fn unlimited() -> Self {
        Self {
            max_depth: 0,
            max_size: 0,
        }
    }

    /// Create a new config with specific limits
    pub const fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            max_depth,
            max_size,
        }
    }

    pub(crate) fn check_size(&self, len: usize) -> Result<()> {
        if self.max_size != 0 && len > self.max_size {
            return Err(Error::new(ErrorKind::MaxSizeExceeded { max: self.max_size }));
        }
        Ok(())
    }

    /// `depth` is the number of currently open elements, including the new one
    pub(crate) fn check_depth(&self, depth: usize, position: u64) -> Result<()> {
        if self.max_depth != 0 && depth > usize::from(self.max_depth) {
            return Err(Error::new(ErrorKind::MaxDepthExceeded {
                max: self.max_depth,
            })
            .at(position));
        }
        Ok(())
    }
}
