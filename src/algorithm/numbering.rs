//! Sequential tile numbering
//!
//! The counter is a plain value threaded through tiling calls and handed
//! back with the result, so independent runs never share hidden state.

use crate::io::error::{Result, computation_error};
use crate::spatial::tiles::{TileName, TileSet};

/// Next numeric suffix to hand out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileCounter {
    next: u32,
}

impl TileCounter {
    /// Counter starting at a specific suffix
    pub const fn starting_at(next: u32) -> Self {
        Self { next }
    }

    /// Counter continuing after the highest name in `existing`
    ///
    /// Starts at zero when there is no existing set or it is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing set already uses the largest suffix
    pub fn after(existing: Option<&TileSet>) -> Result<Self> {
        match existing.and_then(TileSet::max_index) {
            None => Ok(Self::default()),
            Some(max) => max.checked_add(1).map(Self::starting_at).ok_or_else(|| {
                computation_error("tile numbering", &format!("suffix {max} cannot be extended"))
            }),
        }
    }

    /// Suffix the next issued name will carry
    pub const fn peek(self) -> u32 {
        self.next
    }

    /// Issue the next name and advance
    ///
    /// # Errors
    ///
    /// Returns an error once the numeric space is exhausted
    pub fn issue(&mut self) -> Result<TileName> {
        let name = TileName::new(self.next);
        self.next = self.next.checked_add(1).ok_or_else(|| {
            computation_error("tile numbering", &"no tile suffixes remain")
        })?;
        Ok(name)
    }
}
