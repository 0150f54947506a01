//! Board squares and algebraic coordinates
//!
//! A [`Square`] is a file/rank pair with `a1 = (0, 0)` and `h8 = (7, 7)`.
//! Squares parse from and display as lowercase algebraic notation ("e4"),
//! the form spoken by UCI-style suggestion services and used in logs.

use crate::constants::BOARD_SIZE;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single board square identified by file (a-h) and rank (1-8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Create a square from raw file/rank indexes.
    ///
    /// Returns `None` when either index falls outside the board.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < BOARD_SIZE && rank < BOARD_SIZE {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// Create a square from indexes known to be in bounds.
    ///
    /// Out-of-range indexes are clamped to the board edge; use [`Square::new`]
    /// when the input is untrusted.
    pub const fn at(file: u8, rank: u8) -> Self {
        let file = if file < BOARD_SIZE { file } else { BOARD_SIZE - 1 };
        let rank = if rank < BOARD_SIZE { rank } else { BOARD_SIZE - 1 };
        Self { file, rank }
    }

    /// File index, 0 = a-file.
    pub const fn file(&self) -> u8 {
        self.file
    }

    /// Rank index, 0 = rank 1.
    pub const fn rank(&self) -> u8 {
        self.rank
    }

    /// Step by a signed file/rank delta, `None` when leaving the board.
    pub fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file as i8 + file_delta;
        let rank = self.rank as i8 + rank_delta;
        if (0..BOARD_SIZE as i8).contains(&file) && (0..BOARD_SIZE as i8).contains(&rank) {
            Some(Self {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    /// Parse lowercase algebraic notation such as "e4".
    pub fn parse(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let file_char = chars.next()?;
        let rank_char = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let file = (file_char as i16) - ('a' as i16);
        let rank = (rank_char as i16) - ('1' as i16);
        if (0..BOARD_SIZE as i16).contains(&file) && (0..BOARD_SIZE as i16).contains(&rank) {
            Some(Self {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file) as char;
        let rank = (b'1' + self.rank) as char;
        write!(f, "{file}{rank}")
    }
}
