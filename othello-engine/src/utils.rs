//! Miscellaneous project utilities.

use crate::EDGE_LENGTH;
use std::fmt::{self, Write};

/// Format 64 characters into a grid labelled with columns a-h and rows 1-8.
/// `piece_iter` must yield exactly 64 items, starting at a1.
pub fn format_grid<T, W>(mut piece_iter: T, f: &mut W) -> fmt::Result
where
    T: Iterator<Item = char>,
    W: Write,
{
    write!(f, "   a b c d e f g h")?;

    for row in 0..EDGE_LENGTH {
        write!(f, "\n {} ", row + 1)?;
        for _ in 0..EDGE_LENGTH {
            write!(f, "{} ", piece_iter.next().ok_or(fmt::Error)?)?;
        }
    }

    match piece_iter.next() {
        None => Ok(()),
        _ => Err(fmt::Error),
    }
}
