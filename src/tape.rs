//! This module defines the `Tape`, a single growable tape with one read/write head.
//!
//! Cells live in a `VecDeque` so growing the tape to the left is as cheap as growing it
//! to the right. The head index always stays within `[0, len)`.

use crate::types::{BLANK_SYMBOL, LEFT_MARGIN, RIGHT_MARGIN};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<char>,
    head: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self {
            cells: VecDeque::from([BLANK_SYMBOL]),
            head: 0,
        }
    }
}

impl Tape {
    /// Loads `input` onto a fresh tape padded with blank margins on both sides.
    /// The head starts on the first input symbol.
    pub fn new(input: &str) -> Self {
        let cells: VecDeque<char> = std::iter::repeat(BLANK_SYMBOL)
            .take(LEFT_MARGIN)
            .chain(input.chars())
            .chain(std::iter::repeat(BLANK_SYMBOL).take(RIGHT_MARGIN))
            .collect();

        Self {
            cells,
            head: LEFT_MARGIN,
        }
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> char {
        self.cells[self.head]
    }

    /// Writes `symbol` at the head.
    pub fn write(&mut self, symbol: char) {
        self.cells[self.head] = symbol;
    }

    /// Moves the head one cell left. At index 0 a blank is inserted in front instead,
    /// so the head stays at 0 while the content shifts right.
    pub fn move_left(&mut self) {
        if self.head == 0 {
            self.cells.push_front(BLANK_SYMBOL);
        } else {
            self.head -= 1;
        }
    }

    /// Moves the head one cell right, appending a blank when it runs off the end.
    pub fn move_right(&mut self) {
        self.head += 1;
        if self.head >= self.cells.len() {
            self.cells.push_back(BLANK_SYMBOL);
        }
    }

    /// Returns the absolute head index.
    pub fn head(&self) -> usize {
        self.head
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a tape holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns up to `width` cells around the head, together with the head's offset
    /// inside that slice. The window starts `width / 2` cells left of the head, clamped
    /// to the tape bounds.
    ///
    /// |_|_|1|0|#|1|_|   tape, head on '#'
    ///      [1 0 # 1]    window(4) = ("10#1", 2)
    pub fn window(&self, width: usize) -> (String, usize) {
        let left = self.head.saturating_sub(width / 2);
        let right = self.cells.len().min(left + width);
        let visible: String = self.cells.range(left..right).collect();

        (visible, self.head - left)
    }

    /// The tape content without leading or trailing blanks. May be empty.
    pub fn core(&self) -> String {
        let content: String = self.cells.iter().collect();
        content.trim_matches(BLANK_SYMBOL).to_string()
    }

    /// The tape content without leading or trailing blanks, or a single blank if
    /// nothing else is left.
    pub fn trimmed(&self) -> String {
        let core = self.core();
        if core.is_empty() {
            BLANK_SYMBOL.to_string()
        } else {
            core
        }
    }

    /// Returns the full tape content, blanks included.
    #[cfg(test)]
    fn contents(&self) -> String {
        self.cells.iter().collect()
    }
}
