//! Byte cursor over source text.
//!
//! The grammar is pure ASCII, so the cursor advances one byte at a time.
//! At end of input [`Cursor::current`] yields `0`, which no grammar rule
//! accepts; callers still check [`Cursor::is_eof`] to tell EOF from an
//! interior NUL.

/// Byte cursor with a position.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Cursor { src, pos: 0 }
    }

    /// Byte at the cursor, `0` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.src.as_bytes().get(self.pos).copied().unwrap_or(0)
    }

    #[inline]
    pub fn advance(&mut self) {
        if !self.is_eof() {
            self.pos += 1;
        }
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Source text from `start` up to the cursor.
    ///
    /// `start` must be a position this cursor previously reported.
    pub fn slice_from(&self, start: usize) -> &'a str {
        self.src.get(start..self.pos).unwrap_or("")
    }

    /// Advance while `pred` holds for the current byte.
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Skip spaces, tabs, carriage returns and newlines.
    pub fn skip_whitespace(&mut self) {
        self.eat_while(is_whitespace);
    }

    /// The character at the cursor, decoded, for error messages.
    pub fn current_char(&self) -> Option<char> {
        self.src.get(self.pos..).and_then(|rest| rest.chars().next())
    }
}

/// Whitespace accepted between forms.
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

#[cfg(test)]
mod tests;
