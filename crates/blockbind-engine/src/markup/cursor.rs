/// A byte cursor over a markup fragment.
///
/// Parsing works on bytes; multi-byte characters only ever appear inside
/// text and attribute values, which are taken as whole slices.
#[derive(Clone)]
pub struct Cursor<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i..].starts_with(pat)
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.s.as_bytes().get(self.i).copied()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.s.len());
    }

    /// Consumes bytes while `pred` holds, returning the consumed slice.
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.i;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.i += 1;
        }
        &self.s[start..self.i]
    }

    /// Consumes up to and including the given pattern. If the pattern never
    /// occurs, consumes the rest of the input.
    pub fn eat_until_past(&mut self, pat: &[u8]) {
        while !self.eof() {
            if self.starts_with(pat) {
                self.bump_n(pat.len());
                return;
            }
            self.i += 1;
        }
    }

    pub fn skip_whitespace(&mut self) {
        self.eat_while(|b| b.is_ascii_whitespace());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eat_while_returns_slice() {
        let mut cur = Cursor::new("abc123");
        assert_eq!(cur.eat_while(|b| b.is_ascii_alphabetic()), "abc");
        assert_eq!(cur.peek(), Some(b'1'));
    }

    #[test]
    fn eat_until_past_consumes_pattern() {
        let mut cur = Cursor::new("xx-->rest");
        cur.eat_until_past(b"-->");
        assert_eq!(cur.peek(), Some(b'r'));
    }

    #[test]
    fn eat_until_past_missing_pattern_hits_eof() {
        let mut cur = Cursor::new("no terminator");
        cur.eat_until_past(b"-->");
        assert!(cur.eof());
    }

    #[test]
    fn bump_n_clamps_to_end() {
        let mut cur = Cursor::new("ab");
        cur.bump_n(10);
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
    }
}
