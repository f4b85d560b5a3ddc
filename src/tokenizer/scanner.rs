use crate::result::{SplitError, SyntaxErrorKind};
use regex::Regex;

/// Cursor over borrowed SQL text. The offset is a byte offset that only moves forward
/// and always sits on a char boundary.
#[derive(Debug)]
pub struct Scanner<'a> {
    input: &'a str,
    offset: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Scanner { input, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Unconsumed input
    pub fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    pub fn is_eof(&self) -> bool {
        self.offset == self.input.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Check for an exact string at the cursor without consuming it
    pub fn is(&self, exact: &str) -> bool {
        self.rest().starts_with(exact)
    }

    /// Consume an exact string at the cursor
    pub fn consume_exact(&mut self, exact: &str) -> Option<&'a str> {
        if self.is(exact) {
            Some(self.advance(exact.len()))
        } else {
            None
        }
    }

    /// Consume the match of a `^`-anchored pattern. Empty matches consume nothing and yield `None`.
    pub fn consume(&mut self, pattern: &Regex) -> Option<&'a str> {
        let found = pattern.find(self.rest())?;
        if found.start() != 0 || found.is_empty() {
            return None;
        }
        Some(self.advance(found.end()))
    }

    /// Consume `len` bytes. `len` must land on a char boundary.
    pub fn advance(&mut self, len: usize) -> &'a str {
        let taken = &self.input[self.offset..self.offset + len];
        self.offset += len;
        taken
    }

    /// Consume a single char, if any
    pub fn bump(&mut self) -> Option<&'a str> {
        let c = self.peek()?;
        Some(self.advance(c.len_utf8()))
    }

    /// Source text between `start` and the cursor
    pub fn since(&self, start: usize) -> &'a str {
        &self.input[start..self.offset]
    }

    /// Build a syntax error positioned at the cursor
    pub fn fail(&self, kind: SyntaxErrorKind) -> SplitError {
        self.fail_at(kind, self.offset)
    }

    pub fn fail_at(&self, kind: SyntaxErrorKind, offset: usize) -> SplitError {
        let found = self.input[offset..].chars().next();
        SplitError::new_syntax(kind, offset, found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_is_anchored() {
        let word = Regex::new(r"^\w+").unwrap();
        let mut scanner = Scanner::new(" abc");
        assert_eq!(scanner.consume(&word), None);
        assert_eq!(scanner.offset(), 0);

        scanner.advance(1);
        assert_eq!(scanner.consume(&word), Some("abc"));
        assert!(scanner.is_eof());
    }

    #[test]
    fn test_empty_match_consumes_nothing() {
        let spaces = Regex::new(r"^\s*").unwrap();
        let mut scanner = Scanner::new("x");
        assert_eq!(scanner.consume(&spaces), None);
        assert_eq!(scanner.offset(), 0);
    }

    #[test]
    fn test_bump_respects_utf8() {
        let mut scanner = Scanner::new("é;");
        assert_eq!(scanner.bump(), Some("é"));
        assert_eq!(scanner.offset(), 2);
        assert!(scanner.is(";"));
        assert_eq!(scanner.consume_exact(";"), Some(";"));
        assert_eq!(scanner.bump(), None);
    }

    #[test]
    fn test_fail_reports_offset_and_char() {
        let mut scanner = Scanner::new("ab?");
        scanner.advance(2);
        match scanner.fail(SyntaxErrorKind::UnexpectedCharacter) {
            SplitError::Syntax { offset, found, .. } => {
                assert_eq!(offset, 2);
                assert_eq!(found, Some('?'));
            }
            other => panic!("Expected Syntax error, got: {other:?}"),
        }

        scanner.advance(1);
        match scanner.fail(SyntaxErrorKind::UnterminatedBlockComment) {
            SplitError::Syntax { offset, found, .. } => {
                assert_eq!(offset, 3);
                assert_eq!(found, None);
            }
            other => panic!("Expected Syntax error, got: {other:?}"),
        }
    }
}
