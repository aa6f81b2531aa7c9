use super::str_reader::StrPeeker;
use std::collections::VecDeque;
use std::fmt;

/// Returned by a bounded source when asked to look
/// further ahead than its buffer allows.
#[derive(Debug, PartialEq, Eq)]
pub struct PeekTooFar;

/// A character source that can be consumed one char at a time,
/// and peeked at some offset ahead of its read position
/// without consuming anything.
///
/// Both methods return `None` at (or beyond) the end of the stream.
pub trait PeekOffset {
    fn next(&mut self) -> Option<char>;
    fn peek_at(&mut self, offset: usize) -> Result<Option<char>, PeekTooFar>;
}

/// Location of a char in the source.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct Span {
    /// 1-based
    pub line: usize,
    /// 1-based, counted in chars
    pub column: usize,
    /// absolute char offset, 0-based
    pub char_index: usize,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Wraps a `PeekOffset` source, tracks the position
/// of the next unconsumed char, and makes lookahead unbounded:
/// chars the source can't keep in its own window are moved
/// into `growable_buffer`, in order.
#[derive(Debug)]
pub struct SourceInput<T> {
    src: T,
    line: usize,
    column: usize,
    char_index: usize,
    growable_buffer: VecDeque<Option<char>>,
}

impl<T: PeekOffset> SourceInput<T> {
    pub fn new(src: T) -> Self {
        Self {
            src,
            line: 1,
            column: 1,
            char_index: 0,
            growable_buffer: VecDeque::new(),
        }
    }

    /// return the span of the next char
    /// to be read.
    pub fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.column,
            char_index: self.char_index,
        }
    }

    /// read a char and update position
    pub fn advance(&mut self) -> Option<char> {
        let maybe_char: Option<char> = match self.growable_buffer.pop_front() {
            Some(maybe_char) => maybe_char,
            None => self.src.next(),
        };
        let c = maybe_char?;
        self.char_index += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Look at the char `index` positions after the next one,
    /// without moving.
    pub fn peek(&mut self, index: usize) -> Option<char> {
        loop {
            if let Some(&c) = self.growable_buffer.get(index) {
                return c;
            }
            match self.src.peek_at(index - self.growable_buffer.len()) {
                Ok(maybe_c) => return maybe_c,
                // spill the source window into the heap buffer,
                // until `index` fits in it (or lands in it,
                // for sources without any window)
                Err(PeekTooFar) => self.growable_buffer.push_back(self.src.next()),
            }
        }
    }
}

impl<'src, const SIZE: usize> SourceInput<StrPeeker<'src, { SIZE }>> {
    pub fn from_str(src: &'src str) -> Self {
        Self::new(StrPeeker::<'src, SIZE>::new(src))
    }
}

#[test]
fn test_cursor() {
    let mut cursor: SourceInput<StrPeeker<'_, 64>> = SourceInput::from_str("01");
    assert_eq!(cursor.peek(0), Some('0'));
    assert_eq!(cursor.peek(1), Some('1'));
    assert_eq!(cursor.peek(2), None);
    assert_eq!(cursor.advance(), Some('0'));
    assert_eq!(cursor.advance(), Some('1'));
    assert_eq!(cursor.peek(0), None);
    assert_eq!(cursor.advance(), None);
    assert_eq!(cursor.span().char_index, 2);
}

#[test]
fn test_peek_beyond_source_window() {
    // a 4 chars window forces the spill into the growable buffer
    let mut cursor: SourceInput<StrPeeker<'_, 4>> = SourceInput::from_str("abcdefghij");
    assert_eq!(cursor.peek(9), Some('j'));
    assert_eq!(cursor.peek(10), None);
    assert_eq!(cursor.peek(2), Some('c'));
    assert_eq!(cursor.span().char_index, 0);

    let read: String = std::iter::from_fn(|| cursor.advance()).collect();
    assert_eq!(read, "abcdefghij");
}

#[test]
fn test_span_tracks_lines() {
    let mut cursor: SourceInput<StrPeeker<'_, 8>> = SourceInput::from_str("a\nbc");
    assert_eq!(
        cursor.span(),
        Span {
            line: 1,
            column: 1,
            char_index: 0
        }
    );
    cursor.advance();
    cursor.advance();
    assert_eq!(
        cursor.span(),
        Span {
            line: 2,
            column: 1,
            char_index: 2
        }
    );
    cursor.advance();
    assert_eq!(cursor.span().to_string(), "2:2");
}

#[test]
fn test_peek_without_source_window() {
    // every char goes through the growable buffer
    let mut cursor: SourceInput<StrPeeker<'_, 0>> = SourceInput::from_str("ab");
    assert_eq!(cursor.peek(0), Some('a'));
    assert_eq!(cursor.peek(1), Some('b'));
    assert_eq!(cursor.peek(2), None);
    assert_eq!(cursor.peek(0), Some('a'));
    assert_eq!(cursor.advance(), Some('a'));
    assert_eq!(cursor.peek(0), Some('b'));
    assert_eq!(cursor.advance(), Some('b'));
    assert_eq!(cursor.advance(), None);
    assert_eq!(cursor.peek(0), None);
}
