use super::ring_buffer::RingBuffer;
use super::source::{PeekOffset, PeekTooFar};
use std::str::Chars;

/// In-memory source: walks a `&str` forward,
/// keeping at most `SIZE` chars of lookahead.
///
/// Peeks beyond the window report `PeekTooFar`, and `SourceInput`
/// takes over. `SIZE == 0` is allowed: every peek then goes through
/// `SourceInput`'s spill buffer.
pub struct StrPeeker<'src, const SIZE: usize> {
    src: Chars<'src>,
    buffer: RingBuffer<SIZE, char>,
}

impl<'src, const SIZE: usize> StrPeeker<'src, { SIZE }> {
    pub fn new(src: &'src str) -> Self {
        Self {
            src: src.chars(),
            buffer: RingBuffer::<SIZE, char>::init('\0'),
        }
    }
}

impl<'src, const SIZE: usize> PeekOffset for StrPeeker<'src, { SIZE }> {
    fn peek_at(&mut self, n: usize) -> Result<Option<char>, PeekTooFar> {
        if n >= SIZE {
            return Err(PeekTooFar);
        }
        while self.buffer.len() <= n {
            match self.src.next() {
                None => return Ok(None),
                // `n < SIZE`, so the window always has room here
                Some(c) => {
                    let _ = self.buffer.append(c);
                }
            }
        }
        Ok(self.buffer.get(n))
    }

    fn next(&mut self) -> Option<char> {
        if !self.buffer.is_empty() {
            return self.buffer.pop();
        }
        self.src.next()
    }
}

#[test]
fn test_peek_does_not_consume() {
    let mut peeker = StrPeeker::<'_, 8>::new("xyz");
    assert_eq!(peeker.peek_at(2), Ok(Some('z')));
    assert_eq!(peeker.peek_at(0), Ok(Some('x')));
    assert_eq!(peeker.peek_at(3), Ok(None));
    assert_eq!(peeker.next(), Some('x'));
    assert_eq!(peeker.peek_at(0), Ok(Some('y')));
    assert_eq!(peeker.next(), Some('y'));
    assert_eq!(peeker.next(), Some('z'));
    assert_eq!(peeker.next(), None);
}

#[test]
fn test_peek_too_far() {
    let mut peeker = StrPeeker::<'_, 2>::new("abc");
    assert_eq!(peeker.peek_at(1), Ok(Some('b')));
    assert_eq!(peeker.peek_at(2), Err(PeekTooFar));
}

#[test]
fn test_multibyte_chars() {
    let mut peeker = StrPeeker::<'_, 4>::new("é+ß");
    assert_eq!(peeker.peek_at(2), Ok(Some('ß')));
    assert_eq!(peeker.next(), Some('é'));
}
