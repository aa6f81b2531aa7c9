/// The lookahead window has no free slot left.
#[derive(Debug, PartialEq, Eq)]
pub struct BufferFull;

/// Fixed lookahead window of a source: chars peeked but not yet
/// consumed, oldest first. Peeking appends at the back,
/// consuming pops from the front.
///
/// Appending needs `SIZE > 0`; a zero-sized window is always empty.
#[derive(Debug)]
pub struct RingBuffer<const SIZE: usize, T> {
    buffer: [T; SIZE],
    start: usize,
    length: usize,
}

impl<const SIZE: usize, T: Copy> RingBuffer<SIZE, T> {
    /// Empty window, `filler` only occupies the unused slots.
    pub fn init(filler: T) -> Self {
        Self {
            buffer: [filler; SIZE],
            start: 0,
            length: 0,
        }
    }

    /// Push a freshly peeked item behind the others.
    pub fn append(&mut self, item: T) -> Result<(), BufferFull> {
        if self.length == SIZE {
            return Err(BufferFull);
        }
        let idx = (self.start + self.length) % SIZE;
        self.buffer[idx] = item;
        self.length += 1;
        Ok(())
    }

    /// Hand out the oldest peeked item.
    pub fn pop(&mut self) -> Option<T> {
        if self.length == 0 {
            return None;
        }
        let item = self.buffer[self.start];
        self.length -= 1;
        self.start = (self.start + 1) % SIZE;
        Some(item)
    }

    /// Item `index` positions after the oldest one.
    pub fn get(&self, index: usize) -> Option<T> {
        if index >= self.length {
            return None;
        }
        Some(self.buffer[(self.start + index) % SIZE])
    }

    /// number of peeked items waiting to be consumed
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

#[test]
fn test_ring_append_then_pop_in_order() {
    const SIZE: usize = 16;
    let mut buffer: RingBuffer<SIZE, char> = RingBuffer::init('\0');

    for c in "abcdefghijklmnop".chars() {
        assert_eq!(buffer.append(c), Ok(()));
    }
    assert_eq!(buffer.len(), SIZE);
    assert_eq!(buffer.get(0), Some('a'));
    assert_eq!(buffer.get(15), Some('p'));
    assert_eq!(buffer.get(16), None);

    let drained: String = std::iter::from_fn(|| buffer.pop()).collect();
    assert_eq!(drained, "abcdefghijklmnop");
    assert!(buffer.is_empty());
}

#[test]
fn test_ring_wraps_around() {
    let mut buffer: RingBuffer<4, char> = RingBuffer::init('\0');
    for c in "abc".chars() {
        let _ = buffer.append(c);
    }
    // free two slots at the front, then write past the physical end
    assert_eq!(buffer.pop(), Some('a'));
    assert_eq!(buffer.pop(), Some('b'));
    for c in "def".chars() {
        assert_eq!(buffer.append(c), Ok(()));
    }
    assert_eq!(buffer.len(), 4);
    assert_eq!(buffer.get(0), Some('c'));
    assert_eq!(buffer.get(3), Some('f'));
}

#[test]
fn test_overfilling() {
    let mut buffer: RingBuffer<2, char> = RingBuffer::init('\0');
    assert_eq!(buffer.append('x'), Ok(()));
    assert_eq!(buffer.append('y'), Ok(()));
    assert_eq!(buffer.append('z'), Err(BufferFull));
    assert_eq!(buffer.get(1), Some('y'));
}
