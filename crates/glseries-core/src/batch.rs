use std::ops::Range;

/// A contiguous run of vertices submitted in one draw call.
///
/// `offset` and `count` are in vertices (one vertex = two `f32`s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Batch {
    pub offset: usize,
    pub count: usize,
}

impl Batch {
    pub const fn new(offset: usize, count: usize) -> Self {
        Self { offset, count }
    }

    /// One past the last vertex.
    pub const fn end(&self) -> usize {
        self.offset + self.count
    }

    /// Vertex index range.
    pub fn vertices(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Index range into an interleaved `[x, y, x, y, ..]` buffer.
    pub fn floats(&self) -> Range<usize> {
        self.offset * 2..self.end() * 2
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
