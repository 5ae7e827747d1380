use crate::error::BufferError;
use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

type Result<T> = core::result::Result<T, BufferError>;

/// Reference point for [`ByteBuffer::seek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// Absolute offset from the start of the buffer.
    Start,
    /// Forward offset from the current cursor.
    Current,
    /// Backward offset from the last byte, i.e. `capacity - 1 - offset`.
    End,
}

/// A growable, bounds-checked byte store with a read/write cursor.
///
/// The backing storage is always fully initialized: `capacity` bytes exist,
/// zero-filled until written. Reads are checked against `capacity`; writes are
/// checked too and never grow the buffer on their own, so writers call
/// [`ByteBuffer::ensure_writable`] first.
///
/// Borrowed views ([`ByteBuffer::at`], [`ByteBuffer::read_slice`]) keep the
/// buffer borrowed, so none can outlive a call that reallocates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    data: Vec<u8>,
    position: usize,
    len: usize,
}

impl ByteBuffer {
    /// Creates a zero-filled buffer of `capacity` bytes with the cursor at 0.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            position: 0,
            len: 0,
        }
    }

    /// Creates a buffer holding a copy of `bytes`, with the cursor at 0.
    #[must_use]
    pub fn from_source(bytes: &[u8]) -> Self {
        Self {
            data: bytes.to_vec(),
            position: 0,
            len: bytes.len(),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Logical size: the furthest byte written so far, or the source length
    /// for buffers built with [`ByteBuffer::from_source`].
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current cursor position.
    #[must_use]
    pub const fn tell(&self) -> usize {
        self.position
    }

    /// Bytes between the cursor and the end of the allocation.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.position
    }

    /// The logically filled prefix of the buffer.
    #[must_use]
    pub fn filled(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Consumes the buffer, returning its logically filled prefix.
    #[must_use]
    pub fn into_vec(mut self) -> Vec<u8> {
        self.data.truncate(self.len);
        self.data
    }

    /// Moves the cursor and returns its new position.
    ///
    /// `Whence::End` resolves to `capacity - 1 - offset`, so `seek(0, End)`
    /// lands on the last byte rather than one past it.
    pub fn seek(&mut self, offset: usize, whence: Whence) -> Result<usize> {
        let capacity = self.capacity();
        let target = match whence {
            Whence::Start => Some(offset),
            Whence::Current => self.position.checked_add(offset),
            Whence::End => capacity
                .checked_sub(1)
                .and_then(|last| last.checked_sub(offset)),
        };

        match target {
            Some(position) if position <= capacity => {
                self.position = position;
                Ok(position)
            }
            _ => Err(BufferError::OutOfBounds {
                offset,
                len: 0,
                capacity,
            }),
        }
    }

    /// Grows the allocation so that `extra` bytes fit past both the logical
    /// size and the cursor.
    ///
    /// Existing contents are preserved and the buffer never shrinks.
    pub fn ensure_writable(&mut self, extra: usize) -> Result<()> {
        let base = self.len.max(self.position);
        let required = base.checked_add(extra).ok_or(BufferError::OutOfBounds {
            offset: base,
            len: extra,
            capacity: self.capacity(),
        })?;

        if required > self.data.len() {
            self.data.resize(required, 0);
        }
        Ok(())
    }

    /// Borrows everything from `offset` to the end of the allocation.
    pub fn at(&self, offset: usize) -> Result<&[u8]> {
        let range = self.span(offset, 0)?;
        Ok(&self.data[range.start..])
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let [byte] = self.read_array()?;
        Ok(byte)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_array().map(f32::from_le_bytes)
    }

    /// Borrows `count` bytes at the cursor and advances past them.
    pub fn read_slice(&mut self, count: usize) -> Result<&[u8]> {
        let range = self.span(self.position, count)?;
        self.position = range.end;
        Ok(&self.data[range])
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write(&[value])
    }

    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write(&value.to_le_bytes())
    }

    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write(&value.to_le_bytes())
    }

    /// Copies `bytes` to the cursor and advances past them.
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let range = self.span(self.position, bytes.len())?;
        let end = range.end;
        self.data[range].copy_from_slice(bytes);
        self.commit(end);
        Ok(())
    }

    /// Copies `count` bytes starting at `from` to the cursor, one byte at a
    /// time in ascending order.
    ///
    /// The source may overlap the destination. Each written byte is visible
    /// to later iterations, so a short source expands into a repeating run.
    pub fn copy_from_self(&mut self, from: usize, count: usize) -> Result<()> {
        let source = self.span(from, count)?;
        let target = self.span(self.position, count)?;
        let end = target.end;

        for (src, dst) in source.zip(target) {
            self.data[dst] = self.data[src];
        }

        self.commit(end);
        Ok(())
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let range = self.span(self.position, N)?;
        let mut bytes = [0; N];
        bytes.copy_from_slice(&self.data[range]);
        self.position += N;
        Ok(bytes)
    }

    /// Validates that `len` bytes at `offset` lie inside the allocation.
    fn span(&self, offset: usize, len: usize) -> Result<Range<usize>> {
        match offset.checked_add(len) {
            Some(end) if end <= self.data.len() => Ok(offset..end),
            _ => Err(BufferError::OutOfBounds {
                offset,
                len,
                capacity: self.data.len(),
            }),
        }
    }

    const fn commit(&mut self, end: usize) {
        self.position = end;
        if end > self.len {
            self.len = end;
        }
    }
}
