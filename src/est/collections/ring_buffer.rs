/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

use std::ops::Range;

use num_traits::Zero;

use crate::est::mode::Mode;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
struct Cursor {
    head: usize,
    len: usize,
}

impl Cursor {
    fn advance(self, capacity: usize) -> Cursor {
        Cursor {
            head: self.head.wrapping_add(1),
            len: (self.len + 1).min(capacity),
        }
    }

    fn start(&self) -> usize {
        self.head.wrapping_sub(self.len)
    }
}

///
/// Fixed capacity window over the last `capacity` committed values.
///
/// Backing storage is rounded up to a power of two strictly greater than the capacity, so the
/// slot right after the newest committed value never aliases the oldest one. A preview writes
/// its value into that slot and keeps a second cursor; committed storage is left as it was.
///
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    buf: Vec<T>,
    capacity: usize,
    committed: Cursor,
    preview: Cursor,
    previewing: bool,
}

impl<T> RingBuffer<T>
where
    T: Copy + Default,
{
    pub fn new(capacity: usize) -> Self {
        let storage = match Self::storage_len(capacity) {
            Some(storage) if capacity > 0 => storage,
            _ => panic!("RingBuffer capacity({capacity}) must be positive and addressable"),
        };

        Self {
            buf: vec![T::default(); storage],
            capacity,
            committed: Cursor::default(),
            preview: Cursor::default(),
            previewing: false,
        }
    }

    ///
    /// Backing storage length for `capacity`, `None` when it cannot be allocated
    ///
    pub fn storage_len(capacity: usize) -> Option<usize> {
        capacity
            .checked_add(1)
            .and_then(usize::checked_next_power_of_two)
            .filter(|len| {
                len.checked_mul(std::mem::size_of::<T>())
                    .map_or(false, |bytes| bytes <= isize::MAX as usize)
            })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    ///
    /// Appends value permanently, evicting the oldest one once full. Returns whether the buffer is full.
    ///
    pub fn commit(&mut self, value: T) -> bool {
        self.write_tentative(value);
        self.committed = self.committed.advance(self.capacity);
        self.previewing = false;
        self.committed.len == self.capacity
    }

    ///
    /// Shows the buffer as if value were committed next, replacing any earlier preview.
    /// No-op returning false while nothing has been committed.
    ///
    pub fn preview(&mut self, value: T) -> bool {
        if self.committed.len == 0 {
            return false;
        }

        self.write_tentative(value);
        self.preview = self.committed.advance(self.capacity);
        self.previewing = true;
        self.preview.len == self.capacity
    }

    fn write_tentative(&mut self, value: T) {
        let idx = wrap_index(self.committed.head, self.buf.len());
        unsafe {
            *self.buf.get_unchecked_mut(idx) = value;
        }
    }

    pub fn is_previewing(&self) -> bool {
        self.previewing
    }

    ///
    /// View over either state. Without an outstanding preview both modes yield the committed view.
    ///
    pub fn window(&self, mode: Mode) -> Window<'_, T> {
        let cursor = match mode {
            Mode::Speculative if self.previewing => self.preview,
            _ => self.committed,
        };

        Window {
            buf: &self.buf,
            start: cursor.start(),
            len: cursor.len,
        }
    }

    pub fn committed(&self) -> Window<'_, T> {
        self.window(Mode::Committed)
    }

    fn active(&self) -> Window<'_, T> {
        self.window(Mode::Speculative)
    }

    pub fn len(&self) -> usize {
        self.active().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    pub fn front(&self) -> Option<T> {
        self.active().front()
    }

    pub fn back(&self) -> Option<T> {
        self.active().back()
    }

    pub fn get(&self, index: usize) -> Option<T> {
        self.active().get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + Clone + '_ {
        self.active().iter()
    }

    pub fn to_sequence(&self) -> Vec<T> {
        self.active().to_sequence()
    }

    pub fn sum(&self, range: Range<usize>) -> T
    where
        T: Zero,
    {
        self.active().sum(range)
    }

    pub fn reset(&mut self) {
        self.committed = Cursor::default();
        self.preview = Cursor::default();
        self.previewing = false;
    }
}

///
/// Chronological view of one state of a [`RingBuffer`], index 0 being the oldest element
///
#[derive(Debug, Copy, Clone)]
pub struct Window<'a, T> {
    buf: &'a [T],
    start: usize,
    len: usize,
}

impl<'a, T> Window<'a, T>
where
    T: Copy,
{
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Option<T> {
        if index < self.len {
            Some(self.buf[wrap_index(self.start.wrapping_add(index), self.buf.len())])
        } else {
            None
        }
    }

    pub fn front(&self) -> Option<T> {
        self.get(0)
    }

    pub fn back(&self) -> Option<T> {
        self.len.checked_sub(1).and_then(|last| self.get(last))
    }

    ///
    /// Splits logical range into at most two contiguous runs of the backing storage.
    /// Range is clamped to the window length.
    ///
    pub fn as_slices(&self, range: Range<usize>) -> (&'a [T], &'a [T]) {
        let end = range.end.min(self.len);
        let start = range.start.min(end);
        let count = end - start;

        let first = wrap_index(self.start.wrapping_add(start), self.buf.len());
        let head_run = (self.buf.len() - first).min(count);

        (
            &self.buf[first..first + head_run],
            &self.buf[..count - head_run],
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + Clone + 'a {
        let (head, tail) = self.as_slices(0..self.len);
        head.iter().chain(tail.iter()).copied()
    }

    pub fn to_sequence(&self) -> Vec<T> {
        self.iter().collect()
    }

    pub fn sum(&self, range: Range<usize>) -> T
    where
        T: Zero,
    {
        let (head, tail) = self.as_slices(range);
        head.iter()
            .chain(tail.iter())
            .fold(T::zero(), |acc, &value| acc + value)
    }
}

pub fn wrap_index(index: usize, cap: usize) -> usize {
    debug_assert!(cap.is_power_of_two());
    index & (cap - 1)
}
