/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

use crate::est::collections::ring_buffer::RingBuffer;

///
/// Yields the value committed exactly `delay` commits ago. Delay of zero passes values through.
///
#[derive(Debug, Clone)]
pub struct DelayLine<T> {
    delay: usize,
    buffer: RingBuffer<T>,
}

impl<T> DelayLine<T>
where
    T: Copy + Default,
{
    pub fn new(delay: usize) -> Self {
        Self {
            delay,
            buffer: RingBuffer::new(delay.saturating_add(1)),
        }
    }

    pub fn delay(&self) -> usize {
        self.delay
    }

    pub fn commit(&mut self, value: T) -> bool {
        self.buffer.commit(value)
    }

    pub fn preview(&mut self, value: T) -> bool {
        self.buffer.preview(value)
    }

    pub fn is_ready(&self) -> bool {
        self.buffer.is_full()
    }

    pub fn get(&self) -> Option<T> {
        if self.is_ready() {
            self.buffer.front()
        } else {
            None
        }
    }

    ///
    /// Most recent value, previewed one included
    ///
    pub fn latest(&self) -> Option<T> {
        self.buffer.back()
    }

    pub fn reset(&mut self) {
        self.buffer.reset();
    }
}
