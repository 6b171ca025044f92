/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

use std::collections::VecDeque;

use crate::est::collections::delay_line::DelayLine;
use crate::est::compute::operators::ordering::{
    select, Greater, GreaterOrEqual, Lower, LowerOrEqual, OrderingOperator,
};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Extrema<T> {
    pub max: T,
    pub min: T,
}

#[derive(Debug, Copy, Clone)]
struct Entry<T> {
    index: usize,
    value: T,
}

///
/// Sliding window maximum and minimum with O(1) amortized work per committed value.
///
/// Two monotonic deques hold `(index, value)` candidates that trail the newest value. `upper`
/// is value-descending and keeps every value that still could become the maximum, `lower` is
/// value-ascending and does the same for the minimum. The newest committed value is kept
/// aside as `previous` and only enters a deque once the next value reveals which side it
/// belongs to.
///
#[derive(Debug, Clone)]
pub struct SlidingExtremum<T> {
    window: usize,
    shift: Option<DelayLine<T>>,
    upper: VecDeque<Entry<T>>,
    lower: VecDeque<Entry<T>>,
    position: usize,
    previous: Option<T>,
    committed: Option<Extrema<T>>,
    speculative: Option<Extrema<T>>,
    previewing: bool,
}

impl<T> SlidingExtremum<T>
where
    T: Copy + Default + PartialOrd,
{
    pub fn new(window: usize) -> Self {
        Self::with_shift(window, 0)
    }

    ///
    /// Tracks the window that ended `shift` commits ago
    ///
    pub fn with_shift(window: usize, shift: usize) -> Self {
        assert!(window > 0, "SlidingExtremum window must be positive");

        Self {
            window,
            shift: (shift > 0).then(|| DelayLine::new(shift)),
            upper: VecDeque::new(),
            lower: VecDeque::new(),
            position: 0,
            previous: None,
            committed: None,
            speculative: None,
            previewing: false,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn shift(&self) -> usize {
        self.shift.as_ref().map_or(0, DelayLine::delay)
    }

    pub fn commit(&mut self, value: T) -> bool {
        self.previewing = false;
        self.speculative = None;

        let value = match self.shift.as_mut() {
            Some(line) => {
                line.commit(value);
                match line.get() {
                    Some(delayed) => delayed,
                    None => return false,
                }
            }
            None => value,
        };

        self.absorb(value);
        self.is_ready()
    }

    fn absorb(&mut self, value: T) {
        let index = self.position;

        if let Some(previous) = self.previous {
            let entry = Entry {
                index: index - 1,
                value: previous,
            };

            if value > previous {
                self.lower.push_back(entry);
                prune_back::<LowerOrEqual, T>(&mut self.upper, &value);
            } else {
                self.upper.push_back(entry);
                prune_back::<GreaterOrEqual, T>(&mut self.lower, &value);
            }

            evict_front(&mut self.upper, index, self.window);
            evict_front(&mut self.lower, index, self.window);
        }

        self.position += 1;
        self.previous = Some(value);
        self.committed = Some(Extrema {
            max: self.upper.front().map_or(value, |e| e.value),
            min: self.lower.front().map_or(value, |e| e.value),
        });
    }

    ///
    /// Evaluates the extrema as if `candidate` were committed next. Reads the deques without
    /// modifying them: at most one index leaves the window per step and pruning never removes
    /// the answer, so the first live entry of each deque together with `previous` is enough.
    /// No-op before the first value has been absorbed.
    ///
    pub fn preview(&mut self, candidate: T) -> bool {
        let candidate = match self.shift.as_mut() {
            Some(line) => {
                line.preview(candidate);
                match line.get() {
                    Some(delayed) => delayed,
                    None => return false,
                }
            }
            None => candidate,
        };

        let previous = match self.previous {
            Some(previous) => previous,
            None => return false,
        };

        let index = self.position;
        let window = self.window;
        let live = |deque: &VecDeque<Entry<T>>| {
            deque
                .iter()
                .find(|e| e.index + window > index)
                .map(|e| e.value)
        };

        let mut max = candidate;
        let mut min = candidate;

        if window > 1 {
            max = select::<Greater, T>(max, previous);
            min = select::<Lower, T>(min, previous);
        }
        if let Some(value) = live(&self.upper) {
            max = select::<Greater, T>(max, value);
        }
        if let Some(value) = live(&self.lower) {
            min = select::<Lower, T>(min, value);
        }

        self.previewing = true;
        self.speculative = if index + 1 >= window {
            Some(Extrema { max, min })
        } else {
            None
        };

        self.speculative.is_some()
    }

    pub fn get(&self) -> Option<Extrema<T>> {
        if self.previewing {
            self.speculative
        } else if self.position >= self.window {
            self.committed
        } else {
            None
        }
    }

    pub fn max(&self) -> Option<T> {
        self.get().map(|e| e.max)
    }

    pub fn min(&self) -> Option<T> {
        self.get().map(|e| e.min)
    }

    pub fn is_ready(&self) -> bool {
        self.get().is_some()
    }

    pub fn is_previewing(&self) -> bool {
        self.previewing
    }

    pub fn reset(&mut self) {
        if let Some(line) = self.shift.as_mut() {
            line.reset();
        }
        self.upper.clear();
        self.lower.clear();
        self.position = 0;
        self.previous = None;
        self.committed = None;
        self.speculative = None;
        self.previewing = false;
    }
}

fn prune_back<O: OrderingOperator, T: PartialOrd>(deque: &mut VecDeque<Entry<T>>, value: &T) {
    while let Some(back) = deque.back() {
        if O::compare(&back.value, value) {
            deque.pop_back();
        } else {
            break;
        }
    }
}

fn evict_front<T>(deque: &mut VecDeque<Entry<T>>, index: usize, window: usize) {
    while let Some(front) = deque.front() {
        if front.index + window <= index {
            deque.pop_front();
        } else {
            break;
        }
    }
}
