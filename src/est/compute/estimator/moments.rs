/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

use log::debug;

use crate::est::collections::ring_buffer::RingBuffer;
use crate::est::mode::{Mode, Status};

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Moments {
    pub sum: f64,
    pub sum_of_squares: f64,
}

impl Moments {
    fn direct(values: impl Iterator<Item = f64>) -> Self {
        values.fold(Moments::default(), |acc, value| Moments {
            sum: acc.sum + value,
            sum_of_squares: acc.sum_of_squares + value * value,
        })
    }

    #[inline]
    fn slide(self, evicted: f64, incoming: f64) -> Self {
        Moments {
            sum: self.sum + incoming - evicted,
            sum_of_squares: self.sum_of_squares + incoming * incoming - evicted * evicted,
        }
    }
}

/// Sum of squares may shrink this far below the largest square absorbed since the last
/// re-summation before the slid value is no longer trusted.
const CANCELLATION_RATIO: f64 = 1e6;

#[derive(Debug, Copy, Clone, Default, PartialEq)]
struct Drift {
    slides: usize,
    peak_square: f64,
}

///
/// Running sum and sum of squares over a window.
///
/// Until the window fills the moments are re-summed from the window on every update, afterwards
/// the evicted value is subtracted and the incoming one added. The window is re-summed again
/// every `period` slides, and right away when the sum of squares collapses far below the
/// largest square it has absorbed since. A preview applies the same rules to a copy of the
/// committed moments, using the committed front as the would-be evicted value.
///
#[derive(Debug, Clone)]
pub struct WindowMoments {
    window: RingBuffer<f64>,
    committed: Moments,
    speculative: Moments,
    drift: Drift,
}

impl WindowMoments {
    pub fn new(period: usize) -> Self {
        Self {
            window: RingBuffer::new(period),
            committed: Moments::default(),
            speculative: Moments::default(),
            drift: Drift::default(),
        }
    }

    pub fn period(&self) -> usize {
        self.window.capacity()
    }

    pub fn update(&mut self, value: f64, mode: Mode) -> Status {
        let committed = self.window.committed();
        if mode == Mode::Speculative && committed.is_empty() {
            return Status::NotReady;
        }

        let evicted = if committed.len() == self.period() {
            committed.front()
        } else {
            None
        };

        match mode {
            Mode::Committed => {
                self.window.commit(value);
                let (moments, drift) = self.advance(evicted, value);
                self.committed = moments;
                self.drift = drift;
            }
            Mode::Speculative => {
                self.window.preview(value);
                let (moments, _) = self.advance(evicted, value);
                self.speculative = moments;
            }
        }

        Status::from_ready(self.is_ready())
    }

    ///
    /// Moments of the active window after `value` was written to it
    ///
    fn advance(&self, evicted: Option<f64>, value: f64) -> (Moments, Drift) {
        let drift = Drift {
            slides: self.drift.slides,
            peak_square: self.drift.peak_square.max(value * value),
        };

        let evicted = match evicted {
            Some(evicted) => evicted,
            None => return (Moments::direct(self.window.iter()), drift),
        };

        let slid = self.committed.slide(evicted, value);
        let slides = drift.slides + 1;

        if slides >= self.period()
            || drift.peak_square > CANCELLATION_RATIO * slid.sum_of_squares
        {
            self.resummed(self.window.iter())
        } else {
            (
                slid,
                Drift {
                    slides,
                    peak_square: drift.peak_square,
                },
            )
        }
    }

    fn resummed(&self, values: impl Iterator<Item = f64> + Clone) -> (Moments, Drift) {
        let peak_square = values
            .clone()
            .fold(0.0, |peak: f64, value| peak.max(value * value));

        (
            Moments::direct(values),
            Drift {
                slides: 0,
                peak_square,
            },
        )
    }

    pub fn moments(&self) -> Moments {
        if self.window.is_previewing() {
            self.speculative
        } else {
            self.committed
        }
    }

    pub fn is_ready(&self) -> bool {
        self.window.is_full()
    }

    pub fn window(&self) -> &RingBuffer<f64> {
        &self.window
    }

    ///
    /// Re-sums the committed moments from the window, dropping accumulated rounding error
    ///
    pub fn recompute(&mut self) {
        let (resummed, drift) = self.resummed(self.window.committed().iter());
        debug!(
            "recomputed window moments, sum drift({}), sum of squares drift({})",
            self.committed.sum - resummed.sum,
            self.committed.sum_of_squares - resummed.sum_of_squares
        );
        self.committed = resummed;
        self.drift = drift;

        if self.window.is_previewing() {
            self.speculative = Moments::direct(self.window.iter());
        }
    }

    pub fn reset(&mut self) {
        self.window.reset();
        self.committed = Moments::default();
        self.speculative = Moments::default();
        self.drift = Drift::default();
    }
}
