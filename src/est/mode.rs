/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

///
/// Selects how a sample is applied to an estimator
///
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Permanently appends the sample and advances the window.
    Committed,
    /// Evaluates the sample as the next one without persisting it. Repeated previews
    /// replace each other, the next commit discards the outstanding one.
    Speculative,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    NotConfigured,
    NotReady,
    Ready,
}

impl Status {
    pub fn from_ready(ready: bool) -> Self {
        if ready {
            Status::Ready
        } else {
            Status::NotReady
        }
    }

    pub fn is_ready(self) -> bool {
        self == Status::Ready
    }
}
