/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

pub mod est;

pub use est::collections::delay_line::DelayLine;
pub use est::collections::ring_buffer::RingBuffer;
pub use est::collections::sliding_extremum::{Extrema, SlidingExtremum};
pub use est::compute::estimator::{Estimator, MovingAverage};
pub use est::definitions::{Definition, DynamicEstimator};
pub use est::error::EstimatorError;
pub use est::mode::{Mode, Status};
